use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    errors::{CancelError, SubmitError},
    execution::{Execution, ExecutionQueue},
    index::OrderIndex,
    instrument::Pair,
    ladder::PriceLadder,
    orders::{Order, OrderData, Side},
    sequencer::{CounterSequencer, Sequencer},
};

/// One entry of a depth view: aggregate state of a single price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: u64,
    pub total_volume: u64,
    pub orders: usize,
}

/// A serializable two-sided view of the book, levels best-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: String,
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

/// The matching coordinator for one symbol.
///
/// A [`Book`] owns both price ladders, the order index, and the execution
/// queue, and processes each submission or cancellation to completion before
/// the next; callers serialize access externally. Incoming orders are
/// matched against the opposite ladder in price/time priority; whatever
/// remains rests on their own side.
pub struct Book {
    symbol: Pair,
    bids: PriceLadder,
    asks: PriceLadder,
    index: OrderIndex,
    executions: ExecutionQueue,
    sequencer: Box<dyn Sequencer>,
}

impl Book {
    pub fn new(symbol: Pair) -> Self {
        Self::with_sequencer(symbol, Box::new(CounterSequencer::new()))
    }

    /// Builds a book drawing order and execution ids from the given
    /// sequencer (e.g one shared with the surrounding system).
    pub fn with_sequencer(symbol: Pair, sequencer: Box<dyn Sequencer>) -> Self {
        Self {
            symbol,
            bids: PriceLadder::new(Side::Buy),
            asks: PriceLadder::new(Side::Sell),
            index: OrderIndex::new(),
            executions: ExecutionQueue::new(),
            sequencer,
        }
    }

    pub fn symbol(&self) -> Pair {
        self.symbol
    }

    /// Submits a limit order intent and returns its order id.
    ///
    /// The intent is matched against the opposite side of the book; each fill
    /// appends an [`Execution`] to the queue. A residual rests on its own
    /// side under the returned id. On [`SubmitError::SelfTradeRejected`],
    /// fills already produced within this submission against other clients
    /// stay queued and the residual is discarded.
    pub fn submit(&mut self, mut intent: OrderData) -> Result<u64, SubmitError> {
        if intent.shares == 0 {
            warn!(client_id = intent.client_id, "order rejected: shares must be > 0");
            return Err(SubmitError::InvalidOrder("shares must be > 0".into()));
        }
        if intent.limit_price == 0 {
            warn!(client_id = intent.client_id, "order rejected: price must be > 0");
            return Err(SubmitError::InvalidOrder("price must be > 0".into()));
        }

        let order_id = self.sequencer.next_order_id();
        let symbol = self.symbol.code();
        debug!(
            order_id,
            client_id = intent.client_id,
            side = ?intent.side,
            price = intent.limit_price,
            shares = intent.shares,
            "order accepted"
        );

        let (own, opp) = match intent.side {
            Side::Buy => (&mut self.bids, &mut self.asks),
            Side::Sell => (&mut self.asks, &mut self.bids),
        };

        while intent.shares > 0 && opp.crosses(intent.limit_price) {
            let best_price = opp.best_price().expect("crossed ladder has no best level");
            let level = opp
                .get_mut(best_price)
                .expect("best price points at a missing level");

            let result = level.process_fill(
                &mut intent,
                order_id,
                &symbol,
                self.sequencer.as_mut(),
                &mut self.index,
                &mut self.executions,
            );
            if level.is_empty() {
                opp.remove(best_price);
            }
            if let Err(err) = result {
                warn!(order_id, client_id = intent.client_id, error = %err, "order rejected");
                return Err(err);
            }
        }

        if intent.shares > 0 {
            let level = own.find_or_insert(intent.limit_price);
            level.push_back(Order::rest(order_id, &intent));
            self.index.insert(order_id, intent.side, intent.limit_price);
            debug!(order_id, price = intent.limit_price, shares = intent.shares, "order rested");
        }
        Ok(order_id)
    }

    /// Cancels a resting order, unlinking it from its level's queue.
    pub fn cancel(&mut self, order_id: u64) -> Result<(), CancelError> {
        let Some(loc) = self.index.remove(order_id) else {
            warn!(order_id, "cancel failed: order not found");
            return Err(CancelError::UnknownOrder(order_id));
        };

        let ladder = match loc.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let level = ladder
            .get_mut(loc.price)
            .expect("order index points at a missing level");
        let order = level
            .cancel(order_id)
            .expect("indexed order missing from its level");
        if level.is_empty() {
            ladder.remove(loc.price);
        }
        debug!(order_id, side = ?loc.side, price = loc.price, shares = order.shares(), "order cancelled");
        Ok(())
    }

    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// Aggregate state of up to `levels` price levels, best first.
    pub fn depth(&self, side: Side, levels: usize) -> Vec<DepthLevel> {
        let ladder = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        ladder
            .iter_from_best()
            .take(levels)
            .map(|l| DepthLevel {
                price: l.price(),
                total_volume: l.total_volume(),
                orders: l.size(),
            })
            .collect()
    }

    pub fn snapshot(&self, levels: usize) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.code(),
            bids: self.depth(Side::Buy, levels),
            asks: self.depth(Side::Sell, levels),
        }
    }

    /// Number of orders currently resting across both sides.
    pub fn resting_orders(&self) -> usize {
        self.index.len()
    }

    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains(order_id)
    }

    pub fn pending_executions(&self) -> usize {
        self.executions.len()
    }

    /// Hands all queued executions to the caller, emptying the queue.
    pub fn drain_executions(&mut self) -> Vec<Execution> {
        self.executions.drain()
    }
}
