use std::collections::VecDeque;

use tracing::trace;

use crate::{
    errors::SubmitError,
    execution::{Execution, ExecutionQueue, ExecutionType},
    index::OrderIndex,
    orders::{Order, OrderData, Side},
    sequencer::Sequencer,
};

/// One price level: the FIFO queue of resting orders at a single
/// (side, price), front being the earliest arrival.
///
/// Aggregates are maintained incrementally so the ladder can answer depth
/// queries without walking queues: `size()` is the number of resting orders
/// and `total_volume()` the sum of their remaining shares. A limit with
/// `size() == 0` must not stay in its ladder.
#[derive(Debug)]
pub struct Limit {
    price: u64,
    side: Side,
    queue: VecDeque<Order>,
    total_volume: u64,
}

impl Limit {
    pub fn new(side: Side, price: u64) -> Self {
        Self {
            price,
            side,
            queue: VecDeque::new(),
            total_volume: 0,
        }
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> usize {
        self.queue.len()
    }

    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn front(&self) -> Option<&Order> {
        self.queue.front()
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.queue.iter()
    }

    /// Appends a resting order at the tail (lowest time priority).
    pub fn push_back(&mut self, order: Order) {
        self.total_volume += order.shares();
        self.queue.push_back(order);
    }

    /// Unlinks the order with the given id, keeping the FIFO order of the
    /// remaining queue intact. Returns the removed order.
    pub fn cancel(&mut self, order_id: u64) -> Option<Order> {
        let pos = self.queue.iter().position(|o| o.order_id() == order_id)?;
        let order = self.queue.remove(pos)?;
        self.total_volume -= order.shares();
        Some(order)
    }

    /// Walks the queue head to tail, trading the taker intent against each
    /// resting maker until either side is exhausted.
    ///
    /// Every fill executes at this level's price, produces one [`Execution`]
    /// on `executions`, and adjusts the aggregates. Fully drained makers are
    /// popped and dropped from `index`. If the next maker belongs to the
    /// taker's client the walk stops with [`SubmitError::SelfTradeRejected`];
    /// fills already produced stay on the queue.
    pub fn process_fill(
        &mut self,
        taker: &mut OrderData,
        taker_order_id: u64,
        symbol: &str,
        sequencer: &mut dyn Sequencer,
        index: &mut OrderIndex,
        executions: &mut ExecutionQueue,
    ) -> Result<(), SubmitError> {
        while taker.shares > 0 {
            let Some(maker) = self.queue.front_mut() else {
                break;
            };
            if maker.client_id() == taker.client_id {
                return Err(SubmitError::SelfTradeRejected {
                    client_id: taker.client_id,
                    resting_order_id: maker.order_id(),
                });
            }

            let exec_volume = maker.shares().min(taker.shares);
            let maker_filled = exec_volume == maker.shares();
            maker.fill(exec_volume, self.price);
            taker.fill(exec_volume, self.price);

            let record = Execution {
                symbol: symbol.to_string(),
                execution_id: sequencer.next_execution_id(),
                maker_order_id: maker.order_id(),
                taker_order_id,
                exec_price: self.price,
                exec_size: exec_volume,
                maker_side: self.side,
                taker_side: taker.side,
                maker_exec_type: if maker_filled {
                    ExecutionType::FullFill
                } else {
                    ExecutionType::PartialFill
                },
                taker_exec_type: if taker.shares == 0 {
                    ExecutionType::FullFill
                } else {
                    ExecutionType::PartialFill
                },
                maker_client_id: maker.client_id(),
                taker_client_id: taker.client_id,
                maker_cum_qty: maker.executed_quantity(),
                taker_cum_qty: taker.executed_quantity(),
                maker_leaves_qty: maker.shares(),
                taker_leaves_qty: taker.shares,
                maker_avg_price: maker.avg_price(),
                taker_avg_price: taker.avg_price(),
            };
            let maker_order_id = maker.order_id();

            trace!(
                maker_order_id,
                taker_order_id,
                price = self.price,
                size = exec_volume,
                "fill"
            );

            self.total_volume -= exec_volume;
            executions.push(record);

            if maker_filled {
                self.queue.pop_front();
                index.remove(maker_order_id);
            }
        }
        Ok(())
    }
}
