use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,  //Bid,
    Sell, //Ask,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// An order intent as handed over by the session layer.
///
/// Carries the running execution state of the submission: while the intent is
/// walked across price levels, `shares` counts down and the cumulative fill
/// state counts up. If a residual rests, that state moves onto the resting
/// [`Order`] unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderData {
    pub client_id: u64,
    pub side: Side,
    /// Limit price in ticks. Strictly positive.
    pub limit_price: u64,
    /// Remaining unfilled quantity. Strictly positive on submission.
    pub shares: u64,
    #[serde(skip)]
    executed_quantity: u64,
    #[serde(skip)]
    executed_value: u128,
}

impl OrderData {
    pub fn new(client_id: u64, side: Side, limit_price: u64, shares: u64) -> Self {
        Self {
            client_id,
            side,
            limit_price,
            shares,
            executed_quantity: 0,
            executed_value: 0,
        }
    }

    pub fn executed_quantity(&self) -> u64 {
        self.executed_quantity
    }

    /// Volume-weighted average fill price, derived from the running
    /// (value, quantity) pair. 0.0 before the first fill.
    pub fn avg_price(&self) -> f64 {
        if self.executed_quantity == 0 {
            0.0
        } else {
            self.executed_value as f64 / self.executed_quantity as f64
        }
    }

    pub(crate) fn fill(&mut self, size: u64, price: u64) {
        self.shares -= size;
        self.executed_quantity += size;
        self.executed_value += size as u128 * price as u128;
    }
}

/// A resting order, owned by the FIFO queue of its price level.
#[derive(Debug, Clone)]
pub struct Order {
    order_id: u64,
    client_id: u64,
    side: Side,
    limit_price: u64,
    shares: u64,
    executed_quantity: u64,
    executed_value: u128,
}

impl Order {
    /// Builds the resting order for an intent's residual, inheriting the
    /// cumulative fill state the intent accrued while matching.
    pub(crate) fn rest(order_id: u64, intent: &OrderData) -> Self {
        Self {
            order_id,
            client_id: intent.client_id,
            side: intent.side,
            limit_price: intent.limit_price,
            shares: intent.shares,
            executed_quantity: intent.executed_quantity,
            executed_value: intent.executed_value,
        }
    }

    pub fn order_id(&self) -> u64 {
        self.order_id
    }

    pub fn client_id(&self) -> u64 {
        self.client_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn limit_price(&self) -> u64 {
        self.limit_price
    }

    /// Remaining unfilled quantity. Positive while the order is queued.
    pub fn shares(&self) -> u64 {
        self.shares
    }

    pub fn executed_quantity(&self) -> u64 {
        self.executed_quantity
    }

    pub fn avg_price(&self) -> f64 {
        if self.executed_quantity == 0 {
            0.0
        } else {
            self.executed_value as f64 / self.executed_quantity as f64
        }
    }

    pub(crate) fn fill(&mut self, size: u64, price: u64) {
        self.shares -= size;
        self.executed_quantity += size;
        self.executed_value += size as u128 * price as u128;
    }
}
