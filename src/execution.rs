use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::orders::Side;

/// Fill classification for one leg of a trade. The maker and taker legs of
/// the same execution are typed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionType {
    PartialFill,
    FullFill,
}

/// An execution report describes a single trade between a resting maker
/// order and the incoming taker order.
///
/// - The price comes from the maker's order (i.e the resting order), so any
///   price improvement goes to the taker.
/// - `exec_size` is the amount filled on both legs.
/// - Cumulative, leaves, and average-price fields reflect each order's state
///   immediately *after* this fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub symbol: String,
    pub execution_id: u64,
    pub maker_order_id: u64,
    pub taker_order_id: u64,
    pub exec_price: u64,
    pub exec_size: u64,
    pub maker_side: Side,
    pub taker_side: Side,
    pub maker_exec_type: ExecutionType,
    pub taker_exec_type: ExecutionType,
    pub maker_client_id: u64,
    pub taker_client_id: u64,
    pub maker_cum_qty: u64,
    pub taker_cum_qty: u64,
    pub maker_leaves_qty: u64,
    pub taker_leaves_qty: u64,
    pub maker_avg_price: f64,
    pub taker_avg_price: f64,
}

/// FIFO hand-off buffer between the matching engine and the session layer.
///
/// Records are appended in the exact order matching produces them and are
/// never mutated afterwards; `drain` transfers ownership of the whole batch
/// to the caller.
#[derive(Debug, Default)]
pub struct ExecutionQueue {
    queue: VecDeque<Execution>,
}

impl ExecutionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, execution: Execution) {
        self.queue.push_back(execution);
    }

    pub fn drain(&mut self) -> Vec<Execution> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_execution(execution_id: u64) -> Execution {
        Execution {
            symbol: "BTC-USD".to_string(),
            execution_id,
            maker_order_id: 1,
            taker_order_id: 2,
            exec_price: 100,
            exec_size: 5,
            maker_side: Side::Buy,
            taker_side: Side::Sell,
            maker_exec_type: ExecutionType::FullFill,
            taker_exec_type: ExecutionType::PartialFill,
            maker_client_id: 10,
            taker_client_id: 20,
            maker_cum_qty: 5,
            taker_cum_qty: 5,
            maker_leaves_qty: 0,
            taker_leaves_qty: 3,
            maker_avg_price: 100.0,
            taker_avg_price: 100.0,
        }
    }

    #[test]
    fn drain_empties_in_fifo_order() {
        let mut q = ExecutionQueue::new();
        q.push(sample_execution(1));
        q.push(sample_execution(2));
        q.push(sample_execution(3));
        assert_eq!(q.len(), 3);

        let drained = q.drain();
        assert_eq!(
            drained.iter().map(|e| e.execution_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }
}
