//! Simulation harness for noisy order flow against the engine.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Exp1, Normal};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    errors::SubmitError,
    orderbook::Book,
    orders::{OrderData, Side},
};

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of submissions to attempt.
    pub orders: u64,
    /// Starting mid price the flow quotes around.
    pub start_mid: f64,
    /// N(0, sigma) drift applied to mid each tick.
    pub noise_sigma: f64,
    /// Average order size (unit-exp * mean_qty).
    pub mean_qty: f64,
    /// Probability a tick cancels a previously rested order instead of
    /// submitting a new one.
    pub cancel_prob: f64,
    /// Number of distinct client ids placing orders.
    pub clients: u64,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            orders: 1_000,
            start_mid: 50.0,
            noise_sigma: 0.4,
            mean_qty: 8.0,
            cancel_prob: 0.1,
            clients: 8,
            seed: None,
        }
    }
}

/// Outcome counters of one simulation run.
#[derive(Debug, Default, Serialize)]
pub struct SimReport {
    pub submitted: u64,
    pub fills: u64,
    pub traded_volume: u64,
    pub self_trade_rejections: u64,
    pub cancels: u64,
    pub best_bid: Option<u64>,
    pub best_ask: Option<u64>,
}

/// Drives a randomized submit/cancel flow through the book: quotes around a
/// drifting mid, drains executions as a session layer would, and tallies the
/// outcome.
pub fn run_flow(book: &mut Book, cfg: &SimConfig) -> anyhow::Result<SimReport> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let drift = Normal::new(0.0, cfg.noise_sigma)?;
    let size = Exp1;

    let mut report = SimReport::default();
    let mut mid = cfg.start_mid;
    let mut live: Vec<u64> = Vec::new();
    let spread = 1.0_f64;

    for _ in 0..cfg.orders {
        // mid drift, kept above the tick floor
        mid = (mid + drift.sample(&mut rng)).max(2.0);

        if !live.is_empty() && rng.random_bool(cfg.cancel_prob) {
            let idx = rng.random_range(0..live.len());
            let order_id = live.swap_remove(idx);
            // the order may have been fully filled since it rested
            if book.cancel(order_id).is_ok() {
                report.cancels += 1;
            }
            continue;
        }

        let unit: f64 = size.sample(&mut rng);
        let shares = (unit * cfg.mean_qty).max(1.0).round() as u64;
        let client_id = rng.random_range(1..=cfg.clients);

        // quote around mid
        let (price, side) = if rng.random_bool(0.5) {
            ((mid - spread).max(1.0).round() as u64, Side::Buy)
        } else {
            ((mid + spread).max(1.0).round() as u64, Side::Sell)
        };

        match book.submit(OrderData::new(client_id, side, price, shares)) {
            Ok(order_id) => {
                report.submitted += 1;
                if book.contains_order(order_id) {
                    live.push(order_id);
                }
            }
            // a rejected submission may still have produced fills against
            // other clients before the stop; drain those below as usual
            Err(SubmitError::SelfTradeRejected { .. }) => {
                report.self_trade_rejections += 1;
            }
            Err(err) => return Err(err.into()),
        }

        for execution in book.drain_executions() {
            debug!(
                price = execution.exec_price,
                size = execution.exec_size,
                maker = execution.maker_order_id,
                taker = execution.taker_order_id,
                "sim fill"
            );
            report.fills += 1;
            report.traded_volume += execution.exec_size;
        }
    }

    report.best_bid = book.best_bid();
    report.best_ask = book.best_ask();
    info!(
        submitted = report.submitted,
        fills = report.fills,
        volume = report.traded_volume,
        rejected = report.self_trade_rejections,
        cancels = report.cancels,
        "simulation done"
    );
    Ok(report)
}
