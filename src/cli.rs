use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::{
    instrument::Pair,
    orderbook::Book,
    orders::{OrderData, Side},
    sim::{SimConfig, run_flow},
};

/// Simple CLI to exercise the matching engine
#[derive(Parser)]
#[command(name = "engine-cli")]
#[command(version = "0.1", about = "A demo of a single-symbol matching engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a randomized order flow against a fresh book
    Simulate {
        #[arg(long, default_value_t = 1000)]
        orders: u64,
        /// Starting mid price
        #[arg(long, default_value_t = 50.0)]
        mid: f64,
        /// Std-dev of the per-tick mid drift
        #[arg(long, default_value_t = 0.4)]
        sigma: f64,
        #[arg(long, default_value_t = 8.0)]
        mean_qty: f64,
        #[arg(long, default_value_t = 0.1)]
        cancel_prob: f64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "BTC-USD", value_parser = Pair::from_str)]
        symbol: Pair,
    },
    /// Seed a small book, cross it, and print the executions
    Demo {
        #[arg(long, default_value = "BTC-USD", value_parser = Pair::from_str)]
        symbol: Pair,
    },
}

fn handle_simulate(symbol: Pair, cfg: SimConfig) -> anyhow::Result<()> {
    let mut book = Book::new(symbol);
    let report = run_flow(&mut book, &cfg)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    print_book(&book);
    Ok(())
}

fn handle_demo(symbol: Pair) -> anyhow::Result<()> {
    let mut book = Book::new(symbol);
    // resting liquidity on both sides of 50
    for (client_id, side, price, shares) in [
        (1, Side::Buy, 48, 10),
        (2, Side::Buy, 49, 5),
        (3, Side::Sell, 51, 5),
        (4, Side::Sell, 52, 10),
    ] {
        book.submit(OrderData::new(client_id, side, price, shares))?;
    }
    // sweep the ask side
    book.submit(OrderData::new(5, Side::Buy, 52, 12))?;

    let executions = book.drain_executions();
    if executions.is_empty() {
        println!("No executions occured.");
    } else {
        println!("Executions:");
        for execution in &executions {
            println!("{}", serde_json::to_string(execution)?);
        }
    }
    print_book(&book);
    Ok(())
}

fn print_book(book: &Book) {
    let snapshot = book.snapshot(10);
    println!("------ Order Book ({}) ------", snapshot.symbol);
    println!("Bids (highest first):");
    for level in &snapshot.bids {
        println!(
            "Price: {}, Total Qty: {}, Orders: {}",
            level.price, level.total_volume, level.orders
        );
    }
    println!("Asks (lowest first):");
    for level in &snapshot.asks {
        println!(
            "Price: {}, Total Qty: {}, Orders: {}",
            level.price, level.total_volume, level.orders
        );
    }
    println!("--------------------------");
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate {
            orders,
            mid,
            sigma,
            mean_qty,
            cancel_prob,
            seed,
            symbol,
        } => handle_simulate(
            symbol,
            SimConfig {
                orders,
                start_mid: mid,
                noise_sigma: sigma,
                mean_qty,
                cancel_prob,
                seed,
                ..SimConfig::default()
            },
        ),
        Commands::Demo { symbol } => handle_demo(symbol),
    }
}
