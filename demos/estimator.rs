use std::collections::HashSet;

use hll_sketch::HyperLogLog;
use rand::Rng;
use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Number of values drawn per round
const N: i32 = 1_000_000;

#[derive(Tabled)]
struct Round {
    range: String,
    distinct: usize,
    estimate: usize,
    relative_error: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rand::thread_rng();
    let mut hll = match HyperLogLog::<i32>::new(12) {
        Ok(hll) => hll,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let ranges = [100, 1_000, 10_000, N / 10, N, N * 10, N * 100, N * 1_000];
    let mut total_error = 0.0;
    let mut rounds = Vec::with_capacity(ranges.len());
    for range in ranges {
        info!(range, "drawing {} values", N);
        let mut distinct = HashSet::new();
        for _ in 0..N {
            let value = rng.gen_range(1..=range);
            distinct.insert(value);
            hll.add(&value);
        }

        let estimate = hll.count();
        let error = (estimate as f64 - distinct.len() as f64).abs() / distinct.len() as f64;
        total_error += error;
        rounds.push(Round {
            range: format!("[1 .. {}]", range),
            distinct: distinct.len(),
            estimate,
            relative_error: format!("{:.5}", error),
        });

        hll.clear();
    }

    let table_config = Settings::default().with(Style::markdown());
    println!("{}", Table::new(&rounds).with(table_config).to_string());
    println!("average error: {:.5}", total_error / rounds.len() as f64);
    println!("expected error: {:.5}", hll.relative_error());
}
