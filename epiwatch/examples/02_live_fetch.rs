//! Fetch the real published datasets and answer a few queries.
//!
//! Performs network I/O. Run with:
//! `cargo run -p epiwatch --example 02_live_fetch`

use std::sync::Arc;

use epiwatch::{Epiwatch, Metric};
use epiwatch_jhu::JhuSource;
use epiwatch_owid::OwidSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let watch = Epiwatch::builder()
        .with_source(Arc::new(JhuSource::confirmed().build()?))
        .with_source(Arc::new(JhuSource::deaths().build()?))
        .with_source(Arc::new(OwidSource::vaccinations().build()?))
        .build()?;

    let report = watch.refresh().await?;
    println!(
        "reconciled {} countries in {:?}",
        report.countries, report.elapsed
    );

    let snapshot = watch.snapshot(Metric::ConfirmedCases)?;
    println!("top of the snapshot table:");
    for (country, value) in snapshot.iter().take(5) {
        println!("  {country}: {value}");
    }

    let series = watch.history("India", Metric::Vaccinations)?;
    if let Some((date, value)) = series.last() {
        println!("latest vaccination figure for india: {value} on {date}");
    }

    Ok(())
}
