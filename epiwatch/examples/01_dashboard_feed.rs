//! Feed a (hypothetical) dashboard from deterministic fixture data.
//!
//! Run with: `cargo run -p epiwatch --example 01_dashboard_feed`

use std::sync::Arc;

use epiwatch::{Epiwatch, Metric};
use epiwatch_mock::fixtures;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Register one source per metric. Fixtures stand in for the real
    //    connectors so this example runs offline.
    let watch = Epiwatch::builder()
        .with_source(Arc::new(fixtures::confirmed()))
        .with_source(Arc::new(fixtures::deaths()))
        .with_source(Arc::new(fixtures::vaccinations()))
        .build()?;

    // 2. One pipeline run: fetch, reshape, reconcile, publish.
    let report = watch.refresh().await?;
    println!("refreshed: {report:?}");

    // 3. The merged summary the map view renders.
    let overview = watch.overview()?;
    println!("{}", serde_json::to_string_pretty(&overview)?);

    // 4. One country's series the chart view renders.
    for (date, value) in watch.history("Australia", Metric::ConfirmedCases)? {
        println!("{date}  {value}");
    }

    Ok(())
}
