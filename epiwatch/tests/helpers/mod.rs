#![allow(dead_code)]

use std::sync::Arc;

use epiwatch::Epiwatch;
use epiwatch_mock::fixtures;

/// Orchestrator wired to the deterministic fixture world.
pub fn world() -> Epiwatch {
    Epiwatch::builder()
        .with_source(Arc::new(fixtures::confirmed()))
        .with_source(Arc::new(fixtures::deaths()))
        .with_source(Arc::new(fixtures::vaccinations()))
        .build()
        .expect("all three sources registered")
}

/// Fixture world, already refreshed once.
pub async fn refreshed_world() -> Epiwatch {
    let watch = world();
    watch.refresh().await.expect("fixture refresh succeeds");
    watch
}
