use httpmock::prelude::*;

use epiwatch_core::{EpiError, Metric, SourceLoader, TableShape};
use epiwatch_owid::OwidSource;

const LONG_CSV: &str = "\
location,iso_code,date,total_vaccinations,daily_vaccinations
India,IND,2021-01-16,191181,
India,IND,2021-01-17,,224
Australia,AUS,2021-02-22,30,30
";

#[tokio::test]
async fn loads_and_parses_the_long_csv() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/vaccinations.csv");
            then.status(200).body(LONG_CSV);
        })
        .await;

    let source = OwidSource::vaccinations()
        .url(server.url("/vaccinations.csv"))
        .build()
        .unwrap();
    assert_eq!(source.metric(), Metric::Vaccinations);
    assert_eq!(source.shape(), TableShape::Long);
    assert!(source.long_columns().is_some());

    let table = source.load().await.unwrap();
    mock.assert_async().await;

    // extra columns survive loading; projection happens downstream
    assert_eq!(table.headers.len(), 5);
    assert_eq!(table.rows.len(), 3);
}

#[tokio::test]
async fn http_failure_is_source_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/vaccinations.csv");
            then.status(503);
        })
        .await;

    let source = OwidSource::vaccinations()
        .url(server.url("/vaccinations.csv"))
        .build()
        .unwrap();
    let err = source.load().await.unwrap_err();
    assert!(
        matches!(err, EpiError::SourceUnavailable { source, .. } if source == "owid-vaccinations")
    );
}

#[tokio::test]
async fn missing_value_column_is_source_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/vaccinations.csv");
            then.status(200).body("location,date\nIndia,2021-01-16\n");
        })
        .await;

    let source = OwidSource::vaccinations()
        .url(server.url("/vaccinations.csv"))
        .build()
        .unwrap();
    let err = source.load().await.unwrap_err();
    assert!(matches!(err, EpiError::SourceMalformed { .. }));
}
