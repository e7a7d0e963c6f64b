mod helpers;

use epiwatch::{EpiError, Metric};

#[tokio::test]
async fn snapshot_order_is_lexicographic_by_country_key() {
    let watch = helpers::refreshed_world().await;
    let snapshot = watch.snapshot(Metric::ConfirmedCases).unwrap();
    let keys: Vec<&str> = snapshot.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["australia", "india", "taiwan"]);
}

#[tokio::test]
async fn unrecognized_metric_names_are_rejected_at_the_boundary() {
    let watch = helpers::refreshed_world().await;
    let err = watch.snapshot_named("not_a_metric").unwrap_err();
    assert!(matches!(err, EpiError::UnknownMetric(raw) if raw == "not_a_metric"));

    // legacy dashboard labels still parse
    assert!(watch.snapshot_named("Confirmed Cases").is_ok());
    assert!(watch.snapshot_named("total_vaccinations").is_ok());
}

#[tokio::test]
async fn unknown_country_is_an_error_but_empty_history_is_not() {
    let watch = helpers::refreshed_world().await;

    let err = watch.history("Atlantis", Metric::Deaths).unwrap_err();
    assert!(matches!(err, EpiError::UnknownCountry(raw) if raw == "Atlantis"));

    // Taiwan is in the confirmed universe but has zero death rows
    let series = watch.history("Taiwan*", Metric::Deaths).unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn requested_countries_are_normalized_like_source_identities() {
    let watch = helpers::refreshed_world().await;
    let exact = watch.history("india", Metric::ConfirmedCases).unwrap();
    let sloppy = watch.history("  INDIA ", Metric::ConfirmedCases).unwrap();
    assert_eq!(exact, sloppy);
    assert_eq!(exact.len(), 3);
}

#[tokio::test]
async fn vaccination_history_is_sparse_and_date_ascending() {
    let watch = helpers::refreshed_world().await;
    let series = watch.history("India", Metric::Vaccinations).unwrap();
    // the blank-value row was skipped during reshaping
    assert_eq!(series.len(), 2);
    assert!(series[0].0 < series[1].0);
    assert_eq!(series[1].1, 454_049.0);
}

#[tokio::test]
async fn overview_merges_all_three_metrics_per_country() {
    let watch = helpers::refreshed_world().await;
    let rows = watch.overview().unwrap();
    assert_eq!(rows.len(), 3);

    let india = rows.iter().find(|r| r.country.as_str() == "india").unwrap();
    assert_eq!(india.confirmed, 9.0);
    assert_eq!(india.deaths, 1.0);
    assert_eq!(india.vaccinations, 454_049.0);

    let taiwan = rows.iter().find(|r| r.country.as_str() == "taiwan").unwrap();
    assert_eq!(taiwan.deaths, 0.0);
    assert_eq!(taiwan.vaccinations, 0.0);
}

#[tokio::test]
async fn history_span_covers_first_to_last_date() {
    let watch = helpers::refreshed_world().await;
    let (first, last) = watch
        .history_span("Australia", Metric::ConfirmedCases)
        .unwrap()
        .expect("australia has confirmed rows");
    assert!(first < last);
    assert!(watch.history_span("Taiwan", Metric::Deaths).unwrap().is_none());
}
