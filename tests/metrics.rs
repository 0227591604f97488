// tests/metrics.rs
mod common;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use remote_facts::fetch::extract::text_fact;
use remote_facts::metrics::Metrics;
use remote_facts::{EndpointDescriptor, FetchOptions, Params};

// Single test in this binary: the Prometheus recorder is process-wide.
#[tokio::test]
async fn fetch_records_counters_and_failure_kind() {
    let metrics = Metrics::init().expect("recorder installs once");
    let base = common::serve(
        Router::new()
            .route("/ok", get(|| async { r#"{"fact":"ok"}"# }))
            .route("/down", get(|| async { (StatusCode::BAD_GATEWAY, "x") })),
    )
    .await;
    let fetcher = common::fetcher();
    let ok = EndpointDescriptor::json("m_ok", format!("{base}/ok"), |v| text_fact(v, "/fact"));
    let down = EndpointDescriptor::json("m_down", format!("{base}/down"), |v| text_fact(v, "/fact"));

    assert!(fetcher.fetch(&ok, &Params::new(), &FetchOptions::default()).await.is_ok());
    assert!(fetcher.fetch(&down, &Params::new(), &FetchOptions::default()).await.is_err());

    let text = metrics.render();
    for needle in [
        "facts_fetch_total",
        "facts_fetch_failures_total",
        "kind=\"status\"",
        "facts_fetch_ms",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
