//! Ingestion dispatcher tests: handlers invoked directly with built extractors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{ConnectInfo, State},
    http::{Method, StatusCode, Uri},
    response::Response,
};

use metricd_core::{MetricType, Repository, Storage, StoredValue};
use metricd_server::{app_state::AppState, config::CollectorConfig, handlers};

const PEER: &str = "192.0.2.1:1234";

fn state() -> (AppState, Arc<Storage>) {
    let storage = Arc::new(Storage::new());
    let state = AppState::new(CollectorConfig::default(), storage.clone());
    (state, storage)
}

async fn send(state: &AppState, method: Method, target: &str) -> (StatusCode, String) {
    let peer: SocketAddr = PEER.parse().unwrap();
    let uri: Uri = target.parse().unwrap();
    let resp: Response =
        handlers::update(State(state.clone()), ConnectInfo(peer), method, uri).await;
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn stores_gauge_and_overwrites() {
    let (state, storage) = state();

    let (status, body) = send(&state, Method::POST, "/update/gauge/RandomValue/123.456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
    assert!(storage.list(&[])["192.0.2.1"].contains(&"gauge - RandomValue - 123.456".to_string()));

    let (status, _) = send(&state, Method::POST, "/update/gauge/RandomValue/123.457").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(storage.list(&[])["192.0.2.1"], vec!["gauge - RandomValue - 123.457"]);
}

#[tokio::test]
async fn stores_counter_history() {
    let (state, storage) = state();

    assert_eq!(send(&state, Method::POST, "/update/counter/PollCount/2").await.0, StatusCode::OK);
    assert_eq!(storage.list(&[])["192.0.2.1"], vec!["counter - PollCount - [2]"]);

    assert_eq!(send(&state, Method::POST, "/update/counter/PollCount/3").await.0, StatusCode::OK);
    assert_eq!(storage.list(&[])["192.0.2.1"], vec!["counter - PollCount - [2 3]"]);
}

#[tokio::test]
async fn rejects_non_post() {
    let (state, storage) = state();

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = send(&state, method, "/update/counter/PollCount/2").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Only POST requests are allowed!\n");
    }
    assert!(storage.list(&[]).is_empty());
    assert_eq!(state.metrics().method_rejections.get(&[("method", "GET")]), 1);
}

#[tokio::test]
async fn maps_errors_to_status() {
    let (state, storage) = state();

    let cases = [
        ("/update/sumator/PollCount/2", StatusCode::NOT_IMPLEMENTED, "wrong metric type"),
        ("/update/counter/PollCount/2.2", StatusCode::NOT_IMPLEMENTED, "wrong metric type"),
        ("/update/gauge/X/abc", StatusCode::NOT_FOUND, "wrong metric format"),
        ("/update/gauge/X", StatusCode::NOT_FOUND, "wrong metric format"),
        ("/update/gauge/X/1?flush=1", StatusCode::NOT_FOUND, "wrong metric format"),
    ];
    for (target, want_status, want_body) in cases {
        let (status, body) = send(&state, Method::POST, target).await;
        assert_eq!(status, want_status, "{target}");
        assert_eq!(body, want_body, "{target}");
    }
    assert!(storage.list(&[]).is_empty());

    let m = state.metrics();
    assert_eq!(m.updates.get(&[("type", "unknown"), ("outcome", "wrong_metric_type")]), 1);
    assert_eq!(m.updates.get(&[("type", "counter"), ("outcome", "wrong_metric_type")]), 1);
    assert_eq!(m.updates.get(&[("type", "unknown"), ("outcome", "bad_metric")]), 3);
}

#[tokio::test]
async fn source_is_peer_ip_without_port() {
    let (state, storage) = state();
    let uri: Uri = "/update/gauge/Alloc/1".parse().unwrap();

    let v6: SocketAddr = "[2001:db8::1]:5555".parse().unwrap();
    let resp =
        handlers::update(State(state.clone()), ConnectInfo(v6), Method::POST, uri.clone()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mapped: SocketAddr = "[::ffff:198.51.100.7]:80".parse().unwrap();
    let resp =
        handlers::update(State(state.clone()), ConnectInfo(mapped), Method::POST, uri).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        storage.get(MetricType::Gauge, "Alloc", "2001:db8::1"),
        Some(StoredValue::GaugeValue(1.0))
    );
    assert_eq!(
        storage.get(MetricType::Gauge, "Alloc", "198.51.100.7"),
        Some(StoredValue::GaugeValue(1.0))
    );
}

#[tokio::test]
async fn list_returns_json_grouped_by_source() {
    let (state, _) = state();
    send(&state, Method::POST, "/update/counter/PollCount/1").await;
    send(&state, Method::POST, "/update/gauge/RandomValue/11.22").await;

    let axum::Json(listing) = handlers::list(State(state.clone())).await;
    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "192.0.2.1": ["counter - PollCount - [1]", "gauge - RandomValue - 11.22"]
        })
    );
}

#[tokio::test]
async fn concurrent_requests_to_one_counter() {
    const N: usize = 100;
    let (state, storage) = state();

    let tasks = (0..N).map(|i| {
        let state = state.clone();
        tokio::spawn(async move {
            send(&state, Method::POST, &format!("/update/counter/Hits/{i}")).await.0
        })
    });
    for status in futures_util::future::join_all(tasks).await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    match storage.get(MetricType::Counter, "Hits", "192.0.2.1") {
        Some(StoredValue::CounterHistory(h)) => assert_eq!(h.len(), N),
        other => panic!("unexpected cell: {other:?}"),
    }
}
