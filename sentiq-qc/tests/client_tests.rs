//! QcClient wire-level tests against the fake backend

mod helpers;

use helpers::{FakeBackend, SESSION_ID};
use sentiq_common::api::{ItemUpdate, QcStatus};
use sentiq_common::{Aspect, Error, Sentiment};
use sentiq_qc::QcClient;
use std::time::Duration;

fn client_for(backend: &FakeBackend) -> QcClient {
    QcClient::new(backend.api_url.clone(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_session_decodes_items() {
    let backend = FakeBackend::with_fixture().await;
    let client = client_for(&backend);

    let snapshot = client.fetch_session(SESSION_ID).await.unwrap();

    assert_eq!(snapshot.items.len(), 10);
    let first = snapshot.find(101).unwrap();
    assert_eq!(first.aspect, Aspect::Taste);
    assert_eq!(first.status, QcStatus::Reviewed);
    assert_eq!(snapshot.progress.remaining, 7);
}

#[tokio::test]
async fn test_update_item_sends_confirmed_body() {
    let backend = FakeBackend::with_fixture().await;
    let client = client_for(&backend);

    client
        .update_item(105, &ItemUpdate::confirmed(Sentiment::Negative))
        .await
        .unwrap();

    assert_eq!(backend.patch_count(), 1);
    assert_eq!(
        backend.last_patch_body().unwrap(),
        serde_json::json!({ "correct_sentiment": "negative", "confirmed": 1 })
    );
    assert_eq!(backend.item(105).unwrap().status, QcStatus::Reviewed);
}

#[tokio::test]
async fn test_update_unknown_item_is_http_404() {
    let backend = FakeBackend::with_fixture().await;
    let client = client_for(&backend);

    let result = client
        .update_item(9999, &ItemUpdate::confirmed(Sentiment::Positive))
        .await;

    match result {
        Err(Error::Http { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "QC item not found");
        }
        other => panic!("Expected HTTP 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let backend = FakeBackend::with_fixture().await;
    backend.set_raw_session_body(r#"{"items": "not a list"}"#);
    let client = client_for(&backend);

    let result = client.fetch_session(SESSION_ID).await;

    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_wire_values_are_normalized() {
    let backend = FakeBackend::with_fixture().await;
    backend.set_raw_session_body(
        r#"{
            "items": [
                {"qc_item_id": 7, "review_content": "Spicy!", "aspect": "TASTE",
                 "predicted_sentiment": "Positive", "confidence": 1.4, "status": "Pending"}
            ],
            "meta": {"progress": {"total": 1, "reviewed": 0, "remaining": 1}}
        }"#,
    );
    let client = client_for(&backend);

    let snapshot = client.fetch_session(SESSION_ID).await.unwrap();
    let item = snapshot.find(7).unwrap();

    assert_eq!(item.aspect, Aspect::Taste);
    assert_eq!(item.predicted_sentiment, Sentiment::Positive);
    assert_eq!(item.confidence, 1.0);
    assert_eq!(item.status, QcStatus::Pending);
    assert_eq!(item.correct_sentiment, None);
}

#[tokio::test]
async fn test_inconsistent_progress_is_kept_as_reported() {
    let backend = FakeBackend::with_fixture().await;
    backend.set_raw_session_body(
        r#"{"items": [], "meta": {"progress": {"total": 5, "reviewed": 1, "remaining": 1}}}"#,
    );
    let client = client_for(&backend);

    let snapshot = client.fetch_session(SESSION_ID).await.unwrap();

    assert_eq!(snapshot.progress.total, 5);
    assert!(!snapshot.progress.is_consistent());
}
