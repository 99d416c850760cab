//! Firestore REST client against a mock server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campaign_tracker_gateway::config::FirestoreSection;
use campaign_tracker_gateway::store::{CampaignStore, FirestoreStore};

const DOC_PATH: &str = "/v1/projects/demo/databases/(default)/documents/users/u1/campaigns/c1";

fn section(server: &MockServer) -> FirestoreSection {
    FirestoreSection {
        project_id: "demo".into(),
        database: "(default)".into(),
        base_url: format!("{}/v1", server.uri()),
        token_env: "UNUSED_TEST_TOKEN".into(),
        token_file: None,
        timeout_ms: 2000,
    }
}

#[tokio::test]
async fn fetches_and_normalizes_campaign() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo/databases/(default)/documents/users/u1/campaigns/c1",
            "fields": {
                "name": { "stringValue": "Spring" },
                "targetUsers": { "arrayValue": { "values": [
                    { "stringValue": "a" }, { "stringValue": "b" }
                ] } },
                "filteredUsers": { "integerValue": "3" },
                "targetCount": { "integerValue": "999" },
                "createdAt": { "timestampValue": "2025-03-01T10:00:00Z" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = FirestoreStore::with_token(&section(&server), Some("secret-token".into())).unwrap();
    let campaign = store.get_campaign("u1", "c1").await.unwrap().expect("campaign");

    assert_eq!(campaign.id, "c1");
    assert_eq!(campaign.name, "Spring");
    assert_eq!(campaign.target_count, 5);
    assert_eq!(campaign.processing_rate_per_hour, 3);
    assert_eq!(
        campaign.created_at.map(|t| t.to_rfc3339()),
        Some("2025-03-01T10:00:00+00:00".to_string())
    );
    server.verify().await;
}

#[tokio::test]
async fn missing_document_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let store = FirestoreStore::with_token(&section(&server), None).unwrap();
    assert!(store.get_campaign("u1", "c1").await.unwrap().is_none());
}

#[tokio::test]
async fn server_error_is_a_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = FirestoreStore::with_token(&section(&server), None).unwrap();
    let err = store.get_campaign("u1", "c1").await.unwrap_err();
    assert!(err.to_string().contains("503"));
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}

#[tokio::test]
async fn malformed_body_is_a_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let store = FirestoreStore::with_token(&section(&server), None).unwrap();
    assert!(store.get_campaign("u1", "c1").await.is_err());
}
