#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use campaign_tracker_gateway::config::{self, StoreKind};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
store:
  kind: memory
  memory:
    campaigns:
      - user_id: "u1"
        campaign_id: "c1"
        processing_rate: 5 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
store:
  kind: memory
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.cors.allow_origins, vec!["*".to_string()]);
    assert_eq!(cfg.store.kind, StoreKind::Memory);
    assert!(cfg.store.memory.campaigns.is_empty());
}

#[test]
fn firestore_defaults() {
    let ok = r#"
version: 1
store:
  kind: firestore
  firestore:
    project_id: "koafy-demo"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let fs = cfg.store.firestore.expect("firestore section");
    assert_eq!(fs.database, "(default)");
    assert_eq!(fs.base_url, "https://firestore.googleapis.com/v1");
    assert_eq!(fs.token_env, "FIRESTORE_TOKEN");
    assert_eq!(fs.timeout_ms, 5000);
}

#[test]
fn firestore_kind_requires_section() {
    let bad = r#"
version: 1
store:
  kind: firestore
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_unsupported_version() {
    let bad = r#"
version: 2
store:
  kind: memory
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_bad_listen_address() {
    let bad = r#"
version: 1
server:
  listen: "not-an-address"
store:
  kind: memory
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_wildcard_mixed_with_origins() {
    let bad = r#"
version: 1
cors:
  allow_origins: ["*", "https://app.example.com"]
store:
  kind: memory
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_out_of_range_timeout() {
    let bad = r#"
version: 1
store:
  kind: firestore
  firestore:
    project_id: "p"
    timeout_ms: 10
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn seed_with_both_start_times_is_rejected() {
    let bad = r#"
version: 1
store:
  kind: memory
  memory:
    campaigns:
      - user_id: "u1"
        campaign_id: "c1"
        created_at: "2025-01-01T00:00:00Z"
        created_minutes_ago: 30
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn seeds_parse_timestamps() {
    let ok = r#"
version: 1
store:
  kind: memory
  memory:
    campaigns:
      - user_id: "u1"
        campaign_id: "c1"
        target_users: ["a", "b", "c"]
        filtered_users: 1
        processing_rate_per_hour: 10
        created_at: "2025-01-01T00:00:00Z"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let seed = &cfg.store.memory.campaigns[0];
    assert_eq!(seed.target_users.len(), 3);
    assert_eq!(seed.created_at.map(|t| t.to_rfc3339()), Some("2025-01-01T00:00:00+00:00".into()));
}

#[test]
fn seed_age_out_of_range_is_rejected() {
    let seed = |mins: &str| {
        format!(
            r#"
version: 1
store:
  kind: memory
  memory:
    campaigns:
      - user_id: "u1"
        campaign_id: "c1"
        created_minutes_ago: {mins}
"#
        )
    };
    let err = config::load_from_str(&seed("9223372036854775807")).unwrap_err();
    assert!(err.to_string().contains("created_minutes_ago"), "{err}");
    assert!(config::load_from_str(&seed("-60000000")).is_err());

    let cfg = config::load_from_str(&seed("-30")).expect("future start within range");
    assert_eq!(cfg.store.memory.campaigns[0].created_minutes_ago, Some(-30));
}
