//! Agent lifecycle state machine tests

use std::sync::Arc;

use vivirag::api::AgentHandle;
use vivirag::config::AppConfig;

fn fast_config() -> Arc<AppConfig> {
    let mut config = AppConfig::default();
    config.retry.max_attempts = 2;
    config.retry.delay_ms = 1;
    Arc::new(config)
}

#[tokio::test]
async fn missing_credentials_degrade_the_handle() {
    let handle = AgentHandle::with_lookup(fast_config(), Arc::new(|_name: &str| None));

    assert_eq!(handle.state_name().await, "uninitialized");

    let err = handle.acquire().await.expect_err("no credentials");
    let message = err.to_string();
    assert!(message.contains("PINECONE_API_KEY"));
    assert!(message.contains("PINECONE_INDEX"));
    assert!(message.contains("GOOGLE_API_KEY"));

    assert_eq!(handle.state_name().await, "degraded");
    assert!(handle.last_error().await.is_some());
}

#[tokio::test]
async fn degraded_handles_keep_probing() {
    let handle = AgentHandle::with_lookup(fast_config(), Arc::new(|_name: &str| None));

    handle.acquire().await.expect_err("no credentials");
    assert_eq!(handle.state_name().await, "degraded");

    // A later probe re-attempts initialization rather than staying stuck.
    handle.acquire().await.expect_err("still no credentials");
    assert_eq!(handle.state_name().await, "degraded");
}

#[tokio::test]
async fn presence_report_never_carries_values() {
    let handle = AgentHandle::with_lookup(
        fast_config(),
        Arc::new(|name: &str| (name == "PINECONE_INDEX").then(|| "vivi-ia-base".to_string())),
    );

    let presence = handle.credential_presence();
    assert_eq!(
        presence,
        vec![
            ("PINECONE_API_KEY", false),
            ("PINECONE_INDEX", true),
            ("GOOGLE_API_KEY", false),
        ]
    );
}
