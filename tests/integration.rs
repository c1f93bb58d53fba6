//! Integration tests against a live SiriDB server
//!
//! These tests require a running SiriDB with its HTTP API enabled.
//!
//! Run with:
//! SIRIDB_TEST_SERVERS=localhost:9020 cargo test --test integration -- --ignored --nocapture

use siridb_prompt::client::{Client, HttpClient, Request};
use siridb_prompt::connection::{parse_server_list, ConnectionConfig};
use siridb_prompt::Error;

/// Helper to build a config from the environment
fn test_config() -> ConnectionConfig {
    let user = std::env::var("SIRIDB_TEST_USER").unwrap_or_else(|_| "iris".to_string());
    let password = std::env::var("SIRIDB_TEST_PASSWORD").unwrap_or_else(|_| "siri".to_string());
    let db = std::env::var("SIRIDB_TEST_DB").unwrap_or_else(|_| "dbtest".to_string());
    let servers =
        std::env::var("SIRIDB_TEST_SERVERS").unwrap_or_else(|_| "localhost:9020".to_string());

    ConnectionConfig::builder(db, user, password)
        .servers(parse_server_list(&servers).expect("valid SIRIDB_TEST_SERVERS"))
        .build()
        .expect("config")
}

#[tokio::test]
#[ignore] // Requires SiriDB running
async fn test_connect_and_query() {
    let mut client = HttpClient::connect(&test_config()).await.expect("connect");

    let request = Request::parse("show version").expect("request");
    let value = client.execute(&request).await.expect("query");
    assert!(value.get("data").is_some());

    client.close().await.expect("close");
}

#[tokio::test]
#[ignore] // Requires SiriDB running
async fn test_insert_then_count() {
    let mut client = HttpClient::connect(&test_config()).await.expect("connect");

    let insert = Request::parse(r#"insert {"siridb-prompt-test": [[1500000000, 1.5]]}"#)
        .expect("request");
    let value = client.execute(&insert).await.expect("insert");
    assert!(value.get("success_msg").is_some());

    let count = Request::parse("count series 'siridb-prompt-test'").expect("request");
    let value = client.execute(&count).await.expect("count");
    assert_eq!(value["series"], 1);
}

#[tokio::test]
#[ignore] // Requires SiriDB running
async fn test_query_error_is_reported() {
    let mut client = HttpClient::connect(&test_config()).await.expect("connect");

    let request = Request::parse("select bogus").expect("request");
    let result = client.execute(&request).await;
    assert!(matches!(result, Err(Error::Query(_))));
}

#[tokio::test]
#[ignore] // Requires SiriDB running
async fn test_bad_password_is_rejected() {
    let mut config = test_config();
    config.password = "definitely-wrong".into();

    let result = HttpClient::connect(&config).await;
    assert!(matches!(result, Err(Error::Auth(_))));
}
