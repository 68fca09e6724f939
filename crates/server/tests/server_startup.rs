//! Server startup tests against the real binary.
//!
//! The configured media source points at a closed port, so the warm-up
//! refresh fails; the server must still come up and serve an empty cache.

use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config whose source is unreachable
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[source]
base_url = "http://127.0.0.1:1"
token = "test-token"
timeout_secs = 1

[server]
host = "127.0.0.1"
port = {}
"#,
        port
    )
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_mirrorball"))
        .env("MIRRORBALL_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(100)).await;
    }
    false
}

async fn http_get(port: u16, path: &str) -> String {
    Client::new()
        .get(format!("http://127.0.0.1:{}{}", port, path))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body")
}

async fn get_json(port: u16, path: &str) -> serde_json::Value {
    let body = http_get(port, path).await;
    serde_json::from_str(&body).expect("Failed to parse JSON")
}

#[tokio::test]
async fn test_health_endpoint_with_unreachable_source() {
    let port = get_available_port();
    let config_content = minimal_config(port);

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let mut server = spawn_server(temp_file.path()).await;

    assert!(
        wait_for_server(port, 50).await,
        "Server did not start in time"
    );

    let json = get_json(port, "/api/v1/health").await;
    assert_eq!(json["status"], "ok");

    // Warm-up failed, so the cache is empty but serving.
    let stats = get_json(port, "/api/v1/library/stats").await;
    assert_eq!(stats["total_items"], 0);
    assert_eq!(stats["is_stale"], true);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_endpoint_redacts_token() {
    let port = get_available_port();
    let config_content = minimal_config(port);

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let mut server = spawn_server(temp_file.path()).await;

    assert!(
        wait_for_server(port, 50).await,
        "Server did not start in time"
    );

    let raw = http_get(port, "/api/v1/config").await;
    assert!(!raw.contains("test-token"));

    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["source"]["token_configured"], true);
    assert_eq!(json["server"]["port"], port);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_mirrorball"))
            .env("MIRRORBALL_CONFIG", "/nonexistent/config.toml")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_missing_source_section_exits_with_error() {
    let config_without_source = r#"
[server]
port = 8080
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_without_source.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_mirrorball"))
            .env("MIRRORBALL_CONFIG", temp_file.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
