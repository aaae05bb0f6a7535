//! Shared helpers for integration tests against a mocked extraction service.

#![allow(dead_code)]

use extract_view::core::config_manager::ServiceConfig;
use extract_view::{ExtractClient, Submitter};
use serde_json::{json, Value};
use wiremock::{MockServer, ResponseTemplate};

/// Submitter pointed at the mock server
pub fn submitter_for(server: &MockServer) -> Submitter {
    submitter_for_url(&server.uri())
}

pub fn submitter_for_url(url: &str) -> Submitter {
    submitter_with_timeout(url, None)
}

pub fn submitter_with_timeout(url: &str, timeout_seconds: Option<u64>) -> Submitter {
    let config = ServiceConfig {
        base_url: url.to_string(),
        timeout_seconds,
        ..ServiceConfig::default()
    };
    Submitter::new(ExtractClient::new(&config).expect("client"))
}

/// JSON reply with the given status
pub fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

/// A table encoded as a JSON string, as the service sends it
pub fn table_json(columns: &[&str], rows: &[&[&str]]) -> String {
    json!({ "columns": columns, "data": rows }).to_string()
}
