//! Mock Better BibTeX JSON-RPC responses.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RPC_PATH: &str = "/better-bibtex/json-rpc";

/// Endpoint URL of the mock service.
#[must_use]
pub fn endpoint(server: &MockServer) -> String {
    format!("{}{RPC_PATH}", server.uri())
}

/// A successful JSON-RPC response carrying `result`.
#[must_use]
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": null,
    }))
}

/// A JSON-RPC error response.
#[must_use]
pub fn rpc_error(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "error": {"code": -32603, "message": message},
        "id": null,
    }))
}

/// `item.export` result in the `[status, content-type, body]` form.
#[must_use]
pub fn export_result(records: Value) -> Value {
    let body = json!({"config": {"id": "jzon"}, "items": records});
    json!([200, "text/plain", body.to_string()])
}

/// Answers `item.citationkey` with `mapping`, expecting exactly `times` calls.
pub async fn mount_citation_keys(server: &MockServer, mapping: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_partial_json(json!({"method": "item.citationkey"})))
        .respond_with(rpc_result(mapping))
        .expect(times)
        .mount(server)
        .await;
}

/// Answers `item.export` for one citation key with `records`.
pub async fn mount_export(server: &MockServer, citation_key: &str, records: Value) {
    mount_export_raw(server, citation_key, export_result(records)).await;
}

/// Answers `item.export` for one citation key with `result` as sent.
pub async fn mount_export_raw(server: &MockServer, citation_key: &str, result: Value) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_partial_json(json!({
            "method": "item.export",
            "params": [[citation_key], "jzon"],
        })))
        .respond_with(rpc_result(result))
        .expect(1)
        .mount(server)
        .await;
}

/// Answers `item.export` for one citation key with a remote error.
pub async fn mount_export_error(server: &MockServer, citation_key: &str, message: &str) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_partial_json(json!({
            "method": "item.export",
            "params": [[citation_key], "jzon"],
        })))
        .respond_with(rpc_error(message))
        .mount(server)
        .await;
}
