//! Integration tests for the resolver and output modules.
//!
//! Tests the full identifier → citation key → record → text flow through the
//! public API, against a mock Better BibTeX endpoint.

mod support;
use support::bbt::{
    RPC_PATH, endpoint, mount_citation_keys, mount_export, mount_export_error, mount_export_raw,
    rpc_error,
};
use support::socket_guard::start_mock_server_or_skip;

use serde_json::json;
use wiremock::Mock;
use wiremock::matchers::{method, path};
use zoinks::{
    OutputMode, RecordMapping, ResolveError, RpcClient, parse_identifiers, render_citation_keys,
    render_records, resolve, resolve_citation_keys,
};

#[tokio::test]
async fn test_resolve_single_item_key_prints_title() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_citation_keys(&server, json!({"WCKIQ23Y": "smith2018"}), 1).await;
    mount_export(&server, "smith2018", json!([{"title": "Example Work"}])).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("WCKIQ23Y\n");
    let records = resolve(&client, &identifiers).await.unwrap();

    let mode = OutputMode::select(&["title"], false);
    assert_eq!(render_records(&records, &mode, 78), "Example Work\n");
}

#[tokio::test]
async fn test_resolve_select_link_uses_trailing_key() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_citation_keys(&server, json!({"1_WCKIQ23Y": "smith2018"}), 1).await;
    mount_export(&server, "smith2018", json!([{"date": "2018"}])).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("zotero://select/items/1_WCKIQ23Y");
    let records = resolve(&client, &identifiers).await.unwrap();

    assert_eq!(
        records.keys().collect::<Vec<_>>(),
        ["zotero://select/items/1_WCKIQ23Y"]
    );
    let mode = OutputMode::select(&["DATE"], false);
    assert_eq!(render_records(&records, &mode, 78), "2018\n");
}

#[tokio::test]
async fn test_resolve_citekeys_skip_citation_key_lookup() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_citation_keys(&server, json!({}), 0).await;
    mount_export(&server, "smith2018", json!([{"title": "One"}])).await;
    mount_export(&server, "doe2020", json!([{"title": "Two"}])).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("@smith2018 @doe2020");
    let records = resolve(&client, &identifiers).await.unwrap();

    let mode = OutputMode::select(&["title"], false);
    assert_eq!(
        render_records(&records, &mode, 78),
        "@smith2018: One\n@doe2020: Two\n"
    );
}

#[tokio::test]
async fn test_citekey_only_output_makes_no_calls() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_citation_keys(&server, json!({}), 0).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("@smith2018");
    let keys = resolve_citation_keys(&client, &identifiers).await.unwrap();

    assert!(!OutputMode::select(&["citekey"], false).needs_records());
    assert_eq!(render_citation_keys(&keys, 78), "smith2018\n");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_three_identifiers_two_fields_one_unresolved() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_citation_keys(
        &server,
        json!({"AAAA1111": "alpha2001", "BBBB2222": "beta2002", "CCCC3333": "gamma2003"}),
        1,
    )
    .await;
    mount_export(
        &server,
        "alpha2001",
        json!([{"title": "Alpha", "date": "2001"}]),
    )
    .await;
    mount_export(&server, "beta2002", json!([])).await;
    mount_export(
        &server,
        "gamma2003",
        json!([{"title": "Gamma", "date": "2003"}]),
    )
    .await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("AAAA1111 BBBB2222 CCCC3333");
    let records = resolve(&client, &identifiers).await.unwrap();
    assert_eq!(records.len(), 3);

    let mode = OutputMode::select(&["title", "date"], false);
    assert_eq!(
        render_records(&records, &mode, 78),
        "AAAA1111: title: Alpha\nAAAA1111: date: 2001\n\
         CCCC3333: title: Gamma\nCCCC3333: date: 2003\n"
    );
}

#[tokio::test]
async fn test_unknown_item_key_gets_placeholder() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_citation_keys(&server, json!({"AAAA1111": "alpha2001"}), 1).await;
    mount_export(&server, "alpha2001", json!([{"title": "Alpha"}])).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("AAAA1111 ZZZZ9999");
    let records = resolve(&client, &identifiers).await.unwrap();

    assert!(records["ZZZZ9999"].is_placeholder());
    let unresolved: RecordMapping = records
        .into_iter()
        .filter(|(identifier, _)| identifier == "ZZZZ9999")
        .collect();
    assert_eq!(
        render_records(&unresolved, &OutputMode::AllFields, 78),
        "Unknown: Unknown\n\n"
    );
}

#[tokio::test]
async fn test_remote_export_error_is_placeholder() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_export_error(&server, "ghost", "no such citation key").await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("@ghost");
    let records = resolve(&client, &identifiers).await.unwrap();
    assert!(records["@ghost"].is_placeholder());
}

#[tokio::test]
async fn test_malformed_export_is_placeholder_and_batch_continues() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_export(&server, "good", json!([{"title": "Good"}])).await;
    mount_export(&server, "scalar", json!(["not a record"])).await;
    mount_export_raw(&server, "broken", json!([200, "text/plain", "{not json"])).await;
    mount_export(&server, "good2", json!([{"title": "Good Too"}])).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("@good @scalar @broken @good2");
    let records = resolve(&client, &identifiers).await.unwrap();

    assert!(records["@scalar"].is_placeholder());
    assert!(records["@broken"].is_placeholder());
    let mode = OutputMode::select(&["title"], false);
    assert_eq!(
        render_records(&records, &mode, 78),
        "@good: Good\n@good2: Good Too\n"
    );
}

#[tokio::test]
async fn test_multiple_export_records_is_fatal() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_export(&server, "dup", json!([{"title": "A"}, {"title": "B"}])).await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("@dup");
    let err = resolve(&client, &identifiers).await.unwrap_err();
    assert!(
        matches!(err, ResolveError::MultipleRecords { count: 2, .. }),
        "expected MultipleRecords, got: {err:?}"
    );
}

#[tokio::test]
async fn test_citation_key_lookup_remote_error_is_fatal() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(rpc_error("database locked"))
        .mount(&server)
        .await;

    let client = RpcClient::new(&endpoint(&server)).unwrap();
    let identifiers = parse_identifiers("AAAA1111");
    let err = resolve(&client, &identifiers).await.unwrap_err();
    assert_eq!(err.to_string(), "BBT error: database locked");
}
