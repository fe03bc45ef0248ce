//! Client behaviour against a mock Coda API.

mod common;

use coda_mcp::types::docs::ListDocsQuery;
use coda_mcp::types::pages::DeletePageContentRequest;
use coda_mcp::types::rows::{
    Cell, DeleteRowsRequest, GetRowQuery, InsertRowsRequest, ListRowsQuery, RowData,
    UpsertRowsRequest, ValueFormat,
};
use coda_mcp::{ApiError, ApiPayload, CodaClientBuilder, Error, RequestClass};
use common::{MockCoda, TOKEN};
use mockito::Matcher;
use serde_json::json;

fn row(column: &str, value: serde_json::Value) -> RowData {
    RowData {
        cells: vec![Cell {
            column: column.to_string(),
            value,
        }],
    }
}

#[tokio::test]
async fn test_whoami_sends_bearer_token() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .json("GET", "/whoami", 200, r#"{"name":"Ada","loginId":"ada@example.com"}"#)
        .await;

    let payload = coda.client().whoami().await.unwrap();
    mock.assert_async().await;
    assert_eq!(
        payload,
        ApiPayload::Json(json!({"name": "Ada", "loginId": "ada@example.com"}))
    );
}

#[tokio::test]
async fn test_list_docs_query_skips_unset_params() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("GET", "/docs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("isOwner".into(), "true".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let query = ListDocsQuery {
        is_owner: Some(true),
        limit: Some(10),
        ..Default::default()
    };
    let payload = coda.client().list_docs(&query).await.unwrap();
    mock.assert_async().await;
    assert_eq!(payload.into_value(), json!({"items": []}));
}

#[tokio::test]
async fn test_list_rows_query_params() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("GET", "/docs/d1/tables/Tasks/rows")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "Status:\"Done\"".into()),
            Matcher::UrlEncoded("useColumnNames".into(), "true".into()),
            Matcher::UrlEncoded("valueFormat".into(), "simpleWithArrays".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"items":[{"id":"i-1"}]}"#)
        .create_async()
        .await;

    let query = ListRowsQuery {
        query: Some("Status:\"Done\"".into()),
        use_column_names: Some(true),
        value_format: Some(ValueFormat::SimpleWithArrays),
        ..Default::default()
    };
    coda.client()
        .list_rows("d1", "Tasks", &query)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_insert_rows_returns_request_id() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("POST", "/docs/d1/tables/t1/rows")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "rows": [{"cells": [{"column": "Name", "value": "Alice"}]}]
        })))
        .with_status(202)
        .with_header("x-request-id", "abc123")
        .create_async()
        .await;

    let params = InsertRowsRequest {
        rows: vec![row("Name", json!("Alice"))],
        disable_parsing: None,
    };
    let payload = coda
        .client()
        .insert_rows("d1", "t1", &params)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(payload.request_id(), Some("abc123"));
    assert_eq!(payload.into_value(), json!({"requestId": "abc123"}));
}

#[tokio::test]
async fn test_upsert_sends_key_columns() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("POST", "/docs/d1/tables/t1/rows")
        .match_body(Matcher::PartialJson(json!({"keyColumns": ["Email"]})))
        .with_status(202)
        .with_header("x-request-id", "r-9")
        .create_async()
        .await;

    let params = UpsertRowsRequest {
        rows: vec![row("Email", json!("a@example.com"))],
        key_columns: vec!["Email".into()],
        disable_parsing: None,
    };
    coda.client()
        .upsert_rows("d1", "t1", &params)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upsert_without_key_columns_never_hits_network() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let params = UpsertRowsRequest {
        rows: vec![row("Email", json!("a@example.com"))],
        key_columns: vec![],
        disable_parsing: None,
    };
    let err = coda
        .client()
        .upsert_rows("d1", "t1", &params)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_page_no_content() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("DELETE", "/docs/d1/pages/p1")
        .with_status(204)
        .create_async()
        .await;

    let payload = coda.client().delete_page("d1", "p1").await.unwrap();
    mock.assert_async().await;
    assert!(payload.is_empty());
    assert_eq!(payload.into_value(), json!({}));
}

#[tokio::test]
async fn test_delete_page_content_body() {
    let mut coda = MockCoda::new().await;
    let with_ids = coda
        .server
        .mock("DELETE", "/docs/d1/pages/p1/content")
        .match_body(Matcher::Json(json!({"elementIds": ["e1", "e2"]})))
        .with_status(202)
        .create_async()
        .await;

    let params = DeletePageContentRequest {
        element_ids: Some(vec!["e1".into(), "e2".into()]),
    };
    coda.client()
        .delete_page_content("d1", "p1", Some(&params))
        .await
        .unwrap();
    with_ids.assert_async().await;
}

#[tokio::test]
async fn test_delete_rows_body() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("DELETE", "/docs/d1/tables/t1/rows")
        .match_body(Matcher::Json(json!({"rowIds": ["i-1", "i-2"]})))
        .with_status(202)
        .with_header("x-request-id", "del-1")
        .create_async()
        .await;

    let params = DeleteRowsRequest {
        row_ids: vec!["i-1".into(), "i-2".into()],
    };
    let payload = coda
        .client()
        .delete_rows("d1", "t1", &params)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(payload.request_id(), Some("del-1"));
}

#[tokio::test]
async fn test_not_found_message_from_body() {
    let mut coda = MockCoda::new().await;
    let _mock = coda.json("GET", "/docs/missing", 404, r#"{"message":"Doc not found"}"#)
        .await;

    let err = coda.client().get_doc("missing").await.unwrap_err();
    match err.as_api() {
        Some(ApiError::NotFound { message }) => assert_eq!(message, "Doc not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(err.to_string(), "Doc not found");
}

#[tokio::test]
async fn test_error_field_used_when_message_absent() {
    let mut coda = MockCoda::new().await;
    let _mock = coda.json("GET", "/docs/d1", 403, r#"{"error":"Forbidden for this token"}"#)
        .await;

    let err = coda.client().get_doc("d1").await.unwrap_err();
    assert!(matches!(err.as_api(), Some(ApiError::Permission { .. })));
    assert_eq!(err.to_string(), "Forbidden for this token");
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let mut coda = MockCoda::new().await;
    let _mock = coda
        .server
        .mock("GET", "/docs/d1")
        .with_status(429)
        .with_header("retry-after", "30")
        .with_body(r#"{"message":"Too many requests"}"#)
        .create_async()
        .await;

    let err = coda.client().get_doc("d1").await.unwrap_err();
    let api = err.as_api().expect("api error");
    assert_eq!(api.status(), 429);
    assert_eq!(api.retry_after(), Some(30));
    assert!(api.is_retryable());
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let mut coda = MockCoda::new().await;
    let _mock = coda
        .server
        .mock("GET", "/docs/d1")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = coda.client().get_doc("d1").await.unwrap_err();
    match err.as_api() {
        Some(ApiError::Server { status, message }) => {
            assert_eq!(*status, 503);
            assert_eq!(message, "HTTP 503: Service Unavailable");
        }
        other => panic!("expected Server, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_row_is_repeatable() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("GET", "/docs/d1/tables/t1/rows/r1")
        .with_status(200)
        .with_body(r#"{"id":"r1","values":{"c-1":"x"}}"#)
        .expect(2)
        .create_async()
        .await;

    let client = coda.client();
    let query = GetRowQuery::default();
    let first = client.get_row("d1", "t1", "r1", &query).await.unwrap();
    let second = client.get_row("d1", "t1", "r1", &query).await.unwrap();
    mock.assert_async().await;
    assert_eq!(first, second);

    let reads = client.rate_limiter().snapshot(RequestClass::Read).await;
    assert_eq!(reads.in_window, 2);
    let writes = client.rate_limiter().snapshot(RequestClass::Write).await;
    assert_eq!(writes.in_window, 0);
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let mut coda = MockCoda::new().await;
    let mock = coda
        .server
        .mock("GET", "/docs/d1/tables/My%20Table")
        .with_status(200)
        .with_body(r#"{"id":"grid-1"}"#)
        .create_async()
        .await;

    coda.client().get_table("d1", "My Table").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_network_failure_is_transport_error() {
    let client = CodaClientBuilder::new(TOKEN)
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();

    let err = client.get_doc("d1").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.to_string().starts_with("Network error:"));
}
