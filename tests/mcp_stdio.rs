//! Full stdio session: JSON-RPC lines in, JSON-RPC lines out.

mod common;

use coda_mcp::McpServer;
use common::MockCoda;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_session_lists_and_calls_tools() {
    let mut coda = MockCoda::new().await;
    let _mock = coda
        .json("GET", "/whoami", 200, r#"{"name":"Ada"}"#)
        .await;
    let server = Arc::new(McpServer::new(Arc::new(coda.registry())));

    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"coda_whoami"}}"#,
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"coda_get_doc","arguments":{}}}"#,
    ]
    .join("\n");

    let mut output = Vec::new();
    server
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("serve should finish at EOF");

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 4, "notification must not be answered");

    let by_id = |id: i64| {
        responses
            .iter()
            .find(|r| r["id"] == id)
            .unwrap_or_else(|| panic!("missing response {}", id))
    };

    assert_eq!(by_id(1)["result"]["serverInfo"]["name"], "coda-mcp-server");
    assert_eq!(by_id(2)["result"]["tools"].as_array().unwrap().len(), 23);

    let whoami = &by_id(3)["result"];
    assert!(whoami.get("isError").is_none());
    assert!(whoami["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("\"name\": \"Ada\""));

    let invalid = &by_id(4)["result"];
    assert_eq!(invalid["isError"], true);
    assert!(invalid["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Error: Validation error:"));
}
