//! Mock Coda API fixture shared by the integration tests.

#![allow(dead_code)]

use coda_mcp::{CodaClient, CodaClientBuilder, ToolRegistry};
use mockito::{Mock, Server, ServerGuard};
use std::sync::Arc;

pub const TOKEN: &str = "test-token";

/// Owns a mock server and hands out clients pointed at it.
pub struct MockCoda {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockCoda {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn client(&self) -> CodaClient {
        CodaClientBuilder::new(TOKEN)
            .base_url(&self.base_url)
            .build()
            .expect("client should build against mock server")
    }

    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::new(Arc::new(self.client())).expect("tools should register")
    }

    /// Authenticated JSON response for `method path`.
    pub async fn json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// 202 Accepted carrying a request id header and no body.
    pub async fn accepted(&mut self, method: &str, path: &str, request_id: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(202)
            .with_header("x-request-id", request_id)
            .create_async()
            .await
    }
}
