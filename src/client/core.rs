use crate::client::response::{classify_response, ApiPayload};
use crate::resilience::rate_limiter::{RateLimiter, RequestClass};
use crate::transport::{query_pairs, HttpTransport, PendingRequest};
use crate::types::docs::{CreateDocRequest, ListDocsQuery};
use crate::types::pages::{
    CreatePageRequest, DeletePageContentRequest, ListPagesQuery, PageContentQuery,
    UpdatePageRequest,
};
use crate::types::rows::{
    DeleteRowsRequest, GetRowQuery, InsertRowsRequest, ListRowsQuery, UpdateRowRequest,
    UpsertRowsRequest,
};
use crate::types::tables::{CreateTableRequest, ListColumnsQuery, ListTablesQuery};
use crate::{Error, Result};
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Rate-limited client for the Coda REST API.
///
/// Every call takes a slot from the shared [`RateLimiter`] (reads and writes
/// are counted separately), sends one request and classifies the response.
/// No retries are performed.
pub struct CodaClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) rate_limiter: Arc<RateLimiter>,
}

fn serialize<T: Serialize>(params: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(params)?)
}

impl CodaClient {
    /// Create a client with default settings.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        crate::client::builder::CodaClientBuilder::new(api_token).build()
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Acquire a slot for the request's class, send it and classify the response.
    pub async fn request(&self, request: PendingRequest) -> Result<ApiPayload> {
        let class = RequestClass::from_method(&request.method);
        self.rate_limiter.acquire(class).await;

        debug!(
            method = %request.method,
            path = %request.path(),
            class = class.as_str(),
            "sending coda request"
        );
        let started = Instant::now();
        let response = self.transport.execute(&request).await?;
        let status = response.status();
        let result = classify_response(response).await;

        match &result {
            Ok(_) => debug!(
                request = %request,
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "coda request succeeded"
            ),
            Err(e) => debug!(
                request = %request,
                status = status.as_u16(),
                error = %e,
                "coda request failed"
            ),
        }
        result
    }

    async fn get<T: Serialize>(&self, segments: Vec<String>, query: &T) -> Result<ApiPayload> {
        let query = query_pairs(&serialize(query)?);
        self.request(PendingRequest::get(segments).with_query(query))
            .await
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        segments: Vec<String>,
        body: Option<&T>,
    ) -> Result<ApiPayload> {
        let mut request = PendingRequest::new(method, segments);
        if let Some(body) = body {
            request = request.with_body(serialize(body)?);
        }
        self.request(request).await
    }

    // ========== Account ==========

    /// Identify the token owner; doubles as a connectivity check.
    pub async fn whoami(&self) -> Result<ApiPayload> {
        self.request(PendingRequest::get(["whoami"])).await
    }

    // ========== Docs ==========

    pub async fn list_docs(&self, query: &ListDocsQuery) -> Result<ApiPayload> {
        self.get(path(["docs"]), query).await
    }

    pub async fn get_doc(&self, doc_id: &str) -> Result<ApiPayload> {
        self.request(PendingRequest::get(["docs", doc_id])).await
    }

    pub async fn create_doc(&self, params: &CreateDocRequest) -> Result<ApiPayload> {
        self.send(Method::POST, path(["docs"]), Some(params)).await
    }

    pub async fn delete_doc(&self, doc_id: &str) -> Result<ApiPayload> {
        self.request(PendingRequest::new(Method::DELETE, ["docs", doc_id]))
            .await
    }

    // ========== Pages ==========

    pub async fn list_pages(&self, doc_id: &str, query: &ListPagesQuery) -> Result<ApiPayload> {
        self.get(path(["docs", doc_id, "pages"]), query).await
    }

    pub async fn get_page(&self, doc_id: &str, page_id_or_name: &str) -> Result<ApiPayload> {
        self.request(PendingRequest::get(["docs", doc_id, "pages", page_id_or_name]))
            .await
    }

    pub async fn create_page(&self, doc_id: &str, params: &CreatePageRequest) -> Result<ApiPayload> {
        self.send(Method::POST, path(["docs", doc_id, "pages"]), Some(params))
            .await
    }

    pub async fn update_page(
        &self,
        doc_id: &str,
        page_id_or_name: &str,
        params: &UpdatePageRequest,
    ) -> Result<ApiPayload> {
        self.send(
            Method::PUT,
            path(["docs", doc_id, "pages", page_id_or_name]),
            Some(params),
        )
        .await
    }

    pub async fn delete_page(&self, doc_id: &str, page_id_or_name: &str) -> Result<ApiPayload> {
        self.request(PendingRequest::new(
            Method::DELETE,
            ["docs", doc_id, "pages", page_id_or_name],
        ))
        .await
    }

    pub async fn get_page_content(
        &self,
        doc_id: &str,
        page_id_or_name: &str,
        query: &PageContentQuery,
    ) -> Result<ApiPayload> {
        self.get(path(["docs", doc_id, "pages", page_id_or_name, "content"]), query)
            .await
    }

    /// Delete the given canvas elements, or all page content when `params` is `None`.
    pub async fn delete_page_content(
        &self,
        doc_id: &str,
        page_id_or_name: &str,
        params: Option<&DeletePageContentRequest>,
    ) -> Result<ApiPayload> {
        self.send(
            Method::DELETE,
            path(["docs", doc_id, "pages", page_id_or_name, "content"]),
            params,
        )
        .await
    }

    // ========== Tables ==========

    pub async fn list_tables(&self, doc_id: &str, query: &ListTablesQuery) -> Result<ApiPayload> {
        self.get(path(["docs", doc_id, "tables"]), query).await
    }

    pub async fn get_table(&self, doc_id: &str, table_id_or_name: &str) -> Result<ApiPayload> {
        self.request(PendingRequest::get(["docs", doc_id, "tables", table_id_or_name]))
            .await
    }

    /// Upstream only supports this in limited contexts; not exposed as a tool.
    pub async fn create_table(
        &self,
        doc_id: &str,
        params: &CreateTableRequest,
    ) -> Result<ApiPayload> {
        self.send(Method::POST, path(["docs", doc_id, "tables"]), Some(params))
            .await
    }

    // ========== Columns ==========

    pub async fn list_columns(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        query: &ListColumnsQuery,
    ) -> Result<ApiPayload> {
        self.get(
            path(["docs", doc_id, "tables", table_id_or_name, "columns"]),
            query,
        )
        .await
    }

    pub async fn get_column(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        column_id_or_name: &str,
    ) -> Result<ApiPayload> {
        self.request(PendingRequest::get([
            "docs",
            doc_id,
            "tables",
            table_id_or_name,
            "columns",
            column_id_or_name,
        ]))
        .await
    }

    // ========== Rows ==========

    pub async fn list_rows(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        query: &ListRowsQuery,
    ) -> Result<ApiPayload> {
        self.get(path(["docs", doc_id, "tables", table_id_or_name, "rows"]), query)
            .await
    }

    pub async fn get_row(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        row_id_or_name: &str,
        query: &GetRowQuery,
    ) -> Result<ApiPayload> {
        self.get(
            path(["docs", doc_id, "tables", table_id_or_name, "rows", row_id_or_name]),
            query,
        )
        .await
    }

    pub async fn insert_rows(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        params: &InsertRowsRequest,
    ) -> Result<ApiPayload> {
        self.send(
            Method::POST,
            path(["docs", doc_id, "tables", table_id_or_name, "rows"]),
            Some(params),
        )
        .await
    }

    /// Insert-or-update keyed on `key_columns`. Every existing row matching
    /// the key values is updated, not just the first.
    pub async fn upsert_rows(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        params: &UpsertRowsRequest,
    ) -> Result<ApiPayload> {
        // Without key columns Coda silently treats the call as a plain insert.
        if params.key_columns.is_empty() {
            return Err(Error::validation("upsert requires at least one key column"));
        }
        self.send(
            Method::POST,
            path(["docs", doc_id, "tables", table_id_or_name, "rows"]),
            Some(params),
        )
        .await
    }

    pub async fn update_row(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        row_id_or_name: &str,
        params: &UpdateRowRequest,
    ) -> Result<ApiPayload> {
        self.send(
            Method::PUT,
            path(["docs", doc_id, "tables", table_id_or_name, "rows", row_id_or_name]),
            Some(params),
        )
        .await
    }

    pub async fn delete_row(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        row_id_or_name: &str,
    ) -> Result<ApiPayload> {
        self.request(PendingRequest::new(
            Method::DELETE,
            ["docs", doc_id, "tables", table_id_or_name, "rows", row_id_or_name],
        ))
        .await
    }

    pub async fn delete_rows(
        &self,
        doc_id: &str,
        table_id_or_name: &str,
        params: &DeleteRowsRequest,
    ) -> Result<ApiPayload> {
        self.send(
            Method::DELETE,
            path(["docs", doc_id, "tables", table_id_or_name, "rows"]),
            Some(params),
        )
        .await
    }
}

fn path<const N: usize>(segments: [&str; N]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}
