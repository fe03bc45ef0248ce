//! Account and document tools.

use super::schema::{boolean, id, limit, object, parse_args, string};
use super::{render, ToolFuture, ToolSpec};
use crate::client::CodaClient;
use crate::types::docs::{CreateDocRequest, ListDocsQuery};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocArgs {
    doc_id: String,
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "coda_whoami",
            "Get information about the user the API token belongs to. Useful to verify connectivity.",
            object(json!({}), &[]),
            whoami,
        ),
        ToolSpec::new(
            "coda_list_docs",
            "List all accessible Coda documents. Supports filtering by ownership and search query.",
            object(
                json!({
                    "isOwner": boolean("Filter for documents owned by the user"),
                    "query": string("Search query to filter documents"),
                    "sourceDoc": string("Only return docs copied from this source doc ID"),
                    "limit": limit(100, "Maximum number of documents to return (default: 25, max: 100)"),
                }),
                &[],
            ),
            list_docs,
        ),
        ToolSpec::new(
            "coda_get_doc",
            "Get details of a specific Coda document by ID.",
            object(json!({ "docId": id("Document ID or URL") }), &["docId"]),
            get_doc,
        ),
        ToolSpec::new(
            "coda_create_doc",
            "Create a new Coda document. Requires Doc Maker permissions.",
            object(
                json!({
                    "title": id("Title for the new document"),
                    "sourceDoc": string("Optional source document ID to copy from"),
                    "timezone": string("Timezone for the document (e.g., \"America/Los_Angeles\")"),
                    "folderId": string("Parent folder ID"),
                }),
                &["title"],
            ),
            create_doc,
        ),
        ToolSpec::new(
            "coda_delete_doc",
            "Delete a Coda document (moves to trash).",
            object(json!({ "docId": id("Document ID to delete") }), &["docId"]),
            delete_doc,
        ),
    ]
}

fn whoami(client: &CodaClient, _args: Value) -> ToolFuture<'_> {
    Box::pin(async move { render(&client.whoami().await?) })
}

fn list_docs(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListDocsQuery = parse_args("coda_list_docs", args)?;
        debug!(?query, "listing docs");
        render(&client.list_docs(&query).await?)
    })
}

fn get_doc(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: DocArgs = parse_args("coda_get_doc", args)?;
        debug!(doc_id = %args.doc_id, "getting doc");
        render(&client.get_doc(&args.doc_id).await?)
    })
}

fn create_doc(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let params: CreateDocRequest = parse_args("coda_create_doc", args)?;
        debug!(title = %params.title, "creating doc");
        render(&client.create_doc(&params).await?)
    })
}

fn delete_doc(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: DocArgs = parse_args("coda_delete_doc", args)?;
        debug!(doc_id = %args.doc_id, "deleting doc");
        client.delete_doc(&args.doc_id).await?;
        Ok(format!("Successfully deleted document {}", args.doc_id))
    })
}
