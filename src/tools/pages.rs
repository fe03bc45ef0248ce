//! Page and page-content tools.

use super::schema::{
    boolean, canvas_content, id, limit, object, parse_args, string, string_array, string_enum,
};
use super::{render, ToolFuture, ToolSpec};
use crate::client::CodaClient;
use crate::types::pages::{
    CreatePageRequest, DeletePageContentRequest, ListPagesQuery, PageContentQuery,
    UpdatePageRequest,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageArgs {
    doc_id: String,
    page_id_or_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPagesArgs {
    doc_id: String,
    #[serde(flatten)]
    query: ListPagesQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePageArgs {
    doc_id: String,
    #[serde(flatten)]
    params: CreatePageRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePageArgs {
    doc_id: String,
    page_id_or_name: String,
    #[serde(flatten)]
    params: UpdatePageRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageContentArgs {
    doc_id: String,
    page_id_or_name: String,
    #[serde(flatten)]
    query: PageContentQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePageContentArgs {
    doc_id: String,
    page_id_or_name: String,
    #[serde(default)]
    element_ids: Option<Vec<String>>,
}

pub fn tools() -> Vec<ToolSpec> {
    let doc_and_page = |page_desc: &str| {
        json!({
            "docId": id("Document ID"),
            "pageIdOrName": id(page_desc),
        })
    };

    vec![
        ToolSpec::new(
            "coda_list_pages",
            "List all pages in a Coda document.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "limit": limit(100, "Maximum number of pages to return"),
                }),
                &["docId"],
            ),
            list_pages,
        ),
        ToolSpec::new(
            "coda_get_page",
            "Get details of a specific page in a Coda document.",
            object(doc_and_page("Page ID or name"), &["docId", "pageIdOrName"]),
            get_page,
        ),
        ToolSpec::new(
            "coda_create_page",
            "Create a new page in a Coda document with optional initial content.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "name": id("Page name"),
                    "subtitle": string("Page subtitle"),
                    "iconName": string("Icon name for the page"),
                    "imageUrl": string("Header image URL"),
                    "parentPageIdOrName": string("Parent page ID or name for creating subpages"),
                    "pageContent": {
                        "type": "object",
                        "description": "Initial page content",
                        "properties": {
                            "type": string_enum(&["canvas"], "Content type (always \"canvas\")"),
                            "canvasContent": canvas_content("Canvas content"),
                        },
                        "required": ["canvasContent"],
                    },
                }),
                &["docId", "name"],
            ),
            create_page,
        ),
        ToolSpec::new(
            "coda_update_page",
            "Update an existing page in a Coda document. Can update metadata (name, subtitle, etc.) and/or append/replace content.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "pageIdOrName": id("Page ID or name to update"),
                    "name": string("New page name"),
                    "subtitle": string("New page subtitle"),
                    "iconName": string("New icon name"),
                    "imageUrl": string("New header image URL"),
                    "isHidden": boolean("Whether the page should be hidden"),
                    "contentUpdate": {
                        "type": "object",
                        "description": "Content to append, prepend, or replace",
                        "properties": {
                            "insertionMode": string_enum(
                                &["append", "prepend", "replace"],
                                "How to insert content: \"append\" to add to end, \"prepend\" to add to beginning, \"replace\" to replace all",
                            ),
                            "elementId": string("Canvas element ID where content should be inserted (optional)"),
                            "canvasContent": canvas_content("Canvas content to insert"),
                        },
                        "required": ["canvasContent"],
                    },
                }),
                &["docId", "pageIdOrName"],
            ),
            update_page,
        ),
        ToolSpec::new(
            "coda_delete_page",
            "Delete a page from a Coda document.",
            object(doc_and_page("Page ID or name to delete"), &["docId", "pageIdOrName"]),
            delete_page,
        ),
        ToolSpec::new(
            "coda_get_page_content",
            "Get a list of content elements from a page. Returns structured content items with their IDs, types, and content.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "pageIdOrName": id("Page ID or name"),
                    "limit": limit(500, "Maximum number of content items to return (1-500, default: 50)"),
                    "contentFormat": string_enum(&["plainText"], "The format to return content in (default: plainText)"),
                }),
                &["docId", "pageIdOrName"],
            ),
            get_page_content,
        ),
        ToolSpec::new(
            "coda_delete_page_content",
            "Delete content from a page. You can delete specific elements by providing their IDs, or delete all content from the page by omitting elementIds.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "pageIdOrName": id("Page ID or name"),
                    "elementIds": string_array(
                        None,
                        "IDs of specific elements to delete. If omitted or empty, all content will be deleted.",
                    ),
                }),
                &["docId", "pageIdOrName"],
            ),
            delete_page_content,
        ),
    ]
}

fn list_pages(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: ListPagesArgs = parse_args("coda_list_pages", args)?;
        debug!(doc_id = %args.doc_id, "listing pages");
        render(&client.list_pages(&args.doc_id, &args.query).await?)
    })
}

fn get_page(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: PageArgs = parse_args("coda_get_page", args)?;
        debug!(doc_id = %args.doc_id, page = %args.page_id_or_name, "getting page");
        render(&client.get_page(&args.doc_id, &args.page_id_or_name).await?)
    })
}

fn create_page(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CreatePageArgs = parse_args("coda_create_page", args)?;
        debug!(doc_id = %args.doc_id, name = %args.params.name, "creating page");
        render(&client.create_page(&args.doc_id, &args.params).await?)
    })
}

fn update_page(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpdatePageArgs = parse_args("coda_update_page", args)?;
        debug!(doc_id = %args.doc_id, page = %args.page_id_or_name, "updating page");
        let payload = client
            .update_page(&args.doc_id, &args.page_id_or_name, &args.params)
            .await?;
        render(&payload)
    })
}

fn delete_page(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: PageArgs = parse_args("coda_delete_page", args)?;
        debug!(doc_id = %args.doc_id, page = %args.page_id_or_name, "deleting page");
        client
            .delete_page(&args.doc_id, &args.page_id_or_name)
            .await?;
        Ok(format!("Successfully deleted page {}", args.page_id_or_name))
    })
}

fn get_page_content(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: PageContentArgs = parse_args("coda_get_page_content", args)?;
        debug!(doc_id = %args.doc_id, page = %args.page_id_or_name, "getting page content");
        let payload = client
            .get_page_content(&args.doc_id, &args.page_id_or_name, &args.query)
            .await?;
        render(&payload)
    })
}

fn delete_page_content(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: DeletePageContentArgs = parse_args("coda_delete_page_content", args)?;
        debug!(doc_id = %args.doc_id, page = %args.page_id_or_name, "deleting page content");

        let body = args.element_ids.clone().map(|element_ids| DeletePageContentRequest {
            element_ids: Some(element_ids),
        });
        client
            .delete_page_content(&args.doc_id, &args.page_id_or_name, body.as_ref())
            .await?;

        Ok(match args.element_ids.as_deref() {
            Some(ids) if !ids.is_empty() => format!(
                "Successfully deleted {} element(s) from page {}",
                ids.len(),
                args.page_id_or_name
            ),
            _ => format!(
                "Successfully deleted all content from page {}",
                args.page_id_or_name
            ),
        })
    })
}
