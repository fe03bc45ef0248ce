//! Row tools. Mutations are queued upstream, so their output carries an
//! advisory note after the request id.

use super::schema::{
    boolean, cells, id, limit, object, parse_args, rows, string, string_array, string_enum,
};
use super::{render, render_with_note, ToolFuture, ToolSpec, ASYNC_NOTE, UPSERT_NOTE};
use crate::client::CodaClient;
use crate::types::rows::{
    Cell, DeleteRowsRequest, GetRowQuery, InsertRowsRequest, ListRowsQuery, RowData,
    UpdateRowRequest, UpsertRowsRequest,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const VALUE_FORMATS: &[&str] = &["simple", "simpleWithArrays", "rich"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRowsArgs {
    doc_id: String,
    table_id_or_name: String,
    #[serde(flatten)]
    query: ListRowsQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetRowArgs {
    doc_id: String,
    table_id_or_name: String,
    row_id_or_name: String,
    #[serde(flatten)]
    query: GetRowQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertRowsArgs {
    doc_id: String,
    table_id_or_name: String,
    #[serde(flatten)]
    params: InsertRowsRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertRowsArgs {
    doc_id: String,
    table_id_or_name: String,
    #[serde(flatten)]
    params: UpsertRowsRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRowArgs {
    doc_id: String,
    table_id_or_name: String,
    row_id_or_name: String,
    cells: Vec<Cell>,
    #[serde(default)]
    disable_parsing: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowArgs {
    doc_id: String,
    table_id_or_name: String,
    row_id_or_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRowsArgs {
    doc_id: String,
    table_id_or_name: String,
    #[serde(flatten)]
    params: DeleteRowsRequest,
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "coda_list_rows",
            "List rows in a Coda table with optional filtering and pagination.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "query": string("Filter query to narrow results"),
                    "limit": limit(500, "Maximum number of rows to return (default: 25, max: 500)"),
                    "pageToken": string("Pagination token from previous response"),
                    "useColumnNames": boolean("Use column names instead of IDs in response"),
                    "valueFormat": string_enum(VALUE_FORMATS, "Format for cell values"),
                    "visibleOnly": boolean("Only return visible rows"),
                }),
                &["docId", "tableIdOrName"],
            ),
            list_rows,
        ),
        ToolSpec::new(
            "coda_get_row",
            "Get a specific row from a Coda table by ID or name.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "rowIdOrName": id("Row ID or name"),
                    "useColumnNames": boolean("Use column names instead of IDs in response"),
                    "valueFormat": string_enum(VALUE_FORMATS, "Format for cell values"),
                }),
                &["docId", "tableIdOrName", "rowIdOrName"],
            ),
            get_row,
        ),
        ToolSpec::new(
            "coda_insert_rows",
            "Insert new rows into a Coda table. Only works with base tables, not views. Returns a request ID as the operation is asynchronous.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name (must be a base table, not a view)"),
                    "rows": rows("Array of rows to insert"),
                    "disableParsing": boolean("Disable automatic parsing of cell values"),
                }),
                &["docId", "tableIdOrName", "rows"],
            ),
            insert_rows,
        ),
        ToolSpec::new(
            "coda_upsert_rows",
            "Insert or update rows in a Coda table based on key columns. If rows with matching key column values exist, they will be updated; otherwise new rows are inserted. WARNING: If multiple rows match, ALL will be updated.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name (must be a base table, not a view)"),
                    "rows": rows("Array of rows to insert or update"),
                    "keyColumns": string_array(Some(1), "Column IDs or names to use as keys for matching existing rows"),
                    "disableParsing": boolean("Disable automatic parsing of cell values"),
                }),
                &["docId", "tableIdOrName", "rows", "keyColumns"],
            ),
            upsert_rows,
        ),
        ToolSpec::new(
            "coda_update_row",
            "Update an existing row in a Coda table. Returns a request ID as the operation is asynchronous.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "rowIdOrName": id("Row ID or name to update"),
                    "cells": cells("Array of cells to update"),
                    "disableParsing": boolean("Disable automatic parsing of cell values"),
                }),
                &["docId", "tableIdOrName", "rowIdOrName", "cells"],
            ),
            update_row,
        ),
        ToolSpec::new(
            "coda_delete_row",
            "Delete a single row from a Coda table. Returns a request ID as the operation is asynchronous.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "rowIdOrName": id("Row ID or name to delete"),
                }),
                &["docId", "tableIdOrName", "rowIdOrName"],
            ),
            delete_row,
        ),
        ToolSpec::new(
            "coda_delete_rows",
            "Delete multiple rows from a Coda table by their IDs. Returns a request ID as the operation is asynchronous.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "rowIds": string_array(Some(1), "Array of row IDs to delete"),
                }),
                &["docId", "tableIdOrName", "rowIds"],
            ),
            delete_rows,
        ),
    ]
}

fn list_rows(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: ListRowsArgs = parse_args("coda_list_rows", args)?;
        debug!(doc_id = %args.doc_id, table = %args.table_id_or_name, "listing rows");
        let payload = client
            .list_rows(&args.doc_id, &args.table_id_or_name, &args.query)
            .await?;
        render(&payload)
    })
}

fn get_row(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: GetRowArgs = parse_args("coda_get_row", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            row = %args.row_id_or_name,
            "getting row"
        );
        let payload = client
            .get_row(
                &args.doc_id,
                &args.table_id_or_name,
                &args.row_id_or_name,
                &args.query,
            )
            .await?;
        render(&payload)
    })
}

fn insert_rows(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: InsertRowsArgs = parse_args("coda_insert_rows", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            rows = args.params.rows.len(),
            "inserting rows"
        );
        let payload = client
            .insert_rows(&args.doc_id, &args.table_id_or_name, &args.params)
            .await?;
        render_with_note(&payload, ASYNC_NOTE)
    })
}

fn upsert_rows(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpsertRowsArgs = parse_args("coda_upsert_rows", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            rows = args.params.rows.len(),
            key_columns = ?args.params.key_columns,
            "upserting rows"
        );
        let payload = client
            .upsert_rows(&args.doc_id, &args.table_id_or_name, &args.params)
            .await?;
        render_with_note(&payload, UPSERT_NOTE)
    })
}

fn update_row(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpdateRowArgs = parse_args("coda_update_row", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            row = %args.row_id_or_name,
            "updating row"
        );
        let params = UpdateRowRequest {
            row: RowData { cells: args.cells },
            disable_parsing: args.disable_parsing,
        };
        let payload = client
            .update_row(
                &args.doc_id,
                &args.table_id_or_name,
                &args.row_id_or_name,
                &params,
            )
            .await?;
        render_with_note(&payload, ASYNC_NOTE)
    })
}

fn delete_row(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: RowArgs = parse_args("coda_delete_row", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            row = %args.row_id_or_name,
            "deleting row"
        );
        let payload = client
            .delete_row(&args.doc_id, &args.table_id_or_name, &args.row_id_or_name)
            .await?;
        render_with_note(&payload, ASYNC_NOTE)
    })
}

fn delete_rows(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: DeleteRowsArgs = parse_args("coda_delete_rows", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            rows = args.params.row_ids.len(),
            "deleting rows"
        );
        let payload = client
            .delete_rows(&args.doc_id, &args.table_id_or_name, &args.params)
            .await?;
        render_with_note(&payload, ASYNC_NOTE)
    })
}
