//! Column tools.

use super::schema::{id, limit, object, parse_args};
use super::{render, ToolFuture, ToolSpec};
use crate::client::CodaClient;
use crate::types::tables::ListColumnsQuery;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListColumnsArgs {
    doc_id: String,
    table_id_or_name: String,
    #[serde(flatten)]
    query: ListColumnsQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnArgs {
    doc_id: String,
    table_id_or_name: String,
    column_id_or_name: String,
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "coda_list_columns",
            "List all columns in a Coda table.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "limit": limit(100, "Maximum number of columns to return"),
                }),
                &["docId", "tableIdOrName"],
            ),
            list_columns,
        ),
        ToolSpec::new(
            "coda_get_column",
            "Get details of a specific column in a Coda table, including formula and format information.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                    "columnIdOrName": id("Column ID or name"),
                }),
                &["docId", "tableIdOrName", "columnIdOrName"],
            ),
            get_column,
        ),
    ]
}

fn list_columns(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: ListColumnsArgs = parse_args("coda_list_columns", args)?;
        debug!(doc_id = %args.doc_id, table = %args.table_id_or_name, "listing columns");
        let payload = client
            .list_columns(&args.doc_id, &args.table_id_or_name, &args.query)
            .await?;
        render(&payload)
    })
}

fn get_column(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: ColumnArgs = parse_args("coda_get_column", args)?;
        debug!(
            doc_id = %args.doc_id,
            table = %args.table_id_or_name,
            column = %args.column_id_or_name,
            "getting column"
        );
        let payload = client
            .get_column(&args.doc_id, &args.table_id_or_name, &args.column_id_or_name)
            .await?;
        render(&payload)
    })
}
