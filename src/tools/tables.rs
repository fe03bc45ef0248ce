//! Table tools.

use super::schema::{id, limit, object, parse_args, string_array};
use super::{render, ToolFuture, ToolSpec};
use crate::client::CodaClient;
use crate::types::tables::ListTablesQuery;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTablesArgs {
    doc_id: String,
    #[serde(flatten)]
    query: ListTablesQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableArgs {
    doc_id: String,
    table_id_or_name: String,
}

pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "coda_list_tables",
            "List all tables and views in a Coda document.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableTypes": string_array(None, "Filter by table types (e.g., [\"table\", \"view\"])"),
                    "limit": limit(100, "Maximum number of tables to return"),
                }),
                &["docId"],
            ),
            list_tables,
        ),
        ToolSpec::new(
            "coda_get_table",
            "Get details of a specific table in a Coda document.",
            object(
                json!({
                    "docId": id("Document ID"),
                    "tableIdOrName": id("Table ID or name"),
                }),
                &["docId", "tableIdOrName"],
            ),
            get_table,
        ),
    ]
}

fn list_tables(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: ListTablesArgs = parse_args("coda_list_tables", args)?;
        debug!(doc_id = %args.doc_id, "listing tables");
        render(&client.list_tables(&args.doc_id, &args.query).await?)
    })
}

fn get_table(client: &CodaClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: TableArgs = parse_args("coda_get_table", args)?;
        debug!(doc_id = %args.doc_id, table = %args.table_id_or_name, "getting table");
        render(&client.get_table(&args.doc_id, &args.table_id_or_name).await?)
    })
}
