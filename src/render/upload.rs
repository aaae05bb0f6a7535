// src/render/upload.rs
//! Rendering of extraction replies: text, tables and structured info

use anyhow::Result;

use super::dom::{Node, Region};
use super::value::{cell_text, header_text, pretty_json};
use super::{render_error, View, EXTRACTED_DATA_ID, EXTRACTED_TABLES_ID, EXTRACTED_TEXT_ID};
use crate::types::{ExtractedTable, ServerReply, UploadResult};

pub const NO_TEXT: &str = "No text extracted.";
pub const NO_TABLES: &str = "No tables extracted.";

/// Output regions of the upload form
#[derive(Debug, Clone, PartialEq)]
pub struct UploadView {
    pub text: Region,
    pub tables: Region,
    pub info: Region,
}

impl Default for UploadView {
    fn default() -> Self {
        Self {
            text: Region::new(EXTRACTED_TEXT_ID),
            tables: Region::new(EXTRACTED_TABLES_ID),
            info: Region::new(EXTRACTED_DATA_ID),
        }
    }
}

impl View for UploadView {
    fn regions(&self) -> Vec<&Region> {
        vec![&self.text, &self.tables, &self.info]
    }

    fn clear(&mut self) {
        self.text.clear();
        self.tables.clear();
        self.info.clear();
    }

    fn error_region(&mut self) -> &mut Region {
        &mut self.info
    }
}

/// Render an extraction reply into `view`.
///
/// Tables are decoded before anything is touched; a malformed table returns
/// an error without partially rendering, and the caller's failure path
/// replaces the view with the error message.
pub fn render_upload(reply: &ServerReply<UploadResult>, view: &mut UploadView) -> Result<()> {
    let result = match reply {
        ServerReply::Failed { error } => {
            render_error(error, view);
            return Ok(());
        }
        ServerReply::Ok(result) => result,
    };

    let tables = result.decode_tables()?;

    view.clear();

    match result.extracted_text.as_deref() {
        Some(text) if !text.is_empty() => view.text.set_text(text),
        _ => view.text.set_text(NO_TEXT),
    }

    if tables.is_empty() {
        view.tables.set_text(NO_TABLES);
    } else {
        for table in &tables {
            view.tables.append(table_node(table));
        }
    }

    if let Some(info) = &result.extracted_info {
        view.info.append(Node::with_text("pre", pretty_json(info)));
    }

    Ok(())
}

/// One `<table>`: a header row from `columns`, then one row per `data` entry
pub fn table_node(table: &ExtractedTable) -> Node {
    let mut rows = Vec::with_capacity(table.data.len() + 1);

    rows.push(Node::element(
        "tr",
        table
            .columns
            .iter()
            .map(|column| Node::with_text("th", header_text(column)))
            .collect(),
    ));

    for row in &table.data {
        rows.push(Node::element(
            "tr",
            row.iter()
                .map(|cell| Node::with_text("td", cell_text(Some(cell))))
                .collect(),
        ));
    }

    Node::element("table", rows)
}
