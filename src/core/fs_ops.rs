// src/core/fs_ops.rs
//! File output for rendered pages and exported tables

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::render::value::{cell_text, header_text};
use crate::types::ExtractedTable;
use crate::utils::table_file_path;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    /// Write each table as CSV into `dir`, header row first
    pub async fn export_tables_csv(dir: &Path, tables: &[ExtractedTable]) -> Result<Vec<PathBuf>> {
        Self::ensure_dir_exists(dir).await?;

        let mut written = Vec::with_capacity(tables.len());
        for (i, table) in tables.iter().enumerate() {
            let path = table_file_path(dir, i + 1);
            let content = table_to_csv(table)?;
            Self::write_file_safe(&path, &content).await?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Same cell conversion as the rendered table; ragged rows are kept as-is
pub fn table_to_csv(table: &ExtractedTable) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer
        .write_record(table.columns.iter().map(header_text))
        .context("Failed to write CSV header")?;

    for row in &table.data {
        writer
            .write_record(row.iter().map(|cell| cell_text(Some(cell))))
            .context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
