use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::render::value::to_js_string;

// ===== Service Response Types =====

/// Reply of the extraction endpoint (`POST /upload`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub extracted_text: Option<String>,
    /// Each entry is a table encoded as a JSON string
    #[serde(default)]
    pub extracted_tables: Option<Vec<String>>,
    #[serde(default)]
    pub extracted_info: Option<Value>,
}

/// Reply of the analysis endpoint (`POST /analyze`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub extracted_info: Option<Value>,
    #[serde(default)]
    pub match_percentage: Option<Value>,
    #[serde(default)]
    pub matching_skills: Option<Value>,
}

/// A decoded table in pandas `orient="split"` layout.
///
/// Column labels are kept as raw JSON values since the extractor emits
/// integer labels for tables read out of PDFs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTable {
    pub columns: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Vec<Value>>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl ExtractedTable {
    /// Decode a stringified table
    pub fn parse(encoded: &str) -> Result<Self> {
        serde_json::from_str(encoded).with_context(|| {
            format!("Failed to decode extracted table: {}", crate::utils::truncate_for_log(encoded, 120))
        })
    }
}

impl UploadResult {
    /// Decode every stringified table, failing on the first malformed one
    pub fn decode_tables(&self) -> Result<Vec<ExtractedTable>> {
        self.extracted_tables
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, encoded)| {
                ExtractedTable::parse(encoded).with_context(|| format!("Table #{} is invalid", i + 1))
            })
            .collect()
    }
}

/// A service reply: either the server-reported error or the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerReply<T> {
    Failed { error: String },
    Ok(T),
}

impl<T: DeserializeOwned> ServerReply<T> {
    /// Decode a raw JSON body.
    ///
    /// Any non-null `error` member wins over every other field.
    pub fn from_value(value: Value) -> Result<Self> {
        if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
            return Ok(Self::Failed {
                error: to_js_string(error),
            });
        }

        let payload = serde_json::from_value(value).context("Failed to decode service response")?;
        Ok(Self::Ok(payload))
    }
}
