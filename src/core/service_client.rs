// src/core/service_client.rs
//! HTTP client for the extraction service - multipart in, JSON out

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::config_manager::ServiceConfig;
use crate::utils::{content_type_for, truncate_for_log};

const FILE_FIELD: &str = "file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUME_FIELD: &str = "resume";

/// A file ready to be attached to a multipart body
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: content_type_for(&file_name),
            file_name,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::from_bytes(file_name, bytes))
    }

    fn into_part(self) -> Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.content_type)
            .context("Failed to create multipart")
    }
}

/// Body of the upload form: a single optional `file` field
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
}

impl UploadForm {
    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        if let Some(file) = self.file {
            form = form.part(FILE_FIELD, file.into_part()?);
        }
        Ok(form)
    }
}

/// Body of the analyze form: job description plus resume file
#[derive(Debug, Clone, Default)]
pub struct AnalyzeForm {
    pub job_description: String,
    pub resume: Option<FilePart>,
}

impl AnalyzeForm {
    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new().text(JOB_DESCRIPTION_FIELD, self.job_description);
        if let Some(resume) = self.resume {
            form = form.part(RESUME_FIELD, resume.into_part()?);
        }
        Ok(form)
    }
}

pub struct ExtractClient {
    client: reqwest::Client,
    base_url: String,
    upload_endpoint: String,
    analyze_endpoint: String,
}

impl ExtractClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_endpoint: config.upload_endpoint.clone(),
            analyze_endpoint: config.analyze_endpoint.clone(),
        })
    }

    /// Send a document to the extraction endpoint
    pub async fn upload(&self, form: UploadForm) -> Result<Value> {
        if form.file.is_none() {
            warn!("Submitting upload form without a file");
        }
        let body = form.into_multipart()?;
        self.post_multipart(&self.upload_endpoint, body).await
    }

    /// Send a job description and resume to the analysis endpoint
    pub async fn analyze(&self, form: AnalyzeForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.post_multipart(&self.analyze_endpoint, body).await
    }

    /// POST a multipart form and decode the JSON body.
    ///
    /// The body is decoded whatever the status, since the service reports
    /// failures as `{"error": ...}` alongside 4xx/5xx codes.
    pub async fn post_multipart(&self, endpoint: &str, form: Form) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);

        info!("Calling extraction service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        debug!("Raw service response: {}", truncate_for_log(&response_text, 500));

        serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Service returned a non-JSON response (status {}): {}",
                status,
                truncate_for_log(&response_text, 200)
            )
        })
    }
}
