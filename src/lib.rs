//! Client for a document extraction service: submits uploads and job-match
//! requests, then renders the JSON replies into named output regions.

pub mod cli;
pub mod core;
pub mod render;
pub mod types;
pub mod utils;

pub use crate::core::{ConfigManager, ExtractClient, SubmitOutcome, Submitter};
pub use crate::render::{AnalysisView, UploadView, View};
pub use crate::types::{AnalysisResult, ExtractedTable, ServerReply, UploadResult};
