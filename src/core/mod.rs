// src/core/mod.rs
//! Core services: transport, submission, configuration and file output

pub mod config_manager;
pub mod fs_ops;
pub mod service_client;
pub mod submission;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::{AnalyzeForm, ExtractClient, FilePart, UploadForm};
pub use submission::{FormSlot, SubmitOutcome, Submitter};
