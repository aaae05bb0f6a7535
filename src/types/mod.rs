pub mod response;

pub use response::{AnalysisResult, ExtractedTable, ServerReply, UploadResult};
