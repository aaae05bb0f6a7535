// src/render/mod.rs
//! Render pipeline - projects service replies into named output regions

pub mod analysis;
pub mod dom;
pub mod html;
pub mod upload;
pub mod value;

pub use analysis::{render_analysis, AnalysisView};
pub use dom::{Node, Region};
pub use upload::{render_upload, UploadView, NO_TABLES, NO_TEXT};

// Element ids shared with the page markup
pub const UPLOAD_FORM_ID: &str = "uploadForm";
pub const ANALYZE_FORM_ID: &str = "analyzeForm";
pub const EXTRACTED_TEXT_ID: &str = "extractedText";
pub const EXTRACTED_TABLES_ID: &str = "extractedTables";
pub const EXTRACTED_DATA_ID: &str = "extractedData";
pub const ANALYSIS_RESULT_ID: &str = "analysisResult";

/// A set of output regions a reply is rendered into
pub trait View {
    fn regions(&self) -> Vec<&Region>;

    /// Empty every region
    fn clear(&mut self);

    /// Region that receives error messages
    fn error_region(&mut self) -> &mut Region;

    fn to_text(&self) -> String {
        self.regions()
            .into_iter()
            .filter(|r| !r.is_empty())
            .map(Region::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_html(&self) -> String {
        self.regions()
            .into_iter()
            .map(Region::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn error_message(error: &str) -> String {
    format!("Error: {}", error)
}

/// Replace whatever the view shows with a single error message
pub fn render_error<V: View + ?Sized>(error: &str, view: &mut V) {
    view.clear();
    view.error_region().set_text(error_message(error));
}

/// Failure path for transport and decode errors
pub fn render_failure<V: View + ?Sized>(err: &anyhow::Error, view: &mut V) {
    render_error(&format!("{:#}", err), view);
}
