// src/render/analysis.rs
//! Rendering of job-match analysis replies

use super::dom::{Node, Region};
use super::value::{pretty_json, to_js_string};
use super::{render_error, View, ANALYSIS_RESULT_ID};
use crate::types::{AnalysisResult, ServerReply};

/// Output region of the analyze form
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub result: Region,
}

impl Default for AnalysisView {
    fn default() -> Self {
        Self {
            result: Region::new(ANALYSIS_RESULT_ID),
        }
    }
}

impl View for AnalysisView {
    fn regions(&self) -> Vec<&Region> {
        vec![&self.result]
    }

    fn clear(&mut self) {
        self.result.clear();
    }

    fn error_region(&mut self) -> &mut Region {
        &mut self.result
    }
}

pub fn render_analysis(reply: &ServerReply<AnalysisResult>, view: &mut AnalysisView) {
    let result = match reply {
        ServerReply::Failed { error } => {
            render_error(error, view);
            return;
        }
        ServerReply::Ok(result) => result,
    };

    view.clear();
    let region = &mut view.result;

    region.append(Node::with_text(
        "p",
        format!(
            "Job Description: {}",
            result.job_description.as_deref().unwrap_or_default()
        ),
    ));

    if let Some(info) = &result.extracted_info {
        region.append(Node::with_text("p", "Extracted Info:"));
        region.append(Node::with_text("pre", pretty_json(info)));
    }

    if let Some(percentage) = &result.match_percentage {
        region.append(Node::with_text(
            "p",
            format!("Match Percentage: {}%", to_js_string(percentage)),
        ));
    }

    if let Some(skills) = &result.matching_skills {
        region.append(Node::with_text("p", "Matching Skills:"));
        region.append(Node::with_text("pre", pretty_json(skills)));
    }
}
