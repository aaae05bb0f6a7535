// src/core/submission.rs
//! Unified submit-and-render routine with per-form stale response tracking

use anyhow::Result;
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::service_client::{AnalyzeForm, ExtractClient, UploadForm};
use crate::render::{render_analysis, render_failure, render_upload, AnalysisView, UploadView, View};
use crate::render::{ANALYZE_FORM_ID, UPLOAD_FORM_ID};
use crate::types::{AnalysisResult, ServerReply, UploadResult};

/// What happened to one submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The reply was rendered; carries the raw body
    Rendered(Value),
    /// The failure message was rendered
    Failed(String),
    /// A newer submission for the same form was issued; nothing rendered
    Stale,
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered(_))
    }
}

/// One form's output view plus the sequence number of its latest request
pub struct FormSlot<V> {
    name: &'static str,
    issued: AtomicU64,
    view: Mutex<V>,
}

impl<V: View> FormSlot<V> {
    pub fn new(name: &'static str, view: V) -> Self {
        Self {
            name,
            issued: AtomicU64::new(0),
            view: Mutex::new(view),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock().await
    }

    fn issue_ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket
    }

    /// Await `request` and render its outcome into this slot's view.
    ///
    /// Exactly one of `render` or the failure renderer runs, unless a newer
    /// submission was issued in the meantime, in which case the response is dropped.
    pub async fn submit_and_render<F, R>(&self, request: F, render: R) -> SubmitOutcome
    where
        F: Future<Output = Result<Value>>,
        R: FnOnce(&Value, &mut V) -> Result<()>,
    {
        let ticket = self.issue_ticket();
        let request_id = Uuid::new_v4();
        let span = info_span!("submission", form = self.name(), %request_id, ticket);

        async move {
            info!("Submitting form");
            let response = request.await;

            let mut view = self.view.lock().await;
            if !self.is_latest(ticket) {
                debug!("Discarding stale response");
                return SubmitOutcome::Stale;
            }

            let rendered = response.and_then(|value| render(&value, &mut *view).map(|_| value));

            match rendered {
                Ok(value) => {
                    info!("Response rendered");
                    SubmitOutcome::Rendered(value)
                }
                Err(err) => {
                    warn!("Submission failed: {:#}", err);
                    render_failure(&err, &mut *view);
                    SubmitOutcome::Failed(format!("{:#}", err))
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Both forms of the page, wired to one service client
pub struct Submitter {
    client: ExtractClient,
    upload: FormSlot<UploadView>,
    analysis: FormSlot<AnalysisView>,
}

impl Submitter {
    pub fn new(client: ExtractClient) -> Self {
        Self {
            client,
            upload: FormSlot::new(UPLOAD_FORM_ID, UploadView::default()),
            analysis: FormSlot::new(ANALYZE_FORM_ID, AnalysisView::default()),
        }
    }

    pub fn upload_slot(&self) -> &FormSlot<UploadView> {
        &self.upload
    }

    pub fn analysis_slot(&self) -> &FormSlot<AnalysisView> {
        &self.analysis
    }

    pub async fn submit_upload(&self, form: UploadForm) -> SubmitOutcome {
        self.upload
            .submit_and_render(self.client.upload(form), |value, view| {
                let reply = ServerReply::<UploadResult>::from_value(value.clone())?;
                render_upload(&reply, view)
            })
            .await
    }

    pub async fn submit_analysis(&self, form: AnalyzeForm) -> SubmitOutcome {
        self.analysis
            .submit_and_render(self.client.analyze(form), |value, view| {
                let reply = ServerReply::<AnalysisResult>::from_value(value.clone())?;
                render_analysis(&reply, view);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_manager::ServiceConfig;
    use serde_json::json;

    #[tokio::test]
    async fn test_transport_failure_is_rendered() {
        let slot = FormSlot::new("uploadForm", UploadView::default());
        let outcome = slot
            .submit_and_render(async { Err(anyhow::anyhow!("connection refused")) }, |_, _| Ok(()))
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed("connection refused".to_string()));
        let view = slot.view().await;
        assert_eq!(view.info.text_content(), "Error: connection refused");
        assert!(view.text.is_empty());
    }

    #[tokio::test]
    async fn test_renderer_error_uses_failure_path() {
        let slot = FormSlot::new("uploadForm", UploadView::default());
        let outcome = slot
            .submit_and_render(async { Ok(json!({"extracted_tables": ["nope"]})) }, |value, view| {
                let reply = ServerReply::<UploadResult>::from_value(value.clone())?;
                render_upload(&reply, view)
            })
            .await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(slot.view().await.info.text_content().starts_with("Error: "));
    }

    #[test]
    fn test_submitter_slots_are_named_after_forms() {
        let client = ExtractClient::new(&ServiceConfig::default()).unwrap();
        let submitter = Submitter::new(client);
        assert_eq!(submitter.upload_slot().name(), "uploadForm");
        assert_eq!(submitter.analysis_slot().name(), "analyzeForm");
    }

    #[tokio::test]
    async fn test_older_response_is_discarded() {
        let slot = FormSlot::new("analyzeForm", AnalysisView::default());
        let (release_first, first_gate) = tokio::sync::oneshot::channel::<()>();

        let first = slot.submit_and_render(
            async move {
                let _ = first_gate.await;
                Ok(json!({"job_description": "first"}))
            },
            |value, view| {
                render_analysis(&ServerReply::from_value(value.clone())?, view);
                Ok(())
            },
        );
        let second = async {
            tokio::task::yield_now().await;
            let outcome = slot
                .submit_and_render(async { Ok(json!({"job_description": "second"})) }, |value, view| {
                    render_analysis(&ServerReply::from_value(value.clone())?, view);
                    Ok(())
                })
                .await;
            let _ = release_first.send(());
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, SubmitOutcome::Stale);
        assert!(second.is_rendered());
        assert_eq!(slot.view().await.result.text_content(), "Job Description: second");
    }
}
