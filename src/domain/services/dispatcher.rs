#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;

use anyhow::Result;

use super::HealthFlow;
use crate::domain::models::AnalysisOutcome;
use crate::domain::models::BackendBox;
use crate::domain::models::FaultKind;
use crate::domain::models::Session;

pub struct Dispatcher {}

impl Dispatcher {
    /// Runs the analysis flow for one symptom input and records the result in
    /// the session on success.
    ///
    /// When the API rejects the selected model and the backend supports model
    /// fallback, the full flow is re-run from scratch against each remaining
    /// model in catalog order. The first model to finish all three stages
    /// wins. If every alternate fails, the original error is surfaced, not
    /// the alternates' errors. Quota faults never start a retry.
    pub async fn run<F>(
        session: &mut Session,
        requested_model: &str,
        symptoms: &str,
        build_backend: F,
    ) -> Result<Option<AnalysisOutcome>>
    where
        F: Fn(&str) -> Result<BackendBox>,
    {
        let backend = build_backend(requested_model)?;

        let err = match HealthFlow::run(&backend, symptoms).await {
            Ok(None) => return Ok(None),
            Ok(Some(assessment)) => {
                session.record(&assessment);
                return Ok(Some(AnalysisOutcome {
                    assessment,
                    requested_model: requested_model.to_string(),
                    model_used: requested_model.to_string(),
                }));
            }
            Err(err) => err,
        };

        let kind = FaultKind::classify(&err);
        let backend_name = backend.name();
        if kind != FaultKind::ModelUnsupported || !backend_name.has_model_fallback() {
            tracing::error!(
                kind = kind.to_string(),
                model = requested_model,
                "analysis failed"
            );
            return Err(err);
        }

        tracing::warn!(
            model = requested_model,
            "model rejected by the API, trying alternates"
        );

        for alternate in backend_name.models() {
            if alternate == requested_model {
                continue;
            }

            let alt_backend = match build_backend(alternate) {
                Ok(alt_backend) => alt_backend,
                Err(_) => continue,
            };

            if let Ok(Some(assessment)) = HealthFlow::run(&alt_backend, symptoms).await {
                tracing::info!(model = alternate, "alternate model succeeded");
                session.record(&assessment);
                return Ok(Some(AnalysisOutcome {
                    assessment,
                    requested_model: requested_model.to_string(),
                    model_used: alternate.to_string(),
                }));
            }
        }

        return Err(err);
    }
}
