#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::Assessment;
use crate::domain::models::BackendBox;
use crate::domain::models::PromptTemplate;

pub struct HealthFlow {}

impl HealthFlow {
    /// Runs the three stage analysis over the given symptom text. Returns
    /// `None` without contacting the backend when the text is empty or
    /// whitespace only.
    ///
    /// The stages run strictly in sequence. The condition text from stage
    /// one feeds stages two and three unchanged, so both later stages always
    /// describe the same condition.
    pub async fn run(backend: &BackendBox, symptoms: &str) -> Result<Option<Assessment>> {
        if symptoms.trim().is_empty() {
            return Ok(None);
        }

        let conditions_prompt = PromptTemplate::conditions().render(&[("symptoms", symptoms)])?;
        let condition = backend.get_completion(&conditions_prompt).await?;
        tracing::debug!(stage = "conditions", "stage complete");

        let medications_prompt =
            PromptTemplate::medications().render(&[("condition", condition.as_str())])?;
        let medications = backend.get_completion(&medications_prompt).await?;
        tracing::debug!(stage = "medications", "stage complete");

        let nutrition_prompt =
            PromptTemplate::nutrition().render(&[("condition", condition.as_str())])?;
        let nutrition = backend.get_completion(&nutrition_prompt).await?;
        tracing::debug!(stage = "nutrition", "stage complete");

        return Ok(Some(Assessment {
            condition,
            medications,
            nutrition,
        }));
    }
}
