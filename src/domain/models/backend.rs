#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Sampling temperature sent with every completion request, for both
/// backends.
pub const SAMPLING_TEMPERATURE: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Gemini,
    Groq,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }

    /// Label shown in the banner and in user facing notices.
    pub fn label(&self) -> &'static str {
        match self {
            BackendName::Gemini => return "Gemini (Google)",
            BackendName::Groq => return "Llama (Groq)",
        }
    }

    /// Hosted model identifiers accepted by the backend. The first entry is
    /// the default.
    pub fn models(&self) -> Vec<&'static str> {
        match self {
            BackendName::Gemini => return vec!["gemini-2.5-flash", "gemini-2.5-pro"],
            BackendName::Groq => return vec!["llama-3.1-8b-instant", "llama-3.1-70b-versatile"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        return self.models()[0];
    }

    /// Gemini is the only backend that rotates to an alternate model when the
    /// selected one is rejected.
    pub fn has_model_fallback(&self) -> bool {
        return *self == BackendName::Gemini;
    }
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single prompt to the backend and returns the completed
    /// response text once generation has finished.
    async fn get_completion(&self, prompt: &str) -> Result<String>;
}
