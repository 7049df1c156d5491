pub mod gemini;
pub mod groq;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    /// Builds a client for the configured model, falling back to the
    /// backend's default model when none is set.
    pub fn get(name: BackendName) -> Result<BackendBox> {
        let mut model = Config::get(ConfigKey::Model);
        if model.is_empty() {
            model = name.default_model().to_string();
        }

        return BackendManager::get_with_model(name, &model);
    }

    pub fn get_with_model(name: BackendName, model: &str) -> Result<BackendBox> {
        if name == BackendName::Gemini {
            return Ok(Box::new(gemini::Gemini::with_model(model)));
        }

        if name == BackendName::Groq {
            return Ok(Box::new(groq::Groq::with_model(model)));
        }

        bail!(format!("No backend implemented for {name}"))
    }
}
