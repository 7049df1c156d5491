#[cfg(test)]
#[path = "groq_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::SAMPLING_TEMPERATURE;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

pub struct Groq {
    url: String,
    token: String,
    model: String,
    timeout: String,
}

impl Groq {
    pub fn with_model(model: &str) -> Groq {
        return Groq {
            url: "https://api.groq.com".to_string(),
            token: Config::get(ConfigKey::GroqToken),
            model: model.to_string(),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for Groq {
    fn name(&self) -> BackendName {
        return BackendName::Groq;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Groq URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Groq token is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/openai/v1/models", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Groq is not reachable");
            bail!("Groq is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Groq health check failed");
            bail!("Groq health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: &str) -> Result<String> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: SAMPLING_TEMPERATURE,
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/openai/v1/chat/completions",
                url = self.url
            ))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        if status >= 400 {
            tracing::error!(status = status, "Failed to make completion request to Groq");
            bail!(format!("Groq request failed with status {status}: {body}"));
        }

        // Unexpected response shapes fall back to the raw body.
        if let Ok(parsed) = serde_json::from_str::<CompletionResponse>(&body) {
            if let Some(choice) = parsed.choices.first() {
                if !choice.message.content.is_empty() {
                    return Ok(choice.message.content.to_string());
                }
            }
        }

        return Ok(body);
    }
}
