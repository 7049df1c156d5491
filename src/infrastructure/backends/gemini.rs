#[cfg(test)]
#[path = "gemini_test.rs"]
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ContentParts {
    Text(String),
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentParts>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    candidates: Vec<Candidate>,
}

pub struct Gemini {
    url: String,
    token: String,
    model: String,
    timeout: String,
}

impl Gemini {
    pub fn with_model(model: &str) -> Gemini {
        return Gemini {
            url: "https://generativelanguage.googleapis.com".to_string(),
            token: Config::get(ConfigKey::GeminiToken),
            model: model.to_string(),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        // The token goes in a header, never in the URL.
        let res = reqwest::Client::new()
            .get(format!("{url}/v1beta/models", url = self.url))
            .header("x-goog-api-key", &self.token)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: &str) -> Result<String> {
        let req = CompletionRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![ContentParts::Text(prompt.to_string())],
            }],
            generation_config: GenerationConfig {
                temperature: SAMPLING_TEMPERATURE,
            },
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent",
                url = self.url,
                model = self.model,
            ))
            .header("x-goog-api-key", &self.token)
            .json(&req)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        if status >= 400 {
            tracing::error!(
                status = status,
                "Failed to make completion request to Gemini"
            );
            bail!(format!(
                "Gemini request failed with status {status}: {body}"
            ));
        }

        // Unexpected response shapes fall back to the raw body.
        if let Ok(parsed) = serde_json::from_str::<CompletionResponse>(&body) {
            if let Some(candidate) = parsed.candidates.first() {
                let text = candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| return part.text.as_str())
                    .collect::<Vec<&str>>()
                    .join("");
                if !text.is_empty() {
                    return Ok(text);
                }
            }
        }

        return Ok(body);
    }
}
