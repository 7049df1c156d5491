use anyhow::Result;

use super::CompletionChoiceResponse;
use super::CompletionMessageResponse;
use super::CompletionResponse;
use super::Groq;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::FaultKind;
use crate::infrastructure::backends::BackendManager;

impl Groq {
    fn with_url(url: String) -> Groq {
        return Groq {
            url,
            token: "abc".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/openai/v1/models")
        .match_header("Authorization", "Bearer abc")
        .with_status(200)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/openai/v1/models")
        .with_status(500)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let backend = Groq {
        url: "http://localhost:9999".to_string(),
        token: "".to_string(),
        model: "llama-3.1-8b-instant".to_string(),
        timeout: "200".to_string(),
    };

    let res = backend.health_check().await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        choices: vec![CompletionChoiceResponse {
            message: CompletionMessageResponse {
                content: "Hello World".to_string(),
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_header("Authorization", "Bearer abc")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"model":"llama-3.1-8b-instant","temperature":0.8}"#.to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.get_completion("Say hi to the world").await?;

    mock.assert();
    assert_eq!(res, "Hello World");

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_the_raw_body() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(200)
        .with_body("plain text answer")
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.get_completion("Say hi to the world").await?;

    mock.assert();
    assert_eq!(res, "plain text answer");

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_quota_faults_verbatim() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(429)
        .with_body("rate limit reached for llama-3.1-8b-instant")
        .create();

    let backend = Groq::with_url(server.url());
    let err = backend
        .get_completion("Say hi to the world")
        .await
        .unwrap_err();

    mock.assert();
    assert!(err.to_string().contains("429"));
    assert_eq!(FaultKind::classify(&err), FaultKind::QuotaExceeded);
}

#[test]
fn it_is_built_by_the_backend_manager_for_every_catalog_model() {
    for model in BackendName::Groq.models() {
        let backend = BackendManager::get_with_model(BackendName::Groq, model).unwrap();
        assert_eq!(backend.name(), BackendName::Groq);
    }
}
