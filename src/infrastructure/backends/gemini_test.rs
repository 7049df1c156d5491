use anyhow::Result;

use super::Candidate;
use super::CandidateContent;
use super::CandidatePart;
use super::CompletionResponse;
use super::Gemini;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::FaultKind;
use crate::infrastructure::backends::BackendManager;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models")
        .match_header("x-goog-api-key", "abc")
        .with_status(200)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_successfully_health_checks_with_official_api() {
    let token = match std::env::var("CAREPLAN_GEMINI_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            println!("There is no token in environment defined, skipping test");
            return;
        }
    };
    let backend = Gemini {
        url: "https://generativelanguage.googleapis.com".to_string(),
        token,
        model: "gemini-2.5-flash".to_string(),
        timeout: "500".to_string(),
    };

    let res = backend.health_check().await;
    assert!(res.is_ok());
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models")
        .with_status(500)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let backend = Gemini {
        url: "http://localhost:9999".to_string(),
        token: "".to_string(),
        model: "gemini-2.5-flash".to_string(),
        timeout: "200".to_string(),
    };

    let res = backend.health_check().await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        candidates: vec![Candidate {
            content: CandidateContent {
                parts: vec![
                    CandidatePart {
                        text: "Hello ".to_string(),
                    },
                    CandidatePart {
                        text: "World".to_string(),
                    },
                ],
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .match_header("x-goog-api-key", "abc")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"generationConfig":{"temperature":0.8}}"#.to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.get_completion("Say hi to the world").await?;

    mock.assert();
    assert_eq!(res, "Hello World");

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_the_raw_body() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .with_status(200)
        .with_body("plain text answer")
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.get_completion("Say hi to the world").await?;

    mock.assert();
    assert_eq!(res, "plain text answer");

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_model_rejections_verbatim() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .with_status(404)
        .with_body("models/gemini-2.5-flash is not found for API version v1beta")
        .create();

    let backend = Gemini::with_url(server.url());
    let err = backend
        .get_completion("Say hi to the world")
        .await
        .unwrap_err();

    mock.assert();
    assert!(err.to_string().contains("404"));
    assert!(err.to_string().contains("not found for API version"));
    assert_eq!(FaultKind::classify(&err), FaultKind::ModelUnsupported);
}

#[tokio::test]
async fn it_surfaces_quota_faults_verbatim() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .with_status(429)
        .with_body("RESOURCE_EXHAUSTED: quota exceeded")
        .create();

    let backend = Gemini::with_url(server.url());
    let err = backend
        .get_completion("Say hi to the world")
        .await
        .unwrap_err();

    mock.assert();
    assert_eq!(FaultKind::classify(&err), FaultKind::QuotaExceeded);
}

#[test]
fn it_is_built_by_the_backend_manager_for_every_catalog_model() {
    for model in BackendName::Gemini.models() {
        let backend = BackendManager::get_with_model(BackendName::Gemini, model).unwrap();
        assert_eq!(backend.name(), BackendName::Gemini);
    }
}
