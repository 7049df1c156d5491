use anyhow::anyhow;

use super::*;

#[test]
fn it_lists_every_command_in_the_help_text() {
    let text = help_text();
    for command in vec![
        "/modellist",
        "/model",
        "/backend",
        "/history",
        "/quit",
        "/help",
    ] {
        assert!(text.contains(command), "missing {command}");
    }
}

#[test]
fn it_maps_backends_to_their_token_keys() {
    assert!(token_key(BackendName::Gemini) == ConfigKey::GeminiToken);
    assert!(token_key(BackendName::Groq) == ConfigKey::GroqToken);
}

#[test]
fn it_names_the_flag_for_each_missing_token() {
    assert!(missing_token_text(BackendName::Gemini).contains("--gemini-token"));
    assert!(missing_token_text(BackendName::Groq).contains("--groq-token"));
}

#[test]
fn it_points_gemini_quota_faults_at_the_groq_backend() {
    let err = anyhow!("Gemini request failed with status 429: RESOURCE_EXHAUSTED");
    let kind = FaultKind::classify(&err);

    let res = fault_notice(BackendName::Gemini, kind, &err);
    assert!(res.contains("Gemini API quota"));
    assert!(res.contains("/backend groq"));
}

#[test]
fn it_points_groq_quota_faults_at_billing() {
    let err = anyhow!("Groq request failed with status 429: rate limited");
    let kind = FaultKind::classify(&err);

    let res = fault_notice(BackendName::Groq, kind, &err);
    assert!(res.contains("Llama (Groq) quota"));
    assert!(res.contains("billing"));
}

#[test]
fn it_reports_the_underlying_error_for_other_faults() {
    let err = anyhow!("connection reset by peer");
    let kind = FaultKind::classify(&err);

    let res = fault_notice(BackendName::Gemini, kind, &err);
    assert_eq!(
        res,
        "An error occurred while generating results: connection reset by peer"
    );
}

#[test]
fn it_reports_the_underlying_error_for_unsupported_models_on_groq() {
    let err = anyhow!("Groq request failed with status 404: model not found");
    let kind = FaultKind::classify(&err);
    assert_eq!(kind, FaultKind::ModelUnsupported);

    let res = fault_notice(BackendName::Groq, kind, &err);
    assert!(res.starts_with("An error occurred while generating results:"));
}
