#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::io;
use std::io::IsTerminal;
use std::io::Write;

use anyhow::bail;
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Assessment;
use crate::domain::models::BackendName;
use crate::domain::models::FaultKind;
use crate::domain::models::HistoryCategory;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;
use crate::domain::services::Dispatcher;
use crate::infrastructure::backends::BackendManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /modellist (/ml) - Lists all available models from the backend.
- /model (/m) [MODEL_NAME,MODEL_INDEX] - Sets the specified model as the active model. You can pass either the model name, or the index from /modellist
- /backend (/b) [BACKEND_NAME] - Sets the specified backend as the active backend. You may be asked for the backend's API key.
- /history (/hist) - Prints the conversation history for each advice category.
- /quit /exit (/q) - Exit Careplan.
- /help (/h) - Provides this help menu.
        "#;

    return text.trim().to_string();
}

fn token_key(backend_name: BackendName) -> ConfigKey {
    match backend_name {
        BackendName::Gemini => return ConfigKey::GeminiToken,
        BackendName::Groq => return ConfigKey::GroqToken,
    }
}

fn missing_token_text(backend_name: BackendName) -> String {
    match backend_name {
        BackendName::Gemini => {
            return "Add your Gemini API key with --gemini-token or CAREPLAN_GEMINI_TOKEN to begin."
                .to_string();
        }
        BackendName::Groq => {
            return "Add your Groq API key with --groq-token or CAREPLAN_GROQ_TOKEN to use Llama models."
                .to_string();
        }
    }
}

/// Picks the user facing notice for a failed run. Quota faults get a
/// backend specific message, everything else reports the underlying error.
fn fault_notice(backend_name: BackendName, kind: FaultKind, err: &anyhow::Error) -> String {
    if kind == FaultKind::QuotaExceeded {
        match backend_name {
            BackendName::Gemini => {
                return "Your Gemini API quota appears to be exhausted or rate-limited. You can switch to the Llama (Groq) backend with /backend groq.".to_string();
            }
            BackendName::Groq => {
                return "Your Llama (Groq) quota appears to be exhausted or rate-limited. Check your Groq plan and billing, or try again later.".to_string();
            }
        }
    }

    return format!("An error occurred while generating results: {err}");
}

/// Prompts for the backend's API key when none is configured. Returns false
/// when no key can be collected, which halts the session.
fn ensure_token(backend_name: BackendName) -> Result<bool> {
    if !Config::get(token_key(backend_name)).is_empty() {
        return Ok(true);
    }

    if !io::stdin().is_terminal() {
        println!("{}", missing_token_text(backend_name));
        return Ok(false);
    }

    let label = match backend_name {
        BackendName::Gemini => "Gemini API Key",
        BackendName::Groq => "Groq API Key (for Llama)",
    };

    let token = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()?;

    if token.is_empty() {
        println!("{}", missing_token_text(backend_name));
        return Ok(false);
    }

    Config::set(token_key(backend_name), &token);
    return Ok(true);
}

fn print_banner(session: &Session, backend_name: BackendName, model: &str) {
    println!("{}", Paint::new("Health Care Assistant").underline().bold());
    println!("A focused assistant that summarizes likely conditions, first aid options, and supportive nutrition for your symptoms. Designed for rapid, structured review.");
    println!();
    println!(
        "Session: {}, Backend: {}, Model: {model}",
        session.id,
        backend_name.label()
    );
    println!(
        "{}",
        Paint::new("All outputs are generated by an AI model and may be incomplete or inaccurate. Always confirm findings, medications, and diet changes with a qualified health professional.").dimmed()
    );
    println!();
    println!("Describe the symptoms and relevant history, or type /help for commands.");
}

fn print_assessment(assessment: &Assessment) {
    println!();
    println!("{}", Paint::new("Structured assessment").underline().bold());
    println!();
    println!("{}", Paint::new("Possible conditions").bold());
    println!("{}", assessment.condition);
    println!();
    println!("{}", Paint::new("First aid medications").bold());
    println!("{}", assessment.medications);
    println!();
    println!("{}", Paint::new("Nutritional support").bold());
    println!("{}", assessment.nutrition);
}

fn print_history(session: &Session) {
    let res = HistoryCategory::iter()
        .map(|category| {
            let log = session.history(category);

            let mut body = "No history yet.".to_string();
            if !log.is_empty() {
                body = log.join("\n\n");
            }

            return format!("{}\n{body}", Paint::new(category.title()).bold());
        })
        .collect::<Vec<String>>()
        .join("\n\n");

    println!("\n{res}");
}

/// Runs the interactive session. Returns false when a required API key is
/// missing, true on a normal quit.
pub async fn start() -> Result<bool> {
    let backend_config = Config::get(ConfigKey::Backend);
    let parsed = BackendName::parse(backend_config.to_string());
    if parsed.is_none() {
        bail!(format!("No backend implemented for {backend_config}"));
    }

    let mut backend_name = parsed.unwrap();
    let mut model = Config::get(ConfigKey::Model);
    if model.is_empty() {
        model = backend_name.default_model().to_string();
        Config::set(ConfigKey::Model, &model);
    }

    if !ensure_token(backend_name)? {
        return Ok(false);
    }

    let mut session = Session::default();
    tracing::info!(
        session_id = session.id,
        started_at = session.started_at,
        backend = backend_name.to_string(),
        model,
        "session started"
    );

    print_banner(&session, backend_name, &model);

    let backend = BackendManager::get(backend_name)?;
    if let Err(err) = backend.health_check().await {
        println!("{}", Paint::yellow(format!("Warning: {err}")));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let line = lines.next_line().await?;
        if line.is_none() {
            break;
        }

        let input = line.unwrap();
        if input.trim().is_empty() {
            continue;
        }

        if let Some(command) = SlashCommand::parse(&input) {
            if command.is_quit() {
                break;
            }

            if command.is_help() {
                println!("{}", help_text());
                continue;
            }

            if command.is_model_list() {
                let res = backend_name
                    .models()
                    .iter()
                    .enumerate()
                    .map(|(idx, model)| {
                        let n = idx + 1;
                        return format!("- ({n}) {model}");
                    })
                    .collect::<Vec<String>>();

                println!("{}", res.join("\n"));
                continue;
            }

            if command.is_model_set() {
                if command.args.is_empty() {
                    println!(
                        "You must specify a model name with `/model` or `/m`. Run `/help` for more details."
                    );
                    continue;
                }

                let models = backend_name.models();
                let mut model_name = command.args[0].to_string();
                if let Ok(idx) = model_name.parse::<usize>() {
                    if idx < 1 || idx > models.len() {
                        println!("{idx} is not a valid index from the model list.");
                        continue;
                    }
                    model_name = models[idx - 1].to_string();
                }

                if !models.contains(&model_name.as_str()) {
                    println!(
                        "No model named {model_name} found in backend {backend_name}. Did you mistype it?"
                    );
                    continue;
                }

                Config::set(ConfigKey::Model, &model_name);
                model = model_name;
                println!("{model} is now the active model.");
                continue;
            }

            if command.is_backend_set() {
                if command.args.is_empty() {
                    println!(
                        "You must specify a backend with `/backend` or `/b`. Possible values are: {}.",
                        BackendName::VARIANTS.join(", ")
                    );
                    continue;
                }

                let parsed = BackendName::parse(command.args[0].to_string());
                if parsed.is_none() {
                    println!(
                        "No backend named {} found. Possible values are: {}.",
                        command.args[0],
                        BackendName::VARIANTS.join(", ")
                    );
                    continue;
                }

                let next = parsed.unwrap();
                if !ensure_token(next)? {
                    continue;
                }

                backend_name = next;
                model = backend_name.default_model().to_string();
                Config::set(ConfigKey::Backend, &backend_name.to_string());
                Config::set(ConfigKey::Model, &model);
                println!(
                    "{} is now the active backend, with model {model}.",
                    backend_name.label()
                );
                continue;
            }

            if command.is_history() {
                print_history(&session);
            }

            continue;
        }

        // Unknown commands never reach the backend.
        if input.trim().starts_with('/') {
            println!("Unknown command. Run `/help` for the list of commands.");
            continue;
        }

        let res = Dispatcher::run(&mut session, &model, &input, |requested| {
            return BackendManager::get_with_model(backend_name, requested);
        })
        .await;

        match res {
            Ok(None) => {}
            Ok(Some(outcome)) => {
                if outcome.used_fallback() {
                    println!(
                        "{}",
                        Paint::yellow(format!(
                            "Model '{}' is unavailable for this API version or method. Switched to '{}' for this run.",
                            outcome.requested_model, outcome.model_used
                        ))
                    );
                }
                print_assessment(&outcome.assessment);
            }
            Err(err) => {
                let kind = FaultKind::classify(&err);
                println!("{}", Paint::red(fault_notice(backend_name, kind, &err)));
            }
        }
    }

    tracing::info!(session_id = session.id, runs = session.runs(), "session ended");

    return Ok(true);
}
