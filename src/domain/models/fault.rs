#[cfg(test)]
#[path = "fault_test.rs"]
mod tests;

/// Signals that mark a quota or rate limit fault.
const QUOTA_SIGNALS: [&str; 2] = ["RESOURCE_EXHAUSTED", "429"];

/// Signals that mark the selected model identifier as rejected by the API.
const MODEL_SIGNALS: [&str; 3] = [
    "404",
    "not found for API version",
    "is not supported for generateContent",
];

/// Signals that mark a template contract violation inside this process.
const MISSING_VARIABLE_SIGNALS: [&str; 1] = ["missing a value for template variable"];

/// Classification of a failed analysis run. The hosted APIs expose no
/// structured error taxonomy, so faults are classified by matching known
/// substrings against the error message. Matching is case sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FaultKind {
    MissingVariable,
    QuotaExceeded,
    ModelUnsupported,
    Other,
}

impl FaultKind {
    pub fn classify(err: &anyhow::Error) -> FaultKind {
        let msg = err.to_string();

        if MISSING_VARIABLE_SIGNALS
            .iter()
            .any(|signal| return msg.contains(signal))
        {
            return FaultKind::MissingVariable;
        }

        // Quota signals are checked before model signals. A 429 body can
        // carry model names, and a quota fault must never start a model
        // retry.
        if QUOTA_SIGNALS
            .iter()
            .any(|signal| return msg.contains(signal))
        {
            return FaultKind::QuotaExceeded;
        }

        if MODEL_SIGNALS
            .iter()
            .any(|signal| return msg.contains(signal))
        {
            return FaultKind::ModelUnsupported;
        }

        return FaultKind::Other;
    }
}
