/// The three text blocks produced by one full run of the analysis flow.
/// Discarded once rendered and appended to the session history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assessment {
    pub condition: String,
    pub medications: String,
    pub nutrition: String,
}

/// An assessment paired with the model that was asked for and the model that
/// actually produced it. The two differ only when the fallback dispatcher
/// switched models mid run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub assessment: Assessment,
    pub requested_model: String,
    pub model_used: String,
}

impl AnalysisOutcome {
    pub fn used_fallback(&self) -> bool {
        return self.requested_model != self.model_used;
    }
}
