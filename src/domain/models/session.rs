#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use chrono::Local;
use chrono::SecondsFormat;
use strum::EnumIter;
use uuid::Uuid;

use super::Assessment;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryCategory {
    Conditions,
    Medications,
    Nutrition,
}

impl HistoryCategory {
    /// Header shown above the category log when history is printed.
    pub fn title(&self) -> &'static str {
        match self {
            HistoryCategory::Conditions => return "Conversation history – conditions",
            HistoryCategory::Medications => return "Conversation history – medications",
            HistoryCategory::Nutrition => return "Conversation history – nutrition",
        }
    }
}

/// State for one visit. Holds one append-only log per advice category,
/// oldest entries first, never reordered or pruned. Entry `i` of every log
/// comes from the same run.
pub struct Session {
    pub id: String,
    pub started_at: String,
    conditions_history: Vec<String>,
    medications_history: Vec<String>,
    nutrition_history: Vec<String>,
}

impl Default for Session {
    fn default() -> Session {
        return Session {
            id: Session::create_id(),
            started_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            conditions_history: vec![],
            medications_history: vec![],
            nutrition_history: vec![],
        };
    }
}

impl Session {
    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");
    }

    /// Appends one assessment to all three logs. This is the only write path,
    /// so a run that fails partway through appends nothing at all.
    pub fn record(&mut self, assessment: &Assessment) {
        self.conditions_history.push(assessment.condition.clone());
        self.medications_history.push(assessment.medications.clone());
        self.nutrition_history.push(assessment.nutrition.clone());
    }

    pub fn history(&self, category: HistoryCategory) -> &[String] {
        match category {
            HistoryCategory::Conditions => return &self.conditions_history,
            HistoryCategory::Medications => return &self.medications_history,
            HistoryCategory::Nutrition => return &self.nutrition_history,
        }
    }

    /// Number of recorded runs. All three logs share this length.
    pub fn runs(&self) -> usize {
        return self.conditions_history.len();
    }
}
