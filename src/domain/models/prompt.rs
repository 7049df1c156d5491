#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

/// A fixed prompt template with named `{placeholder}` slots. Values are
/// substituted verbatim, free text is embedded as-is and must be treated as
/// untrusted downstream.
pub struct PromptTemplate {
    template: &'static str,
    variables: Vec<&'static str>,
}

impl PromptTemplate {
    pub fn conditions() -> PromptTemplate {
        return PromptTemplate {
            template: "List 2 possible conditions for these symptoms: {symptoms}. Summarize.",
            variables: vec!["symptoms"],
        };
    }

    pub fn medications() -> PromptTemplate {
        return PromptTemplate {
            template: "Provide 2 first aid medications for {condition}. Summarize.",
            variables: vec!["condition"],
        };
    }

    pub fn nutrition() -> PromptTemplate {
        return PromptTemplate {
            template: "Recommend 2 nutritional foods for {condition}. Summarize.",
            variables: vec!["condition"],
        };
    }

    /// Substitutes every declared variable into the template. Fails when a
    /// declared variable has no supplied value.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let mut text = self.template.to_string();
        for variable in &self.variables {
            let supplied = values
                .iter()
                .find(|(name, _)| return name == variable)
                .map(|(_, value)| return *value);

            match supplied {
                Some(value) => {
                    text = text.replace(&format!("{{{variable}}}"), value);
                }
                None => {
                    bail!(format!(
                        "prompt is missing a value for template variable '{variable}'"
                    ));
                }
            }
        }

        return Ok(text);
    }
}
