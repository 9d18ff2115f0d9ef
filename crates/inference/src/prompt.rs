use complexity_common::{EvalError, Result};

/// Placeholder replaced by the code snippet.
pub const CODE_PLACEHOLDER: &str = "{code}";

pub const DEFAULT_TEMPLATE: &str = "
You are an expert in analyzing Python code for computational complexity.
Given a Python function, classify its time complexity as one of the following:
- O(1)
- O(log n)
- O(n)
- O(n log n)
- O(n^2)

Respond with only the complexity class (e.g., O(n)), nothing else.

Python code:
{code}
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(CODE_PLACEHOLDER) {
            return Err(EvalError::Config(format!(
                "prompt template has no {CODE_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { template })
    }

    /// The configured template, or the built-in one when `None`.
    pub fn from_config(template: Option<&str>) -> Result<Self> {
        match template {
            Some(template) => Self::new(template),
            None => Ok(Self::default()),
        }
    }

    /// Substitute the snippet verbatim for every placeholder.
    pub fn render(&self, code: &str) -> String {
        self.template.replace(CODE_PLACEHOLDER, code)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_wraps_code() {
        let prompt = PromptTemplate::default().render("def f(): pass");
        assert!(prompt.starts_with("\nYou are an expert"));
        assert!(prompt.ends_with("Python code:\ndef f(): pass\n"));
        assert!(!prompt.contains(CODE_PLACEHOLDER));
    }

    #[test]
    fn test_code_with_braces_is_inserted_verbatim() {
        let template = PromptTemplate::new("<{code}>").unwrap();
        assert_eq!(template.render("d = {'a': 1}"), "<d = {'a': 1}>");
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        assert!(matches!(
            PromptTemplate::new("classify this"),
            Err(EvalError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_falls_back_to_default() {
        assert_eq!(PromptTemplate::from_config(None).unwrap(), PromptTemplate::default());
        let custom = PromptTemplate::from_config(Some("code: {code}")).unwrap();
        assert_eq!(custom.render("x"), "code: x");
    }
}
