//! Provider failure classification.
//!
//! Upstream SDK errors carry no stable codes we can rely on, so failures are
//! sorted by matching their message text against an ordered rule list.
//! The first rule that matches wins.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    Credential,
    Quota,
    File,
    Unknown,
}

impl ProviderErrorKind {
    /// User-facing text for a failure of this kind. `fallback_prefix` and the
    /// raw provider message are only used for `Unknown`.
    pub fn user_message(self, fallback_prefix: &str, raw: &str) -> String {
        match self {
            ProviderErrorKind::Credential => {
                "Invalid API key. Please check your Google Gemini API key configuration."
                    .to_string()
            }
            ProviderErrorKind::Quota => {
                "API quota exceeded or rate limit reached. Please try again later.".to_string()
            }
            ProviderErrorKind::File => {
                "Error processing file. Please make sure it is a valid, readable document."
                    .to_string()
            }
            ProviderErrorKind::Unknown => format!("{fallback_prefix}: {raw}"),
        }
    }
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// One entry of the classifier: a predicate over the lowercased message.
pub struct ClassificationRule {
    kind: ProviderErrorKind,
    predicate: Predicate,
}

impl ClassificationRule {
    pub fn new(
        kind: ProviderErrorKind,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            predicate: Box::new(predicate),
        }
    }

    /// Matches when the message contains any of `needles` (given lowercase).
    pub fn contains_any(kind: ProviderErrorKind, needles: &'static [&'static str]) -> Self {
        Self::new(kind, move |msg| needles.iter().any(|n| msg.contains(n)))
    }
}

pub struct ErrorClassifier {
    rules: Vec<ClassificationRule>,
}

impl ErrorClassifier {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, message: &str) -> ProviderErrorKind {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(&lowered))
            .map(|rule| rule.kind)
            .unwrap_or(ProviderErrorKind::Unknown)
    }
}

impl Default for ErrorClassifier {
    /// Rules tuned to the wording of Gemini API errors.
    fn default() -> Self {
        Self::new(vec![
            ClassificationRule::contains_any(
                ProviderErrorKind::Credential,
                &["api key not valid", "invalid_argument"],
            ),
            ClassificationRule::contains_any(ProviderErrorKind::Quota, &["quota", "limit"]),
            ClassificationRule::contains_any(ProviderErrorKind::File, &["file"]),
        ])
    }
}
