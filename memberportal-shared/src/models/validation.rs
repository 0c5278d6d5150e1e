/// Server-side validation result
///
/// `POST .../validate` endpoints answer with `{ "valid": bool, "errors": [...] }`.
/// Error entries are message keys; keys prefixed with a field name
/// (`"login.duplicate"`) are attached to that field in forms.

use serde::{Deserialize, Serialize};

/// Structured validation answer from the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the record may be written
    pub valid: bool,

    /// Message keys explaining why not
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result with the given messages
    pub fn invalid<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Messages attached to `field` (entries of the form `field.xxx`)
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors.iter().filter_map(move |e| {
            e.strip_prefix(field)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|_| e.as_str())
        })
    }
}
