use serde::{Deserialize, Serialize};

pub mod document;
pub mod fields;

pub use document::{Document, FacetEntry, ResultSet, Subscription};
pub use fields::{project, FieldName, ProjectedValue, Projection, RequestedField, DEFAULT_FIELDS};

/// Hard ceiling on the characters returned by a single tool response.
pub const OUTPUT_MAX_CHARS: usize = 25_000;

/// Largest `size` the upstream search endpoint accepts.
pub const MAX_RESULT_SIZE: usize = 1_000;

/// Human-readable failure description handed back to the caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Text rendering used as the single content block of an error payload.
    pub fn render(&self) -> String {
        let mut out = format!("Error: {}", self.message);
        if let Some(hint) = self.hint.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            out.push_str("\nHint: ");
            out.push_str(hint);
        }
        out
    }
}
