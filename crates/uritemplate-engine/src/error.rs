use thiserror::Error;

/// Error parsing or expanding a URI Template.
///
/// `position` is a Unicode-scalar offset into the original template string
/// (not a byte offset); callers needing byte or UTF-16 offsets convert
/// explicitly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template string violates the RFC 6570 grammar.
    ///
    /// Only returned from parsing. Parsing is all-or-nothing: no
    /// partially-valid template is ever constructed.
    #[error("malformed template: {reason} (at scalar offset {position})")]
    MalformedTemplate { position: usize, reason: String },

    /// The template could not be expanded with the supplied variables.
    ///
    /// Only returned from expansion, which is likewise all-or-nothing: no
    /// partial output string is produced. `position` is the offset of the
    /// originating expression's `{`.
    #[error("expansion failure: {reason} (at scalar offset {position})")]
    ExpansionFailure { position: usize, reason: String },
}

impl TemplateError {
    /// Scalar offset into the template source where the error was detected.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            TemplateError::MalformedTemplate { position, .. }
            | TemplateError::ExpansionFailure { position, .. } => *position,
        }
    }

    /// Human-readable description of the violation.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            TemplateError::MalformedTemplate { reason, .. }
            | TemplateError::ExpansionFailure { reason, .. } => reason,
        }
    }
}
