use thiserror::Error;

/// Fatal conditions raised while parsing a document.
///
/// Template errors abort the whole parse; no partial document is produced.
/// Everything else about the input format is tolerated.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed template at line {line}: {reason}")]
    MalformedTemplate { line: usize, reason: String },

    #[error("Template is not defined: {name} (referenced at line {line})")]
    UndefinedTemplate { name: String, line: usize },

    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedTemplate {
            line,
            reason: reason.into(),
        }
    }
}
