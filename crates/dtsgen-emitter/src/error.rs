use thiserror::Error;

/// Fatal for the module being generated; no partial output is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("unsupported type annotation: {kind}")]
    UnsupportedTypeAnnotation { kind: String },
}

impl EmitError {
    pub(crate) fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedTypeAnnotation { kind: kind.into() }
    }
}

/// Rejected member-exclusion configuration.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid member exclusion pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
