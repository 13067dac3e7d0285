//! Codec error types following the crate's canonical error-struct pattern.

use thiserror::Error;

/// Errors that can occur decoding or encoding an envelope (§7 codec failure).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input ended before a complete field could be read.
    #[error("truncated input while reading {context}")]
    Truncated {
        /// What was being read when the input ran out.
        context: String,
    },

    /// The input was present but did not follow the wire grammar.
    #[error("malformed envelope: {reason}")]
    Malformed {
        /// Description of the malformed condition.
        reason: String,
    },

    /// A required field was missing from a fully parsed record.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },
}

impl CodecError {
    /// Build a [`CodecError::Truncated`] naming what was being read.
    pub fn truncated(context: impl Into<String>) -> Self {
        Self::Truncated {
            context: context.into(),
        }
    }

    /// Build a [`CodecError::Malformed`] with a reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Build a [`CodecError::MissingField`] naming the field.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// True if this is a truncated-input error.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }

    /// True if this is a malformed-envelope error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// True if this is a missing-field error.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}
