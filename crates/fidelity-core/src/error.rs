//! Error types for the conversion engine
//!
//! - [`StructuralError`]: a structural converter could not map its input
//! - [`ConversionError`]: anything that aborts one conversion call
//! - [`SpecError`]: a restoration spec was assembled incorrectly

use crate::hash::HashError;
use crate::name::{GroupName, NameError};

/// A structural converter rejected its input
///
/// Raised by the forward/backward field mappings, never by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {field}: {reason}")]
pub struct StructuralError {
    /// Dotted path of the offending field
    pub field: String,
    /// Why the value could not be mapped
    pub reason: String,
}

impl StructuralError {
    /// Create a new structural error
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a conversion call
///
/// A failed call never leaves a half-updated side channel: all entries are
/// written to the output record only after every group has resolved.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Forward or backward structural mapping failed
    #[error("structural conversion failed: {0}")]
    Structural(#[from] StructuralError),

    /// A stored fingerprint or restore payload could not be decoded
    #[error("corrupt restore data for group '{group}' at '{key}': {reason}")]
    CorruptRestoreData {
        group: GroupName,
        key: String,
        reason: String,
    },

    /// A group value could not be encoded for hashing or capture
    #[error("failed to encode group '{group}': {source}")]
    Encode {
        group: GroupName,
        #[source]
        source: HashError,
    },
}

impl ConversionError {
    /// Whether the failure came from the structural converter
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

/// Errors when building a [`RestorationSpec`](crate::spec::RestorationSpec)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// Two restorers registered under one name
    #[error("duplicate field-group '{0}'")]
    DuplicateGroup(GroupName),

    /// Group or version name failed validation
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_error_display() {
        let err = StructuralError::new("spec.controlPlaneEndpoint.port", "out of range: 70000");
        assert_eq!(
            err.to_string(),
            "cannot convert spec.controlPlaneEndpoint.port: out of range: 70000"
        );
    }

    #[test]
    fn structural_converts_into_conversion_error() {
        let err: ConversionError = StructuralError::new("spec", "bad").into();
        assert!(err.is_structural());
    }

    #[test]
    fn corrupt_is_not_structural() {
        let err = ConversionError::CorruptRestoreData {
            group: GroupName::new("spec").unwrap(),
            key: "k".to_string(),
            reason: "bad hex".to_string(),
        };
        assert!(!err.is_structural());
        assert!(err.to_string().contains("'spec'"));
    }
}
