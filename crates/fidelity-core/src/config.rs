//! Engine configuration
//!
//! Built once at process start and handed to
//! [`ConversionOrchestrator::new`](crate::orchestrator::ConversionOrchestrator::new).

use serde::{Deserialize, Serialize};

/// Default annotation namespace for engine entries
pub const DEFAULT_ANNOTATION_PREFIX: &str = "conversion.fidelity.dev";

/// What to do with a side-channel entry that cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Abort the conversion with [`ConversionError::CorruptRestoreData`](crate::error::ConversionError::CorruptRestoreData)
    #[default]
    Fail,
    /// Drop the entry, log a warning and trust the converted value
    Discard,
}

/// Conversion engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FidelityConfig {
    /// DNS-style prefix of every annotation key the engine owns
    pub annotation_prefix: String,
    /// Handling of undecodable entries
    pub on_corrupt: CorruptPolicy,
}

impl FidelityConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With annotation prefix
    #[inline]
    #[must_use]
    pub fn with_annotation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.annotation_prefix = prefix.into();
        self
    }

    /// With corrupt-entry policy
    #[inline]
    #[must_use]
    pub fn with_on_corrupt(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    /// Check the prefix is a usable DNS subdomain
    ///
    /// # Errors
    /// Returns error if the prefix is empty, longer than 253 characters, or
    /// not made of dot-separated `[a-z0-9-]` labels
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.annotation_prefix;
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if prefix.len() > 253 {
            return Err(ConfigError::InvalidPrefix {
                prefix: prefix.clone(),
                reason: "longer than 253 characters",
            });
        }
        for label in prefix.split('.') {
            if label.is_empty() {
                return Err(ConfigError::InvalidPrefix {
                    prefix: prefix.clone(),
                    reason: "empty label",
                });
            }
            if !label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            {
                return Err(ConfigError::InvalidPrefix {
                    prefix: prefix.clone(),
                    reason: "labels may only contain [a-z0-9-]",
                });
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(ConfigError::InvalidPrefix {
                    prefix: prefix.clone(),
                    reason: "labels must not start or end with '-'",
                });
            }
        }
        Ok(())
    }
}

impl Default for FidelityConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: DEFAULT_ANNOTATION_PREFIX.to_string(),
            on_corrupt: CorruptPolicy::Fail,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Empty annotation prefix
    #[error("annotation prefix must not be empty")]
    EmptyPrefix,

    /// Malformed annotation prefix
    #[error("invalid annotation prefix '{prefix}': {reason}")]
    InvalidPrefix {
        prefix: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = FidelityConfig::default();
        assert_eq!(config.annotation_prefix, DEFAULT_ANNOTATION_PREFIX);
        assert_eq!(config.on_corrupt, CorruptPolicy::Fail);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_prefixes() {
        for bad in ["", "Upper.case", "a..b", "-a.b", "a/b", "trailing."] {
            let config = FidelityConfig::new().with_annotation_prefix(bad);
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn deserializes_partial_document() {
        let config: FidelityConfig =
            serde_json::from_str(r#"{ "on_corrupt": "discard" }"#).unwrap();
        assert_eq!(config.on_corrupt, CorruptPolicy::Discard);
        assert_eq!(config.annotation_prefix, DEFAULT_ANNOTATION_PREFIX);
    }
}
