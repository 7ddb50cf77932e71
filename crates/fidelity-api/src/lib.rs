//! Fidelity API
//!
//! OpenStack infrastructure resources in two schema versions, with lossless
//! conversion between them.
//!
//! # Versions
//!
//! - [`v1alpha8`]: the storage (hub) version
//! - [`v1alpha7`]: converts to and from the hub through
//!   [`Convertible`](fidelity_core::Convertible)
//!
//! # Example
//!
//! ```rust,ignore
//! use fidelity_api::{v1alpha7, v1alpha8, Conversions};
//! use fidelity_core::{Convertible, FidelityConfig};
//!
//! let ctx = Conversions::new(FidelityConfig::default())?;
//! let mut hub = v1alpha8::OpenStackMachine::default();
//! spoke.convert_to(&mut hub, &ctx)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

/// Implement [`Resource`](fidelity_core::Resource) for kinds with `metadata`
#[macro_export]
#[doc(hidden)]
macro_rules! impl_resource {
    ($($kind:ident),+ $(,)?) => {
        $(
            impl ::fidelity_core::Resource for $kind {
                fn meta(&self) -> &::fidelity_core::ObjectMeta {
                    &self.metadata
                }

                fn meta_mut(&mut self) -> &mut ::fidelity_core::ObjectMeta {
                    &mut self.metadata
                }
            }
        )+
    };
}

pub mod document;
pub mod v1alpha7;
pub mod v1alpha8;

pub use document::{ApiVersion, Converted, DocumentError, Kind, RoundTrip, GROUP};

use fidelity_core::{ConfigError, ConversionOrchestrator, FidelityConfig, SpecError};

/// Errors while building a [`Conversions`] context
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Engine configuration rejected
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A restoration spec could not be built
    #[error("invalid restoration spec: {0}")]
    Spec(#[from] SpecError),
}

/// Everything a conversion needs, built once at start-up
///
/// Holds the orchestrator and the restoration specs of both versions. Pass
/// it to every [`Convertible`](fidelity_core::Convertible) call.
#[derive(Debug)]
pub struct Conversions {
    orchestrator: ConversionOrchestrator,
    spoke: v1alpha7::Restorers,
    hub: v1alpha8::Restorers,
}

impl Conversions {
    /// Build the context
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or a spec is malformed
    pub fn new(config: FidelityConfig) -> Result<Self, SetupError> {
        let orchestrator = ConversionOrchestrator::new(config)?;
        let spoke = v1alpha7::Restorers::new()?;
        let hub = v1alpha8::Restorers::new()?;

        tracing::debug!(
            "Conversion context ready (prefix: {})",
            orchestrator.config().annotation_prefix
        );
        Ok(Self {
            orchestrator,
            spoke,
            hub,
        })
    }

    /// Shared orchestrator
    #[inline]
    #[must_use]
    pub fn orchestrator(&self) -> &ConversionOrchestrator {
        &self.orchestrator
    }

    /// v1alpha7 restoration specs
    #[inline]
    #[must_use]
    pub fn spoke(&self) -> &v1alpha7::Restorers {
        &self.spoke
    }

    /// v1alpha8 restoration specs
    #[inline]
    #[must_use]
    pub fn hub(&self) -> &v1alpha8::Restorers {
        &self.hub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_builds() {
        let ctx = Conversions::new(FidelityConfig::default()).unwrap();
        assert_eq!(ctx.spoke().machine.version().as_str(), v1alpha7::VERSION);
        assert_eq!(ctx.hub().machine.version().as_str(), v1alpha8::VERSION);
    }

    #[test]
    fn bad_prefix_rejected() {
        let config = FidelityConfig::new().with_annotation_prefix("");
        assert!(matches!(
            Conversions::new(config),
            Err(SetupError::Config(_))
        ));
    }
}
