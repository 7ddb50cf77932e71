//! Fidelity Core
//!
//! Lossless round trips between two schema versions of one resource.
//!
//! # Core Concepts
//!
//! - [`HashedFieldRestorer`]: Extracts, normalizes and splices one field-group
//! - [`RestorationSpec`]: The field-groups tracked for one schema version
//! - [`FingerprintStore`]: Direction-scoped fingerprints in a record's annotations
//! - [`ConversionOrchestrator`]: Converts, detects loss, restores or trusts
//! - [`Fingerprint`]: 32-byte BLAKE3 digest of a normalized field-group
//!
//! # Example
//!
//! ```rust,ignore
//! use fidelity_core::{ConversionOrchestrator, FidelityConfig};
//!
//! let orchestrator = ConversionOrchestrator::new(FidelityConfig::default())?;
//! let hub = orchestrator.convert_and_restore(
//!     &spoke,
//!     spoke_to_hub,
//!     hub_to_spoke,
//!     &spoke_spec,
//!     &hub_spec,
//! )?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod config;
mod convertible;
mod error;
mod hash;
mod meta;
mod name;
mod orchestrator;
mod restorer;
mod spec;
mod store;

// Re-exports
pub use config::{ConfigError, CorruptPolicy, FidelityConfig, DEFAULT_ANNOTATION_PREFIX};
pub use convertible::Convertible;
pub use error::{ConversionError, SpecError, StructuralError};
pub use hash::{Fingerprint, HashError};
pub use meta::{Annotations, ListMeta, ObjectMeta, Resource, TypeMeta};
pub use name::{GroupName, NameError, VersionTag, MAX_NAME_LEN};
pub use orchestrator::{ConversionOrchestrator, ConversionReport, Loss, Restoration};
pub use restorer::{FieldRestorer, HashedFieldRestorer, Normalizer};
pub use spec::RestorationSpec;
pub use store::{Direction, EntryKind, FingerprintStore, KeyScheme, KEY_SCHEME_VERSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
