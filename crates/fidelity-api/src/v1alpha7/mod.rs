//! `infrastructure.cluster.x-k8s.io/v1alpha7`
//!
//! Served for existing clients; converts to and from [`v1alpha8`](crate::v1alpha8).

pub mod convert;
mod conversion;
mod restore;
mod types;

pub use restore::Restorers;
pub use types::*;

/// Version tag
pub const VERSION: &str = "v1alpha7";

/// Full `apiVersion` string
pub const API_VERSION: &str = "infrastructure.cluster.x-k8s.io/v1alpha7";

crate::impl_resource!(
    OpenStackCluster,
    OpenStackClusterTemplate,
    OpenStackMachine,
    OpenStackMachineTemplate,
);
