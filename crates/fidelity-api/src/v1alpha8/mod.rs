//! `infrastructure.cluster.x-k8s.io/v1alpha8`, the storage (hub) version
//!
//! Every other version converts to and from these types.

mod restore;
mod types;

pub use restore::Restorers;
pub use types::*;

/// Version tag
pub const VERSION: &str = "v1alpha8";

/// Full `apiVersion` string
pub const API_VERSION: &str = "infrastructure.cluster.x-k8s.io/v1alpha8";

crate::impl_resource!(
    OpenStackCluster,
    OpenStackClusterTemplate,
    OpenStackMachine,
    OpenStackMachineTemplate,
);
