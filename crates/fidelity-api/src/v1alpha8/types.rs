//! v1alpha8 resource schemas

use fidelity_core::{ListMeta, ObjectMeta, TypeMeta};
use serde::{Deserialize, Serialize};

/// Reference to the identity used to talk to the cloud
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    /// Kind of the referenced object, usually `Secret`
    pub kind: String,
    /// Name of the referenced object
    pub name: String,
}

/// Selects a network by name, id, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFilter {
    /// Network name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Network id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// Observed network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    /// Network name
    pub name: String,
    /// Network id
    pub id: String,
    /// Tags on the network
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Security groups managed by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedSecurityGroups {
    /// Allow all traffic between cluster nodes
    #[serde(default)]
    pub allow_all_in_cluster_traffic: bool,
}

/// Load balancer in front of the API server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServerLoadBalancer {
    /// Whether a load balancer is created
    #[serde(default)]
    pub enabled: bool,
    /// Extra listener ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_ports: Vec<i32>,
    /// CIDRs allowed to reach the listener
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_cidrs: Vec<String>,
}

/// Control plane address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    /// Hostname or IP
    pub host: String,
    /// TCP port
    pub port: u16,
}

/// Desired state of an [`OpenStackCluster`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackClusterSpec {
    /// Entry in `clouds.yaml`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_name: String,
    /// Credentials reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_ref: Option<IdentityRef>,
    /// Network used for floating IPs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_network: Option<NetworkFilter>,
    /// Run without any external network
    #[serde(default)]
    pub disable_external_network: bool,
    /// Provider-managed security groups; `None` means unmanaged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_security_groups: Option<ManagedSecurityGroups>,
    /// API server load balancer
    #[serde(default)]
    pub api_server_load_balancer: ApiServerLoadBalancer,
    /// Control plane endpoint, filled in once known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_endpoint: Option<ApiEndpoint>,
    /// Tags applied to every created resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Bastion host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BastionStatus {
    /// Server id
    pub id: String,
    /// Server name
    pub name: String,
    /// Public address
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub floating_ip: String,
    /// Server state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Image the bastion was booted from, as resolved by the controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_image_id: Option<String>,
}

/// Observed state of an [`OpenStackCluster`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackClusterStatus {
    /// Infrastructure is ready
    #[serde(default)]
    pub ready: bool,
    /// Cluster network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkStatus>,
    /// External network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_network: Option<NetworkStatus>,
    /// Bastion host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bastion: Option<BastionStatus>,
    /// Terminal failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

/// Cluster infrastructure on OpenStack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackCluster {
    /// Header
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    /// Identity and annotations
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: OpenStackClusterSpec,
    /// Observed state
    #[serde(default)]
    pub status: OpenStackClusterStatus,
}

/// List of [`OpenStackCluster`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackClusterList {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<OpenStackCluster>,
}

/// Template body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackClusterTemplateResource {
    #[serde(default)]
    pub spec: OpenStackClusterSpec,
}

/// Desired state of an [`OpenStackClusterTemplate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackClusterTemplateSpec {
    #[serde(default)]
    pub template: OpenStackClusterTemplateResource,
}

/// Template for [`OpenStackCluster`]s
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackClusterTemplate {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: OpenStackClusterTemplateSpec,
}

/// List of [`OpenStackClusterTemplate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackClusterTemplateList {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<OpenStackClusterTemplate>,
}

/// Selects an image by name, id, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFilter {
    /// Image name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Image id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Port attached to a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOpts {
    /// Network the port is created on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkFilter>,
    /// Port description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Fixed IPs requested on the port
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_ips: Vec<String>,
}

/// Selects a security group by name, id, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// One server metadata item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMetadata {
    pub key: String,
    pub value: String,
}

/// Boot volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootVolume {
    /// Size in GiB
    #[serde(rename = "sizeGiB")]
    pub size_gib: u32,
    /// Cinder volume type
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub volume_type: String,
}

/// Extra volume attached to a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalBlockDevice {
    /// Device name, unique per server
    pub name: String,
    /// Size in GiB
    #[serde(rename = "sizeGiB")]
    pub size_gib: u32,
    /// Cinder volume type
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub volume_type: String,
}

/// Desired state of an [`OpenStackMachine`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackMachineSpec {
    /// Set by the machine controller
    #[serde(default, rename = "providerID", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Set by the machine controller
    #[serde(default, rename = "instanceID", skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_ref: Option<IdentityRef>,
    /// Flavor name
    #[serde(default)]
    pub flavor: String,
    /// Boot image
    #[serde(default)]
    pub image: ImageFilter,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_key_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortOpts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<SecurityGroupFilter>,
    /// Attach ports through a trunk
    #[serde(default)]
    pub trunk: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server_metadata: Vec<ServerMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_drive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_volume: Option<RootVolume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_block_devices: Vec<AdditionalBlockDevice>,
}

/// Address reported for a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineAddress {
    /// `InternalIP`, `ExternalIP`, ...
    #[serde(rename = "type")]
    pub address_type: String,
    pub address: String,
}

/// Observed state of an [`OpenStackMachine`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackMachineStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<MachineAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

/// Server backing one cluster machine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackMachine {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: OpenStackMachineSpec,
    #[serde(default)]
    pub status: OpenStackMachineStatus,
}

/// List of [`OpenStackMachine`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackMachineList {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<OpenStackMachine>,
}

/// Template body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackMachineTemplateResource {
    #[serde(default)]
    pub spec: OpenStackMachineSpec,
}

/// Desired state of an [`OpenStackMachineTemplate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackMachineTemplateSpec {
    #[serde(default)]
    pub template: OpenStackMachineTemplateResource,
}

/// Template for [`OpenStackMachine`]s
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackMachineTemplate {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: OpenStackMachineTemplateSpec,
}

/// List of [`OpenStackMachineTemplate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackMachineTemplateList {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<OpenStackMachineTemplate>,
}
