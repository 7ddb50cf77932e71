//! Structural field mapping between v1alpha7 and v1alpha8
//!
//! These functions are pure and know nothing about fingerprints. Anything one
//! version cannot express is dropped here and recovered by the restorers:
//!
//! | v1alpha7 only | v1alpha8 only |
//! |---|---|
//! | `apiServerLoadBalancer.provider` | `externalNetwork.name` |
//! | `allowAllInClusterTraffic` without managed groups | bastion `resolvedImageID` |
//! | `status.failureReason` | port `network.name` |
//! | machine `networks` | security group `id` |
//! | | `additionalBlockDevices` |

use super::types::{
    ApiEndpoint, ApiServerLoadBalancer, BastionStatus, IdentityRef, MachineAddress,
    NetworkStatus, OpenStackCluster, OpenStackClusterList, OpenStackClusterSpec,
    OpenStackClusterStatus, OpenStackClusterTemplate, OpenStackClusterTemplateList,
    OpenStackClusterTemplateResource, OpenStackClusterTemplateSpec, OpenStackMachine,
    OpenStackMachineList, OpenStackMachineSpec, OpenStackMachineStatus,
    OpenStackMachineTemplate, OpenStackMachineTemplateList, OpenStackMachineTemplateResource,
    OpenStackMachineTemplateSpec, PortOpts, RootVolume,
};
use crate::v1alpha8 as hub;
use fidelity_core::{StructuralError, TypeMeta};

type Result<T> = std::result::Result<T, StructuralError>;

/// v1alpha7 `OpenStackCluster` to v1alpha8
///
/// # Errors
/// Returns error if a field has no v1alpha8 representation
pub fn cluster_to_hub(src: &OpenStackCluster) -> Result<hub::OpenStackCluster> {
    Ok(hub::OpenStackCluster {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackCluster"),
        metadata: src.metadata.clone(),
        spec: cluster_spec_to_hub(&src.spec)?,
        status: cluster_status_to_hub(&src.status),
    })
}

/// v1alpha8 `OpenStackCluster` to v1alpha7
///
/// # Errors
/// Returns error if a field has no v1alpha7 representation
pub fn cluster_from_hub(src: &hub::OpenStackCluster) -> Result<OpenStackCluster> {
    Ok(OpenStackCluster {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackCluster"),
        metadata: src.metadata.clone(),
        spec: cluster_spec_from_hub(&src.spec),
        status: cluster_status_from_hub(&src.status),
    })
}

/// v1alpha7 `OpenStackClusterTemplate` to v1alpha8
///
/// # Errors
/// Returns error if a field has no v1alpha8 representation
pub fn cluster_template_to_hub(
    src: &OpenStackClusterTemplate,
) -> Result<hub::OpenStackClusterTemplate> {
    Ok(hub::OpenStackClusterTemplate {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackClusterTemplate"),
        metadata: src.metadata.clone(),
        spec: hub::OpenStackClusterTemplateSpec {
            template: hub::OpenStackClusterTemplateResource {
                spec: cluster_spec_to_hub(&src.spec.template.spec)?,
            },
        },
    })
}

/// v1alpha8 `OpenStackClusterTemplate` to v1alpha7
///
/// # Errors
/// Returns error if a field has no v1alpha7 representation
pub fn cluster_template_from_hub(
    src: &hub::OpenStackClusterTemplate,
) -> Result<OpenStackClusterTemplate> {
    Ok(OpenStackClusterTemplate {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackClusterTemplate"),
        metadata: src.metadata.clone(),
        spec: OpenStackClusterTemplateSpec {
            template: OpenStackClusterTemplateResource {
                spec: cluster_spec_from_hub(&src.spec.template.spec),
            },
        },
    })
}

/// v1alpha7 `OpenStackMachine` to v1alpha8
///
/// # Errors
/// Returns error if a field has no v1alpha8 representation
pub fn machine_to_hub(src: &OpenStackMachine) -> Result<hub::OpenStackMachine> {
    Ok(hub::OpenStackMachine {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackMachine"),
        metadata: src.metadata.clone(),
        spec: machine_spec_to_hub(&src.spec)?,
        status: machine_status_to_hub(&src.status),
    })
}

/// v1alpha8 `OpenStackMachine` to v1alpha7
///
/// # Errors
/// Returns error if a field has no v1alpha7 representation
pub fn machine_from_hub(src: &hub::OpenStackMachine) -> Result<OpenStackMachine> {
    Ok(OpenStackMachine {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackMachine"),
        metadata: src.metadata.clone(),
        spec: machine_spec_from_hub(&src.spec)?,
        status: machine_status_from_hub(&src.status),
    })
}

/// v1alpha7 `OpenStackMachineTemplate` to v1alpha8
///
/// # Errors
/// Returns error if a field has no v1alpha8 representation
pub fn machine_template_to_hub(
    src: &OpenStackMachineTemplate,
) -> Result<hub::OpenStackMachineTemplate> {
    Ok(hub::OpenStackMachineTemplate {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackMachineTemplate"),
        metadata: src.metadata.clone(),
        spec: hub::OpenStackMachineTemplateSpec {
            template: hub::OpenStackMachineTemplateResource {
                spec: machine_spec_to_hub(&src.spec.template.spec)?,
            },
        },
    })
}

/// v1alpha8 `OpenStackMachineTemplate` to v1alpha7
///
/// # Errors
/// Returns error if a field has no v1alpha7 representation
pub fn machine_template_from_hub(
    src: &hub::OpenStackMachineTemplate,
) -> Result<OpenStackMachineTemplate> {
    Ok(OpenStackMachineTemplate {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackMachineTemplate"),
        metadata: src.metadata.clone(),
        spec: OpenStackMachineTemplateSpec {
            template: OpenStackMachineTemplateResource {
                spec: machine_spec_from_hub(&src.spec.template.spec)?,
            },
        },
    })
}

fn items<S, D>(src: &[S], convert: fn(&S) -> Result<D>) -> Result<Vec<D>> {
    src.iter().map(convert).collect()
}

/// v1alpha7 `OpenStackClusterList` to v1alpha8
///
/// # Errors
/// Returns the first element error
pub fn cluster_list_to_hub(src: &OpenStackClusterList) -> Result<hub::OpenStackClusterList> {
    Ok(hub::OpenStackClusterList {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackClusterList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, cluster_to_hub)?,
    })
}

/// v1alpha8 `OpenStackClusterList` to v1alpha7
///
/// # Errors
/// Returns the first element error
pub fn cluster_list_from_hub(src: &hub::OpenStackClusterList) -> Result<OpenStackClusterList> {
    Ok(OpenStackClusterList {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackClusterList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, cluster_from_hub)?,
    })
}

/// v1alpha7 `OpenStackClusterTemplateList` to v1alpha8
///
/// # Errors
/// Returns the first element error
pub fn cluster_template_list_to_hub(
    src: &OpenStackClusterTemplateList,
) -> Result<hub::OpenStackClusterTemplateList> {
    Ok(hub::OpenStackClusterTemplateList {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackClusterTemplateList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, cluster_template_to_hub)?,
    })
}

/// v1alpha8 `OpenStackClusterTemplateList` to v1alpha7
///
/// # Errors
/// Returns the first element error
pub fn cluster_template_list_from_hub(
    src: &hub::OpenStackClusterTemplateList,
) -> Result<OpenStackClusterTemplateList> {
    Ok(OpenStackClusterTemplateList {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackClusterTemplateList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, cluster_template_from_hub)?,
    })
}

/// v1alpha7 `OpenStackMachineList` to v1alpha8
///
/// # Errors
/// Returns the first element error
pub fn machine_list_to_hub(src: &OpenStackMachineList) -> Result<hub::OpenStackMachineList> {
    Ok(hub::OpenStackMachineList {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackMachineList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, machine_to_hub)?,
    })
}

/// v1alpha8 `OpenStackMachineList` to v1alpha7
///
/// # Errors
/// Returns the first element error
pub fn machine_list_from_hub(src: &hub::OpenStackMachineList) -> Result<OpenStackMachineList> {
    Ok(OpenStackMachineList {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackMachineList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, machine_from_hub)?,
    })
}

/// v1alpha7 `OpenStackMachineTemplateList` to v1alpha8
///
/// # Errors
/// Returns the first element error
pub fn machine_template_list_to_hub(
    src: &OpenStackMachineTemplateList,
) -> Result<hub::OpenStackMachineTemplateList> {
    Ok(hub::OpenStackMachineTemplateList {
        type_meta: TypeMeta::new(hub::API_VERSION, "OpenStackMachineTemplateList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, machine_template_to_hub)?,
    })
}

/// v1alpha8 `OpenStackMachineTemplateList` to v1alpha7
///
/// # Errors
/// Returns the first element error
pub fn machine_template_list_from_hub(
    src: &hub::OpenStackMachineTemplateList,
) -> Result<OpenStackMachineTemplateList> {
    Ok(OpenStackMachineTemplateList {
        type_meta: TypeMeta::new(super::API_VERSION, "OpenStackMachineTemplateList"),
        metadata: src.metadata.clone(),
        items: items(&src.items, machine_template_from_hub)?,
    })
}

fn cluster_spec_to_hub(s: &OpenStackClusterSpec) -> Result<hub::OpenStackClusterSpec> {
    Ok(hub::OpenStackClusterSpec {
        cloud_name: s.cloud_name.clone(),
        identity_ref: s.identity_ref.as_ref().map(identity_ref_to_hub),
        external_network: non_empty(&s.external_network_id).map(|id| hub::NetworkFilter {
            id,
            ..hub::NetworkFilter::default()
        }),
        disable_external_network: s.disable_external_network,
        managed_security_groups: s.managed_security_groups.then(|| hub::ManagedSecurityGroups {
            allow_all_in_cluster_traffic: s.allow_all_in_cluster_traffic,
        }),
        api_server_load_balancer: hub::ApiServerLoadBalancer {
            enabled: s.api_server_load_balancer.enabled,
            additional_ports: s.api_server_load_balancer.additional_ports.clone(),
            allowed_cidrs: s.api_server_load_balancer.allowed_cidrs.clone(),
        },
        control_plane_endpoint: s
            .control_plane_endpoint
            .as_ref()
            .map(endpoint_to_hub)
            .transpose()?,
        tags: s.tags.clone(),
    })
}

fn cluster_spec_from_hub(s: &hub::OpenStackClusterSpec) -> OpenStackClusterSpec {
    OpenStackClusterSpec {
        cloud_name: s.cloud_name.clone(),
        identity_ref: s.identity_ref.as_ref().map(identity_ref_from_hub),
        external_network_id: s
            .external_network
            .as_ref()
            .map(|n| n.id.clone())
            .unwrap_or_default(),
        disable_external_network: s.disable_external_network,
        managed_security_groups: s.managed_security_groups.is_some(),
        allow_all_in_cluster_traffic: s
            .managed_security_groups
            .as_ref()
            .is_some_and(|m| m.allow_all_in_cluster_traffic),
        api_server_load_balancer: ApiServerLoadBalancer {
            enabled: s.api_server_load_balancer.enabled,
            additional_ports: s.api_server_load_balancer.additional_ports.clone(),
            allowed_cidrs: s.api_server_load_balancer.allowed_cidrs.clone(),
            provider: String::new(),
        },
        control_plane_endpoint: s.control_plane_endpoint.as_ref().map(|e| ApiEndpoint {
            host: e.host.clone(),
            port: i32::from(e.port),
        }),
        tags: s.tags.clone(),
    }
}

fn endpoint_to_hub(e: &ApiEndpoint) -> Result<hub::ApiEndpoint> {
    let port = u16::try_from(e.port).map_err(|_| {
        StructuralError::new(
            "spec.controlPlaneEndpoint.port",
            format!("{} is not a valid TCP port", e.port),
        )
    })?;
    Ok(hub::ApiEndpoint {
        host: e.host.clone(),
        port,
    })
}

fn cluster_status_to_hub(s: &OpenStackClusterStatus) -> hub::OpenStackClusterStatus {
    hub::OpenStackClusterStatus {
        ready: s.ready,
        network: s.network.as_ref().map(network_status_to_hub),
        external_network: s.external_network.as_ref().map(network_status_to_hub),
        bastion: s.bastion.as_ref().map(|b| hub::BastionStatus {
            id: b.id.clone(),
            name: b.name.clone(),
            floating_ip: b.floating_ip.clone(),
            state: b.state.clone(),
            resolved_image_id: None,
        }),
        failure_message: s.failure_message.clone(),
    }
}

fn cluster_status_from_hub(s: &hub::OpenStackClusterStatus) -> OpenStackClusterStatus {
    OpenStackClusterStatus {
        ready: s.ready,
        network: s.network.as_ref().map(network_status_from_hub),
        external_network: s.external_network.as_ref().map(network_status_from_hub),
        bastion: s.bastion.as_ref().map(|b| BastionStatus {
            id: b.id.clone(),
            name: b.name.clone(),
            floating_ip: b.floating_ip.clone(),
            state: b.state.clone(),
        }),
        failure_reason: None,
        failure_message: s.failure_message.clone(),
    }
}

fn network_status_to_hub(n: &NetworkStatus) -> hub::NetworkStatus {
    hub::NetworkStatus {
        name: n.name.clone(),
        id: n.id.clone(),
        tags: n.tags.clone(),
    }
}

fn network_status_from_hub(n: &hub::NetworkStatus) -> NetworkStatus {
    NetworkStatus {
        name: n.name.clone(),
        id: n.id.clone(),
        tags: n.tags.clone(),
    }
}

fn identity_ref_to_hub(r: &IdentityRef) -> hub::IdentityRef {
    hub::IdentityRef {
        kind: r.kind.clone(),
        name: r.name.clone(),
    }
}

fn identity_ref_from_hub(r: &hub::IdentityRef) -> IdentityRef {
    IdentityRef {
        kind: r.kind.clone(),
        name: r.name.clone(),
    }
}

fn machine_spec_to_hub(s: &OpenStackMachineSpec) -> Result<hub::OpenStackMachineSpec> {
    Ok(hub::OpenStackMachineSpec {
        provider_id: s.provider_id.clone(),
        instance_id: s.instance_id.clone(),
        cloud_name: s.cloud_name.clone(),
        identity_ref: s.identity_ref.as_ref().map(identity_ref_to_hub),
        flavor: s.flavor.clone(),
        image: hub::ImageFilter {
            name: non_empty(&s.image),
            id: non_empty(&s.image_uuid),
        },
        ssh_key_name: s.ssh_key_name.clone(),
        ports: s.ports.iter().map(port_to_hub).collect(),
        security_groups: s
            .security_groups
            .iter()
            .map(|name| hub::SecurityGroupFilter {
                name: name.clone(),
                ..hub::SecurityGroupFilter::default()
            })
            .collect(),
        trunk: s.trunk,
        tags: s.tags.clone(),
        server_metadata: s
            .server_metadata
            .iter()
            .map(|(key, value)| hub::ServerMetadata {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
        config_drive: s.config_drive,
        root_volume: s
            .root_volume
            .as_ref()
            .map(root_volume_to_hub)
            .transpose()?,
        additional_block_devices: Vec::new(),
    })
}

fn machine_spec_from_hub(s: &hub::OpenStackMachineSpec) -> Result<OpenStackMachineSpec> {
    Ok(OpenStackMachineSpec {
        provider_id: s.provider_id.clone(),
        instance_id: s.instance_id.clone(),
        cloud_name: s.cloud_name.clone(),
        identity_ref: s.identity_ref.as_ref().map(identity_ref_from_hub),
        flavor: s.flavor.clone(),
        image: s.image.name.clone().unwrap_or_default(),
        image_uuid: s.image.id.clone().unwrap_or_default(),
        ssh_key_name: s.ssh_key_name.clone(),
        networks: Vec::new(),
        ports: s.ports.iter().map(port_from_hub).collect(),
        security_groups: s.security_groups.iter().map(|g| g.name.clone()).collect(),
        trunk: s.trunk,
        tags: s.tags.clone(),
        server_metadata: s
            .server_metadata
            .iter()
            .map(|m| (m.key.clone(), m.value.clone()))
            .collect(),
        config_drive: s.config_drive,
        root_volume: s
            .root_volume
            .as_ref()
            .map(root_volume_from_hub)
            .transpose()?,
    })
}

fn port_to_hub(p: &PortOpts) -> hub::PortOpts {
    hub::PortOpts {
        network: non_empty(&p.network_id).map(|id| hub::NetworkFilter {
            id,
            ..hub::NetworkFilter::default()
        }),
        description: p.description.clone(),
        fixed_ips: p.fixed_ips.clone(),
    }
}

fn port_from_hub(p: &hub::PortOpts) -> PortOpts {
    PortOpts {
        network_id: p
            .network
            .as_ref()
            .map(|n| n.id.clone())
            .unwrap_or_default(),
        description: p.description.clone(),
        fixed_ips: p.fixed_ips.clone(),
    }
}

fn root_volume_to_hub(v: &RootVolume) -> Result<hub::RootVolume> {
    let size_gib = u32::try_from(v.disk_size).map_err(|_| {
        StructuralError::new(
            "spec.rootVolume.diskSize",
            format!("size must not be negative, got {}", v.disk_size),
        )
    })?;
    Ok(hub::RootVolume {
        size_gib,
        volume_type: v.volume_type.clone(),
    })
}

fn root_volume_from_hub(v: &hub::RootVolume) -> Result<RootVolume> {
    let disk_size = i32::try_from(v.size_gib).map_err(|_| {
        StructuralError::new(
            "spec.rootVolume.sizeGiB",
            format!("{} GiB exceeds the v1alpha7 limit", v.size_gib),
        )
    })?;
    Ok(RootVolume {
        disk_size,
        volume_type: v.volume_type.clone(),
    })
}

fn machine_status_to_hub(s: &OpenStackMachineStatus) -> hub::OpenStackMachineStatus {
    hub::OpenStackMachineStatus {
        ready: s.ready,
        addresses: s
            .addresses
            .iter()
            .map(|a| hub::MachineAddress {
                address_type: a.address_type.clone(),
                address: a.address.clone(),
            })
            .collect(),
        instance_state: s.instance_state.clone(),
        failure_reason: s.failure_reason.clone(),
        failure_message: s.failure_message.clone(),
    }
}

fn machine_status_from_hub(s: &hub::OpenStackMachineStatus) -> OpenStackMachineStatus {
    OpenStackMachineStatus {
        ready: s.ready,
        addresses: s
            .addresses
            .iter()
            .map(|a| MachineAddress {
                address_type: a.address_type.clone(),
                address: a.address.clone(),
            })
            .collect(),
        instance_state: s.instance_state.clone(),
        failure_reason: s.failure_reason.clone(),
        failure_message: s.failure_message.clone(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelity_core::ObjectMeta;

    fn machine(spec: OpenStackMachineSpec) -> OpenStackMachine {
        OpenStackMachine {
            metadata: ObjectMeta::named("worker-0"),
            spec,
            ..OpenStackMachine::default()
        }
    }

    #[test]
    fn image_fields_map_to_filter() {
        let m = machine(OpenStackMachineSpec {
            image: "ubuntu-22.04".to_string(),
            image_uuid: "3b1c".to_string(),
            ..OpenStackMachineSpec::default()
        });
        let hub = machine_to_hub(&m).unwrap();
        assert_eq!(hub.spec.image.name.as_deref(), Some("ubuntu-22.04"));
        assert_eq!(hub.spec.image.id.as_deref(), Some("3b1c"));
        assert_eq!(hub.type_meta.api_version, hub::API_VERSION);

        let back = machine_from_hub(&hub).unwrap();
        assert_eq!(back.spec, m.spec);
    }

    #[test]
    fn deprecated_networks_are_dropped() {
        let m = machine(OpenStackMachineSpec {
            networks: vec![crate::v1alpha7::NetworkParam {
                uuid: "net-1".to_string(),
                fixed_ip: String::new(),
            }],
            ..OpenStackMachineSpec::default()
        });
        let back = machine_from_hub(&machine_to_hub(&m).unwrap()).unwrap();
        assert!(back.spec.networks.is_empty());
    }

    #[test]
    fn negative_root_volume_rejected() {
        let m = machine(OpenStackMachineSpec {
            root_volume: Some(RootVolume {
                disk_size: -1,
                volume_type: String::new(),
            }),
            ..OpenStackMachineSpec::default()
        });
        let err = machine_to_hub(&m).unwrap_err();
        assert_eq!(err.field, "spec.rootVolume.diskSize");
    }

    #[test]
    fn oversized_root_volume_rejected() {
        let hub = hub::OpenStackMachine {
            spec: hub::OpenStackMachineSpec {
                root_volume: Some(hub::RootVolume {
                    size_gib: u32::MAX,
                    volume_type: String::new(),
                }),
                ..hub::OpenStackMachineSpec::default()
            },
            ..hub::OpenStackMachine::default()
        };
        assert!(machine_from_hub(&hub).is_err());
    }

    #[test]
    fn server_metadata_sorted_by_key() {
        let mut spec = OpenStackMachineSpec::default();
        spec.server_metadata.insert("zone".to_string(), "b".to_string());
        spec.server_metadata.insert("role".to_string(), "worker".to_string());
        let hub = machine_to_hub(&machine(spec)).unwrap();
        let keys: Vec<_> = hub.spec.server_metadata.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, ["role", "zone"]);
    }

    #[test]
    fn managed_security_groups_collapse() {
        let spec = OpenStackClusterSpec {
            managed_security_groups: true,
            allow_all_in_cluster_traffic: true,
            ..OpenStackClusterSpec::default()
        };
        let hub = cluster_spec_to_hub(&spec).unwrap();
        assert_eq!(
            hub.managed_security_groups,
            Some(hub::ManagedSecurityGroups {
                allow_all_in_cluster_traffic: true
            })
        );
        assert_eq!(cluster_spec_from_hub(&hub), spec);

        // Without managed groups the flag has nowhere to go.
        let unmanaged = OpenStackClusterSpec {
            allow_all_in_cluster_traffic: true,
            ..OpenStackClusterSpec::default()
        };
        let back = cluster_spec_from_hub(&cluster_spec_to_hub(&unmanaged).unwrap());
        assert!(!back.allow_all_in_cluster_traffic);
    }

    #[test]
    fn invalid_endpoint_port_rejected() {
        let cluster = OpenStackCluster {
            spec: OpenStackClusterSpec {
                control_plane_endpoint: Some(ApiEndpoint {
                    host: "10.0.0.1".to_string(),
                    port: 70000,
                }),
                ..OpenStackClusterSpec::default()
            },
            ..OpenStackCluster::default()
        };
        let err = cluster_to_hub(&cluster).unwrap_err();
        assert_eq!(err.field, "spec.controlPlaneEndpoint.port");
    }

    #[test]
    fn external_network_name_lost_going_down() {
        let spec = hub::OpenStackClusterSpec {
            external_network: Some(hub::NetworkFilter {
                name: "public".to_string(),
                id: "ext-1".to_string(),
            }),
            ..hub::OpenStackClusterSpec::default()
        };
        let down = cluster_spec_from_hub(&spec);
        assert_eq!(down.external_network_id, "ext-1");
        let up = cluster_spec_to_hub(&down).unwrap();
        assert_eq!(up.external_network.unwrap().name, "");
    }

    #[test]
    fn list_conversion_is_element_wise() {
        let list = OpenStackMachineList {
            items: vec![
                machine(OpenStackMachineSpec {
                    flavor: "m1.small".to_string(),
                    ..OpenStackMachineSpec::default()
                }),
                machine(OpenStackMachineSpec {
                    flavor: "m1.large".to_string(),
                    ..OpenStackMachineSpec::default()
                }),
            ],
            ..OpenStackMachineList::default()
        };
        let hub = machine_list_to_hub(&list).unwrap();
        assert_eq!(hub.items.len(), 2);
        assert_eq!(hub.items[1].spec.flavor, "m1.large");
        assert_eq!(hub.type_meta.kind, "OpenStackMachineList");
    }
}
