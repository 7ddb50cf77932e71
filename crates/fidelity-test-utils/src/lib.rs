//! Testing utilities for the fidelity workspace
//!
//! Shared fixtures and side-channel helpers.

#![allow(missing_docs)]

use fidelity_api::{v1alpha7, v1alpha8, Conversions};
use fidelity_core::{Annotations, FidelityConfig, KeyScheme, ObjectMeta, Resource, TypeMeta};
use std::collections::BTreeMap;

pub fn conversions() -> Conversions {
    Conversions::new(FidelityConfig::default()).unwrap()
}

pub fn meta(name: &str) -> ObjectMeta {
    ObjectMeta::named(name).with_namespace("default")
}

pub fn spoke_cluster() -> v1alpha7::OpenStackCluster {
    v1alpha7::OpenStackCluster {
        type_meta: TypeMeta::new(v1alpha7::API_VERSION, "OpenStackCluster"),
        metadata: meta("capi-quickstart"),
        spec: v1alpha7::OpenStackClusterSpec {
            cloud_name: "openstack".to_string(),
            identity_ref: Some(v1alpha7::IdentityRef {
                kind: "Secret".to_string(),
                name: "capi-quickstart-cloud-config".to_string(),
            }),
            external_network_id: "ext-net-1".to_string(),
            managed_security_groups: true,
            allow_all_in_cluster_traffic: false,
            api_server_load_balancer: v1alpha7::ApiServerLoadBalancer {
                enabled: true,
                additional_ports: vec![8443],
                allowed_cidrs: vec!["10.0.0.0/8".to_string()],
                provider: String::new(),
            },
            control_plane_endpoint: Some(v1alpha7::ApiEndpoint {
                host: "192.0.2.10".to_string(),
                port: 6443,
            }),
            tags: vec!["env-test".to_string()],
            ..v1alpha7::OpenStackClusterSpec::default()
        },
        status: v1alpha7::OpenStackClusterStatus {
            ready: true,
            network: Some(v1alpha7::NetworkStatus {
                name: "k8s-clusterapi-cluster-default-capi-quickstart".to_string(),
                id: "net-1".to_string(),
                tags: Vec::new(),
            }),
            ..v1alpha7::OpenStackClusterStatus::default()
        },
    }
}

pub fn spoke_machine_spec() -> v1alpha7::OpenStackMachineSpec {
    let mut server_metadata = BTreeMap::new();
    server_metadata.insert("role".to_string(), "worker".to_string());
    v1alpha7::OpenStackMachineSpec {
        cloud_name: "openstack".to_string(),
        flavor: "m1.medium".to_string(),
        image: "ubuntu-2204-kube-v1.28".to_string(),
        ssh_key_name: "cluster-admin".to_string(),
        ports: vec![v1alpha7::PortOpts {
            network_id: "net-1".to_string(),
            description: "primary".to_string(),
            fixed_ips: Vec::new(),
        }],
        security_groups: vec!["default".to_string()],
        server_metadata,
        root_volume: Some(v1alpha7::RootVolume {
            disk_size: 50,
            volume_type: "ssd".to_string(),
        }),
        ..v1alpha7::OpenStackMachineSpec::default()
    }
}

pub fn spoke_machine() -> v1alpha7::OpenStackMachine {
    v1alpha7::OpenStackMachine {
        type_meta: TypeMeta::new(v1alpha7::API_VERSION, "OpenStackMachine"),
        metadata: meta("capi-quickstart-md-0-x7k2p"),
        spec: spoke_machine_spec(),
        status: v1alpha7::OpenStackMachineStatus::default(),
    }
}

pub fn spoke_machine_template() -> v1alpha7::OpenStackMachineTemplate {
    v1alpha7::OpenStackMachineTemplate {
        type_meta: TypeMeta::new(v1alpha7::API_VERSION, "OpenStackMachineTemplate"),
        metadata: meta("capi-quickstart-md-0"),
        spec: v1alpha7::OpenStackMachineTemplateSpec {
            template: v1alpha7::OpenStackMachineTemplateResource {
                spec: spoke_machine_spec(),
            },
        },
    }
}

pub fn spoke_cluster_template() -> v1alpha7::OpenStackClusterTemplate {
    v1alpha7::OpenStackClusterTemplate {
        type_meta: TypeMeta::new(v1alpha7::API_VERSION, "OpenStackClusterTemplate"),
        metadata: meta("capi-quickstart"),
        spec: v1alpha7::OpenStackClusterTemplateSpec {
            template: v1alpha7::OpenStackClusterTemplateResource {
                spec: spoke_cluster().spec,
            },
        },
    }
}

pub fn hub_machine() -> v1alpha8::OpenStackMachine {
    v1alpha8::OpenStackMachine {
        type_meta: TypeMeta::new(v1alpha8::API_VERSION, "OpenStackMachine"),
        metadata: meta("capi-quickstart-md-0-x7k2p"),
        spec: v1alpha8::OpenStackMachineSpec {
            flavor: "m1.medium".to_string(),
            image: v1alpha8::ImageFilter {
                name: Some("ubuntu-2204-kube-v1.28".to_string()),
                id: None,
            },
            additional_block_devices: vec![v1alpha8::AdditionalBlockDevice {
                name: "etcd".to_string(),
                size_gib: 10,
                volume_type: "ssd".to_string(),
            }],
            ..v1alpha8::OpenStackMachineSpec::default()
        },
        status: v1alpha8::OpenStackMachineStatus::default(),
    }
}

pub fn hub_cluster() -> v1alpha8::OpenStackCluster {
    v1alpha8::OpenStackCluster {
        type_meta: TypeMeta::new(v1alpha8::API_VERSION, "OpenStackCluster"),
        metadata: meta("capi-quickstart"),
        spec: v1alpha8::OpenStackClusterSpec {
            external_network: Some(v1alpha8::NetworkFilter {
                name: "public".to_string(),
                id: "ext-net-1".to_string(),
            }),
            managed_security_groups: Some(v1alpha8::ManagedSecurityGroups {
                allow_all_in_cluster_traffic: true,
            }),
            ..v1alpha8::OpenStackClusterSpec::default()
        },
        status: v1alpha8::OpenStackClusterStatus {
            ready: true,
            bastion: Some(v1alpha8::BastionStatus {
                id: "bastion-1".to_string(),
                name: "capi-quickstart-bastion".to_string(),
                resolved_image_id: Some("img-42".to_string()),
                ..v1alpha8::BastionStatus::default()
            }),
            ..v1alpha8::OpenStackClusterStatus::default()
        },
    }
}

/// Engine entries on a record, keyed by annotation key
pub fn engine_entries<R: Resource>(record: &R) -> Annotations {
    let keys = KeyScheme::default();
    record
        .meta()
        .annotations
        .iter()
        .filter(|(k, _)| keys.owns(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Annotations that do not belong to the engine
pub fn foreign_annotations<R: Resource>(record: &R) -> Annotations {
    let keys = KeyScheme::default();
    record
        .meta()
        .annotations
        .iter()
        .filter(|(k, _)| !keys.owns(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
