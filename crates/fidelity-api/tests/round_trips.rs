//! Per-kind round trips between v1alpha7 and v1alpha8

use fidelity_api::{v1alpha7, v1alpha8};
use fidelity_core::Convertible;
use fidelity_test_utils::{
    conversions, engine_entries, foreign_annotations, hub_cluster, hub_machine, spoke_cluster,
    spoke_cluster_template, spoke_machine, spoke_machine_spec, spoke_machine_template,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn cluster_round_trip_is_clean() {
    let ctx = conversions();
    let original = spoke_cluster();

    let mut hub = v1alpha8::OpenStackCluster::default();
    original.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(hub.spec.external_network.as_ref().unwrap().id, "ext-net-1");
    assert_eq!(hub.spec.control_plane_endpoint.as_ref().unwrap().port, 6443);

    let mut back = v1alpha7::OpenStackCluster::default();
    back.convert_from(&hub, &ctx).unwrap();
    assert_eq!(back.spec, original.spec);
    assert_eq!(back.status, original.status);
    assert_eq!(back.metadata.name, original.metadata.name);
}

#[test]
fn cluster_spoke_only_fields_restored() {
    let ctx = conversions();
    let mut original = spoke_cluster();
    original.spec.api_server_load_balancer.provider = "ovn".to_string();
    original.spec.managed_security_groups = false;
    original.spec.allow_all_in_cluster_traffic = true;
    original.status.failure_reason = Some("InsufficientResources".to_string());

    let mut hub = v1alpha8::OpenStackCluster::default();
    original.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(hub.spec.managed_security_groups, None);

    let mut back = v1alpha7::OpenStackCluster::default();
    back.convert_from(&hub, &ctx).unwrap();
    assert_eq!(back.spec, original.spec);
    assert_eq!(back.status, original.status);
}

#[test]
fn cluster_hub_only_fields_restored() {
    let ctx = conversions();
    let original = hub_cluster();

    let mut spoke = v1alpha7::OpenStackCluster::default();
    spoke.convert_from(&original, &ctx).unwrap();
    assert_eq!(spoke.spec.external_network_id, "ext-net-1");

    let mut hub = v1alpha8::OpenStackCluster::default();
    spoke.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(hub.spec, original.spec);
    assert_eq!(hub.status, original.status);
    assert_eq!(
        hub.status.bastion.unwrap().resolved_image_id.as_deref(),
        Some("img-42")
    );
}

#[test]
fn cluster_spoke_edit_wins_over_hub_data() {
    let ctx = conversions();
    let original = hub_cluster();

    let mut spoke = v1alpha7::OpenStackCluster::default();
    spoke.convert_from(&original, &ctx).unwrap();
    spoke.spec.external_network_id = "ext-net-2".to_string();

    let mut hub = v1alpha8::OpenStackCluster::default();
    spoke.convert_to(&mut hub, &ctx).unwrap();
    let network = hub.spec.external_network.unwrap();
    assert_eq!(network.id, "ext-net-2");
    assert_eq!(network.name, "");
    // Status was not touched and still comes back.
    assert_eq!(hub.status, original.status);
}

#[test]
fn second_lap_is_identical() {
    let ctx = conversions();
    let mut original = spoke_cluster();
    original.spec.api_server_load_balancer.provider = "ovn".to_string();

    let mut first = v1alpha8::OpenStackCluster::default();
    original.convert_to(&mut first, &ctx).unwrap();
    let mut back = v1alpha7::OpenStackCluster::default();
    back.convert_from(&first, &ctx).unwrap();
    let mut second = v1alpha8::OpenStackCluster::default();
    back.convert_to(&mut second, &ctx).unwrap();

    assert_eq!(second, first);
    assert_eq!(
        serde_json::to_string(&second).unwrap(),
        serde_json::to_string(&first).unwrap()
    );
}

#[test]
fn foreign_annotations_survive() {
    let ctx = conversions();
    let mut original = spoke_cluster();
    original.metadata.annotations.insert(
        "cluster.x-k8s.io/paused".to_string(),
        "true".to_string(),
    );

    let mut hub = v1alpha8::OpenStackCluster::default();
    original.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(foreign_annotations(&hub), foreign_annotations(&original));
    assert!(!engine_entries(&hub).is_empty());
}

#[test]
fn cluster_template_round_trip_restores_provider() {
    let ctx = conversions();
    let mut original = spoke_cluster_template();
    original.spec.template.spec.api_server_load_balancer.provider = "amphora".to_string();

    let mut hub = v1alpha8::OpenStackClusterTemplate::default();
    original.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(hub.type_meta.kind, "OpenStackClusterTemplate");

    let mut back = v1alpha7::OpenStackClusterTemplate::default();
    back.convert_from(&hub, &ctx).unwrap();
    assert_eq!(back.spec, original.spec);
}

#[test]
fn cluster_template_hub_filter_name_restored() {
    let ctx = conversions();
    let original = v1alpha8::OpenStackClusterTemplate {
        spec: v1alpha8::OpenStackClusterTemplateSpec {
            template: v1alpha8::OpenStackClusterTemplateResource {
                spec: hub_cluster().spec,
            },
        },
        ..v1alpha8::OpenStackClusterTemplate::default()
    };

    let mut spoke = v1alpha7::OpenStackClusterTemplate::default();
    spoke.convert_from(&original, &ctx).unwrap();
    let mut hub = v1alpha8::OpenStackClusterTemplate::default();
    spoke.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(hub.spec, original.spec);
}

#[test]
fn machine_deprecated_networks_restored() {
    let ctx = conversions();
    let mut original = spoke_machine();
    original.spec.networks = vec![v1alpha7::NetworkParam {
        uuid: "net-legacy".to_string(),
        fixed_ip: "10.6.0.15".to_string(),
    }];

    let mut hub = v1alpha8::OpenStackMachine::default();
    original.convert_to(&mut hub, &ctx).unwrap();

    let mut back = v1alpha7::OpenStackMachine::default();
    back.convert_from(&hub, &ctx).unwrap();
    assert_eq!(back.spec.networks, original.spec.networks);
    assert_eq!(back.spec, original.spec);
}

#[test]
fn machine_hub_block_devices_restored() {
    let ctx = conversions();
    let original = hub_machine();

    let mut spoke = v1alpha7::OpenStackMachine::default();
    spoke.convert_from(&original, &ctx).unwrap();
    let mut hub = v1alpha8::OpenStackMachine::default();
    spoke.convert_to(&mut hub, &ctx).unwrap();

    assert_eq!(hub.spec.additional_block_devices, original.spec.additional_block_devices);
    assert_eq!(hub.spec, original.spec);
}

#[test]
fn machine_structural_failure_leaves_destination() {
    let ctx = conversions();
    let mut original = spoke_machine();
    original.spec.root_volume = Some(v1alpha7::RootVolume {
        disk_size: -20,
        volume_type: String::new(),
    });

    let mut hub = hub_machine();
    let before = hub.clone();
    let err = original.convert_to(&mut hub, &ctx).unwrap_err();
    assert!(err.is_structural());
    assert_eq!(hub, before);
}

#[test]
fn machine_template_round_trip() {
    let ctx = conversions();
    let mut original = spoke_machine_template();
    original.spec.template.spec.networks = vec![v1alpha7::NetworkParam {
        uuid: "net-legacy".to_string(),
        fixed_ip: String::new(),
    }];

    let mut hub = v1alpha8::OpenStackMachineTemplate::default();
    original.convert_to(&mut hub, &ctx).unwrap();
    assert_eq!(
        hub.spec.template.spec.image.name.as_deref(),
        Some("ubuntu-2204-kube-v1.28")
    );

    let mut back = v1alpha7::OpenStackMachineTemplate::default();
    back.convert_from(&hub, &ctx).unwrap();
    assert_eq!(back.spec, original.spec);
}

#[test]
fn lists_carry_no_fingerprints() {
    let list = v1alpha7::OpenStackMachineList {
        items: vec![spoke_machine(), spoke_machine()],
        ..v1alpha7::OpenStackMachineList::default()
    };

    let mut hub = v1alpha8::OpenStackMachineList::default();
    list.convert_to(&mut hub, &()).unwrap();
    assert_eq!(hub.items.len(), 2);
    assert!(hub.items.iter().all(|m| engine_entries(m).is_empty()));

    let mut back = v1alpha7::OpenStackMachineList::default();
    back.convert_from(&hub, &()).unwrap();
    assert_eq!(back.items[0].spec, list.items[0].spec);
}

#[test]
fn cluster_and_template_lists_convert() {
    let clusters = v1alpha8::OpenStackClusterList {
        items: vec![hub_cluster()],
        ..v1alpha8::OpenStackClusterList::default()
    };
    let mut spoke = v1alpha7::OpenStackClusterList::default();
    spoke.convert_from(&clusters, &()).unwrap();
    assert_eq!(spoke.items[0].spec.external_network_id, "ext-net-1");

    let templates = v1alpha7::OpenStackMachineTemplateList {
        items: vec![spoke_machine_template()],
        ..v1alpha7::OpenStackMachineTemplateList::default()
    };
    let mut hub = v1alpha8::OpenStackMachineTemplateList::default();
    templates.convert_to(&mut hub, &()).unwrap();
    assert_eq!(hub.items[0].spec.template.spec.flavor, "m1.medium");

    let cluster_templates = v1alpha7::OpenStackClusterTemplateList {
        items: vec![spoke_cluster_template()],
        ..v1alpha7::OpenStackClusterTemplateList::default()
    };
    let mut hub = v1alpha8::OpenStackClusterTemplateList::default();
    cluster_templates.convert_to(&mut hub, &()).unwrap();
    assert_eq!(hub.items.len(), 1);
}

prop_compose! {
    fn machine_spec()(
        flavor in "[a-z0-9.]{1,12}",
        image in "[a-z0-9-]{0,20}",
        image_uuid in "[a-f0-9-]{0,12}",
        networks in proptest::collection::vec(("[a-z0-9-]{1,8}", "[0-9.]{0,15}"), 0..3),
        metadata in proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..4),
        disk in proptest::option::of(0i32..2048),
        provider_id in proptest::option::of("openstack:///[a-f0-9]{8}"),
    ) -> v1alpha7::OpenStackMachineSpec {
        v1alpha7::OpenStackMachineSpec {
            provider_id,
            flavor,
            image,
            image_uuid,
            networks: networks
                .into_iter()
                .map(|(uuid, fixed_ip)| v1alpha7::NetworkParam { uuid, fixed_ip })
                .collect(),
            server_metadata: metadata,
            root_volume: disk.map(|disk_size| v1alpha7::RootVolume {
                disk_size,
                volume_type: String::new(),
            }),
            ..spoke_machine_spec()
        }
    }
}

proptest! {
    #[test]
    fn machine_round_trip_is_lossless_and_stable(spec in machine_spec()) {
        let ctx = conversions();
        let original = v1alpha7::OpenStackMachine { spec, ..spoke_machine() };

        let mut first = v1alpha8::OpenStackMachine::default();
        original.convert_to(&mut first, &ctx).unwrap();
        let mut back = v1alpha7::OpenStackMachine::default();
        back.convert_from(&first, &ctx).unwrap();
        let mut second = v1alpha8::OpenStackMachine::default();
        back.convert_to(&mut second, &ctx).unwrap();

        prop_assert_eq!(&back.spec, &original.spec);
        prop_assert_eq!(second, first);
    }
}
