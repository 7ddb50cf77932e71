//! Field-groups tracked for v1alpha8 records
//!
//! Hub-only information (filter names and ids, extra block devices, the
//! resolved bastion image) is kept here across a trip through v1alpha7.

use super::types::{
    OpenStackCluster, OpenStackClusterTemplate, OpenStackMachine, OpenStackMachineSpec,
    OpenStackMachineTemplate,
};
use super::VERSION;
use fidelity_core::{HashedFieldRestorer, Normalizer, RestorationSpec, SpecError};

/// Restoration specs for every v1alpha8 kind
#[derive(Debug)]
pub struct Restorers {
    /// `OpenStackCluster`: `spec`, `status`
    pub cluster: RestorationSpec<OpenStackCluster>,
    /// `OpenStackClusterTemplate`: `spec`
    pub cluster_template: RestorationSpec<OpenStackClusterTemplate>,
    /// `OpenStackMachine`: `spec`
    pub machine: RestorationSpec<OpenStackMachine>,
    /// `OpenStackMachineTemplate`: `spec`
    pub machine_template: RestorationSpec<OpenStackMachineTemplate>,
}

impl Restorers {
    /// Build all specs
    ///
    /// # Errors
    /// Returns error if a spec is malformed
    pub fn new() -> Result<Self, SpecError> {
        let cluster = RestorationSpec::new(VERSION)?
            .with_group(
                "spec",
                HashedFieldRestorer::new(
                    |c: &OpenStackCluster| &c.spec,
                    |c: &mut OpenStackCluster| &mut c.spec,
                ),
            )?
            .with_group(
                "status",
                HashedFieldRestorer::new(
                    |c: &OpenStackCluster| &c.status,
                    |c: &mut OpenStackCluster| &mut c.status,
                ),
            )?;

        let cluster_template = RestorationSpec::new(VERSION)?.with_group(
            "spec",
            HashedFieldRestorer::new(
                |t: &OpenStackClusterTemplate| &t.spec.template.spec,
                |t: &mut OpenStackClusterTemplate| &mut t.spec.template.spec,
            ),
        )?;

        let machine = RestorationSpec::new(VERSION)?.with_group(
            "spec",
            HashedFieldRestorer::new(
                |m: &OpenStackMachine| &m.spec,
                |m: &mut OpenStackMachine| &mut m.spec,
            )
            .with_normalizer(CONTROLLER_OWNED),
        )?;

        let machine_template = RestorationSpec::new(VERSION)?.with_group(
            "spec",
            HashedFieldRestorer::new(
                |t: &OpenStackMachineTemplate| &t.spec.template.spec,
                |t: &mut OpenStackMachineTemplate| &mut t.spec.template.spec,
            ),
        )?;

        Ok(Self {
            cluster,
            cluster_template,
            machine,
            machine_template,
        })
    }
}

/// `providerID` and `instanceID` are written by the machine controller
const CONTROLLER_OWNED: Normalizer<OpenStackMachineSpec> =
    Normalizer::new("controller-owned", strip_controller_owned, retain_controller_owned);

fn strip_controller_owned(spec: &OpenStackMachineSpec) -> OpenStackMachineSpec {
    OpenStackMachineSpec {
        provider_id: None,
        instance_id: None,
        ..spec.clone()
    }
}

fn retain_controller_owned(restored: &mut OpenStackMachineSpec, live: &OpenStackMachineSpec) {
    restored.provider_id.clone_from(&live.provider_id);
    restored.instance_id.clone_from(&live.instance_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_per_kind() {
        let r = Restorers::new().unwrap();
        assert_eq!(r.cluster.len(), 2);
        assert!(r.cluster.contains("status"));
        assert!(r.cluster_template.contains("spec"));
        assert_eq!(r.machine.get("spec").unwrap().normalizer_name(), Some("controller-owned"));
        assert_eq!(r.machine_template.get("spec").unwrap().normalizer_name(), None);
        assert_eq!(r.machine.version().as_str(), VERSION);
    }

    #[test]
    fn controller_fields_masked() {
        let spec = OpenStackMachineSpec {
            provider_id: Some("openstack:///abc".to_string()),
            instance_id: Some("abc".to_string()),
            flavor: "m1.small".to_string(),
            ..OpenStackMachineSpec::default()
        };
        let stripped = CONTROLLER_OWNED.apply(&spec);
        assert_eq!(stripped.provider_id, None);
        assert_eq!(stripped.instance_id, None);
        assert_eq!(stripped.flavor, "m1.small");
        assert_eq!(CONTROLLER_OWNED.apply(&stripped), stripped);
    }
}
