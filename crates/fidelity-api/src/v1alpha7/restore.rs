//! Field-groups tracked for v1alpha7 records

use super::types::{
    OpenStackCluster, OpenStackClusterTemplate, OpenStackMachine, OpenStackMachineSpec,
    OpenStackMachineTemplate,
};
use super::VERSION;
use fidelity_core::{HashedFieldRestorer, Normalizer, RestorationSpec, SpecError};

/// Restoration specs for every v1alpha7 kind
#[derive(Debug)]
pub struct Restorers {
    /// `OpenStackCluster`: `spec`, `status`
    pub cluster: RestorationSpec<OpenStackCluster>,
    /// `OpenStackClusterTemplate`: `spec`
    pub cluster_template: RestorationSpec<OpenStackClusterTemplate>,
    /// `OpenStackMachine`: `spec`, masking controller-owned ids
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
        assert_eq!(r.cluster.names().len(), 2);
        assert_eq!(r.cluster_template.len(), 1);
        assert_eq!(r.machine_template.len(), 1);
        assert_eq!(r.cluster.version().as_str(), "v1alpha7");
    }

    #[test]
    fn controller_ids_do_not_change_fingerprint() {
        let r = Restorers::new().unwrap();
        let spec = r.machine.get("spec").unwrap();

        let mut machine = OpenStackMachine::default();
        machine.spec.flavor = "m1.small".to_string();
        let before = spec.fingerprint(&machine).unwrap();

        machine.spec.provider_id = Some("openstack:///abc".to_string());
        machine.spec.instance_id = Some("abc".to_string());
        assert_eq!(spec.fingerprint(&machine).unwrap(), before);

        machine.spec.flavor = "m1.large".to_string();
        assert_ne!(spec.fingerprint(&machine).unwrap(), before);
    }
}
