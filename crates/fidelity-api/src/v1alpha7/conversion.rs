//! v1alpha7 <-> v1alpha8 `Convertible` wiring
//!
//! Single kinds go through the orchestrator with both versions' restoration
//! specs. Lists convert element-wise through the structural converters only.

use super::convert;
use super::types::{
    OpenStackCluster, OpenStackClusterList, OpenStackClusterTemplate,
    OpenStackClusterTemplateList, OpenStackMachine, OpenStackMachineList,
    OpenStackMachineTemplate, OpenStackMachineTemplateList,
};
use crate::v1alpha8 as hub;
use crate::Conversions;
use fidelity_core::{ConversionError, Convertible};

macro_rules! tracked {
    ($kind:ident, $group:ident, $to_hub:path, $from_hub:path) => {
        impl Convertible<hub::$kind> for $kind {
            type Context = Conversions;

            fn convert_to(
                &self,
                dst: &mut hub::$kind,
                ctx: &Conversions,
            ) -> Result<(), ConversionError> {
                *dst = ctx.orchestrator().convert_and_restore(
                    self,
                    $to_hub,
                    $from_hub,
                    &ctx.spoke().$group,
                    &ctx.hub().$group,
                )?;
                Ok(())
            }

            fn convert_from(
                &mut self,
                src: &hub::$kind,
                ctx: &Conversions,
            ) -> Result<(), ConversionError> {
                *self = ctx.orchestrator().convert_and_restore(
                    src,
                    $from_hub,
                    $to_hub,
                    &ctx.hub().$group,
                    &ctx.spoke().$group,
                )?;
                Ok(())
            }
        }
    };
}

macro_rules! untracked {
    ($kind:ident, $to_hub:path, $from_hub:path) => {
        impl Convertible<hub::$kind> for $kind {
            type Context = ();

            fn convert_to(&self, dst: &mut hub::$kind, _: &()) -> Result<(), ConversionError> {
                *dst = $to_hub(self)?;
                Ok(())
            }

            fn convert_from(&mut self, src: &hub::$kind, _: &()) -> Result<(), ConversionError> {
                *self = $from_hub(src)?;
                Ok(())
            }
        }
    };
}

tracked!(
    OpenStackCluster,
    cluster,
    convert::cluster_to_hub,
    convert::cluster_from_hub
);
tracked!(
    OpenStackClusterTemplate,
    cluster_template,
    convert::cluster_template_to_hub,
    convert::cluster_template_from_hub
);
tracked!(
    OpenStackMachine,
    machine,
    convert::machine_to_hub,
    convert::machine_from_hub
);
tracked!(
    OpenStackMachineTemplate,
    machine_template,
    convert::machine_template_to_hub,
    convert::machine_template_from_hub
);

untracked!(
    OpenStackClusterList,
    convert::cluster_list_to_hub,
    convert::cluster_list_from_hub
);
untracked!(
    OpenStackClusterTemplateList,
    convert::cluster_template_list_to_hub,
    convert::cluster_template_list_from_hub
);
untracked!(
    OpenStackMachineList,
    convert::machine_list_to_hub,
    convert::machine_list_from_hub
);
untracked!(
    OpenStackMachineTemplateList,
    convert::machine_template_list_to_hub,
    convert::machine_template_list_from_hub
);
