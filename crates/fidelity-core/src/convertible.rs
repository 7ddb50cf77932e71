//! Hub-and-spoke conversion
//!
//! Every non-storage ("spoke") version converts to and from the storage
//! ("hub") version. Implementations route through
//! [`ConversionOrchestrator`](crate::orchestrator::ConversionOrchestrator);
//! list kinds convert element-wise without fidelity tracking.

use crate::error::ConversionError;

/// A spoke type convertible to and from hub type `H`
///
/// `Context` carries whatever the implementation needs at call time (the
/// orchestrator and the restoration specs), built once by the caller.
///
/// # Contract
/// On error the destination is left exactly as it was.
pub trait Convertible<H> {
    /// Start-up state shared by all conversions
    type Context;

    /// Convert `self` into the hub version, replacing `dst`
    ///
    /// # Errors
    /// Returns error if the conversion fails
    fn convert_to(&self, dst: &mut H, ctx: &Self::Context) -> Result<(), ConversionError>;

    /// Replace `self` with the conversion of hub record `src`
    ///
    /// # Errors
    /// Returns error if the conversion fails
    fn convert_from(&mut self, src: &H, ctx: &Self::Context) -> Result<(), ConversionError>;
}
