//! HVAC heating and cooling process calculations.
//!
//! Each process is a pure function `(inlet flow, target) -> ProcessResult`;
//! there is no persistent process object. Heating is a sensible closed-form
//! balance. Cooling runs through the bypass-factor coil model, which solves
//! for the outlet temperature when the target is a relative humidity or a
//! heat load.

pub mod coil;
pub mod cooling;
pub mod error;
pub mod heating;
pub mod result;

pub use coil::Coolant;
pub use error::{ProcessError, ProcessResultOf};
pub use result::ProcessResult;
