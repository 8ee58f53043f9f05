//! histeq-test - Test support for the histeq workspace
//!
//! The pipeline has no file I/O, so test inputs are synthesized:
//! deterministic frame builders with known histograms, plus
//! [`ScriptedSource`], an in-memory [`FrameSource`] that counts every
//! request/fetch/release so tests can assert the units' resource
//! accounting, and [`run_frame`], which drives one frame request through
//! both activation phases the way the host scheduler would.

mod frames;
mod source;

pub use frames::{bimodal_frame, flat_frame, gradient_frame, noise_frame, ramp_frame};
pub use source::ScriptedSource;

use histeq_core::Frame;
use histeq_node::{Activation, FilterUnit, NodeResult};

/// Drive one frame request through both activation phases.
///
/// Mirrors the host scheduler: activate the unit in its requesting phase,
/// observe it yield, then re-activate it in its producing phase once the
/// input is available (immediately, for an in-memory source).
///
/// # Panics
///
/// Panics if the unit produces during the requesting phase or yields
/// nothing during the producing phase — both are contract violations.
pub fn run_frame(unit: &dyn FilterUnit, index: usize) -> NodeResult<Frame> {
    let early = unit.activate(index, Activation::Requesting)?;
    assert!(
        early.is_none(),
        "unit produced a frame during the requesting phase"
    );
    let frame = unit.activate(index, Activation::Producing)?;
    Ok(frame.expect("unit yielded no frame during the producing phase"))
}
