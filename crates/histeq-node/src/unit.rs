//! Filter unit contract
//!
//! A filter unit is one node in the host's frame graph. The host drives
//! each frame request through a two-phase activation (see
//! [`Activation`]); the unit never blocks between the phases, it simply
//! yields after requesting and is re-activated when its input is ready.

use crate::error::{NodeError, NodeResult};
use histeq_core::{Frame, SampleType, VideoFormat, VideoInfo};

/// Phase of one frame request's activation.
///
/// Exactly two states are reachable per request. `Requesting` issues the
/// single upstream fetch and yields; the transition to `Producing` is
/// driven externally, by the host scheduler, once the upstream frame is
/// available. The closed enum makes any other activation state
/// unrepresentable rather than a defensively handled defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Ask upstream for the input frame, then yield.
    Requesting,
    /// Input available: transform it and hand the output downstream.
    Producing,
}

/// Frame-scheduling contract a unit declares to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Distinct frame indices may be activated concurrently on different
    /// workers; each index's phases still run sequentially.
    Parallel,
    /// One frame at a time.
    Serial,
}

/// One filter node in the host's frame graph.
pub trait FilterUnit: Send + Sync {
    /// Host-visible operation name.
    fn name(&self) -> &'static str;

    /// Declared output stream: identical format and geometry to the
    /// input.
    fn video_info(&self) -> &VideoInfo;

    /// Scheduling contract; both equalization units are [`FilterMode::Parallel`].
    fn mode(&self) -> FilterMode;

    /// Drive one phase of one frame request.
    ///
    /// Returns `Ok(None)` from the requesting phase and the produced
    /// frame from the producing phase.
    fn activate(&self, index: usize, activation: Activation) -> NodeResult<Option<Frame>>;
}

/// Construction-time format validation shared by both units.
///
/// Accepts exactly what the equalization engines can process: a
/// constant-format stream of integer samples stored in one or two bytes.
/// Everything else fails here, before the unit is connected, so no frame
/// is ever requested from a misconfigured unit.
pub(crate) fn validate_format(info: &VideoInfo, unit: &'static str) -> NodeResult<VideoFormat> {
    let Some(format) = info.constant_format() else {
        return Err(NodeError::UnsupportedFormat {
            unit,
            reason: "only constant 8-16 bit int formats supported".to_string(),
        });
    };
    if format.sample_type() != SampleType::Integer
        || !matches!(format.bytes_per_sample(), 1 | 2)
    {
        return Err(NodeError::UnsupportedFormat {
            unit,
            reason: "only constant 8-16 bit int formats supported".to_string(),
        });
    }
    Ok(*format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_integer_formats() {
        let info = VideoInfo::new(VideoFormat::gray(8).unwrap(), 64, 48, 10);
        assert!(validate_format(&info, "EqualizeHist").is_ok());

        let info = VideoInfo::new(VideoFormat::yuv420(16).unwrap(), 64, 48, 10);
        assert!(validate_format(&info, "EqualizeHist").is_ok());

        let info = VideoInfo::new(VideoFormat::gray(10).unwrap(), 64, 48, 10);
        assert!(validate_format(&info, "EqualizeHist").is_ok());
    }

    #[test]
    fn test_validate_rejects_float() {
        let info = VideoInfo::new(VideoFormat::gray_float(), 64, 48, 10);
        let err = validate_format(&info, "CLAHE").unwrap_err();
        assert!(matches!(err, NodeError::UnsupportedFormat { unit: "CLAHE", .. }));
        assert!(err.to_string().contains("8-16 bit int"));
    }

    #[test]
    fn test_validate_rejects_variable() {
        let info = VideoInfo::variable(10);
        assert!(validate_format(&info, "EqualizeHist").is_err());
    }

    #[test]
    fn test_validate_rejects_wide_samples() {
        // 32-bit integer samples are stored in four bytes.
        let info = VideoInfo::new(
            VideoFormat::new(SampleType::Integer, 32, 1, 0, 0).unwrap(),
            64,
            48,
            10,
        );
        assert!(validate_format(&info, "EqualizeHist").is_err());
    }
}
