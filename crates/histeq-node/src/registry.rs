//! Host-visible operation descriptors
//!
//! Data-only descriptions of the two registered operations: names,
//! parameter signatures, and the scheduling mode. A host application uses
//! these to surface the units; the declared output contract for both is
//! one video stream of input-identical format and geometry.

use crate::unit::FilterMode;

/// Kind of one registered parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// An upstream video stream.
    Clip,
    /// A real number.
    Float,
    /// An integer.
    Int,
}

/// One parameter of a registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Parameter name as exposed to the host application.
    pub name: &'static str,
    /// Value kind.
    pub kind: ParamKind,
    /// Whether the host may omit the parameter.
    pub optional: bool,
}

/// One registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDescriptor {
    /// Operation name as exposed to the host application.
    pub name: &'static str,
    /// Parameter signature, in declaration order.
    pub params: &'static [ParamDescriptor],
    /// Scheduling contract.
    pub mode: FilterMode,
}

/// Descriptor for the global equalization operation.
pub const EQUALIZE_HIST: FilterDescriptor = FilterDescriptor {
    name: "EqualizeHist",
    params: &[ParamDescriptor {
        name: "clip",
        kind: ParamKind::Clip,
        optional: false,
    }],
    mode: FilterMode::Parallel,
};

/// Descriptor for the tiled adaptive equalization operation.
pub const CLAHE: FilterDescriptor = FilterDescriptor {
    name: "CLAHE",
    params: &[
        ParamDescriptor {
            name: "clip",
            kind: ParamKind::Clip,
            optional: false,
        },
        ParamDescriptor {
            name: "limit",
            kind: ParamKind::Float,
            optional: true,
        },
        ParamDescriptor {
            name: "tile",
            kind: ParamKind::Int,
            optional: true,
        },
    ],
    mode: FilterMode::Parallel,
};

/// All operations this crate registers.
pub const DESCRIPTORS: &[FilterDescriptor] = &[EQUALIZE_HIST, CLAHE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_signatures() {
        assert_eq!(EQUALIZE_HIST.params.len(), 1);
        assert!(!EQUALIZE_HIST.params[0].optional);

        assert_eq!(CLAHE.params.len(), 3);
        assert_eq!(CLAHE.params[1].name, "limit");
        assert_eq!(CLAHE.params[1].kind, ParamKind::Float);
        assert!(CLAHE.params[1].optional);
        assert_eq!(CLAHE.params[2].name, "tile");
        assert_eq!(CLAHE.params[2].kind, ParamKind::Int);

        assert!(DESCRIPTORS.iter().all(|d| d.mode == FilterMode::Parallel));
    }
}
