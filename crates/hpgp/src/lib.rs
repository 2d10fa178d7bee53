//! HomePlug GreenPHY SLAC management message framing.
//!
//! # Crate Structure
//!
//! - [`frame`]: kind and wire-code mapping, frame packing, header inspection,
//!   and the fixed-layout SLAC message bodies
//!
//! The `hpgp` binary (feature `cli`) packs and inspects frames from the
//! command line.

/// Re-export frame types.
pub mod frame {
    pub use hpgp_frame::*;
}

pub use hpgp_frame::{FrameError, MmType, Result, Variant};
