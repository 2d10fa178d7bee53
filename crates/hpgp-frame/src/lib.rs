//! HomePlug GreenPHY management message framing.
//!
//! Maps message kinds to and from their 16-bit `mmtype` wire codes and packs
//! SLAC message bodies into caller-owned buffers. Every frame is laid out as:
//! - A 1-byte management message version
//! - A 2-byte little-endian `mmtype` (category, offset, variant)
//! - A 2-byte fragmentation sub-header, always zero here
//! - A fixed-layout body, zero-padded up to the Ethernet minimum
//!
//! Packing and inspection neither allocate nor perform I/O and keep no state
//! between calls. [`FrameWriter`] adds an owned buffer and a `Write` sink.

pub mod codec;
pub mod error;
pub mod inspect;
pub mod mmtype;
pub mod payload;
pub mod writer;

pub use codec::{
    body_size, frame_len, pack, pack_confirm, pack_indication, pack_payload,
    pack_payload_with_config, pack_request, pack_response, pack_with_config, PackConfig,
    HEADER_SIZE, MAX_FRAME_LEN, MIN_FRAME_LEN, MMV,
};
pub use error::{FrameError, Result};
pub use inspect::{mmtype, mmtype_variant, wire_code, FrameHeader};
pub use mmtype::{MmCategory, MmType, ParseError, Variant};
pub use payload::{
    AttenCharInd, AttenCharRsp, GetKeyCnf, GetKeyReq, MnbcSoundInd, Payload, SetKeyCnf,
    SetKeyReq, SlacMatchCnf, SlacMatchReq, SlacParmCnf, SlacParmReq, StartAttenCharInd,
};
pub use writer::FrameWriter;
