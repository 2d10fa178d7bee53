//! Header inspection for received frames.
//!
//! Nothing here validates the body against the kind; callers pick the
//! matching [`Payload`] type themselves.

use bytes::Buf;

use crate::codec::HEADER_SIZE;
use crate::error::{FrameError, Result};
use crate::mmtype::{self, MmCategory, MmType, Variant};
use crate::payload::Payload;

/// Read the raw wire code, or `None` if `frame` is shorter than the frame header.
pub fn wire_code(frame: &[u8]) -> Option<u16> {
    match frame {
        [_, lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}

/// Kind carried by `frame`.
///
/// `None` when the frame is too short, or when the wire code falls outside
/// the categories and offsets this crate maps.
pub fn mmtype(frame: &[u8]) -> Option<MmType> {
    wire_code(frame).and_then(mmtype::from_code)
}

/// Variant carried by `frame`, from the low two bits of the wire code.
///
/// Every 2-bit value is a defined variant, so this is `None` only for a frame
/// too short to carry a wire code. The bits are not cross-checked against the
/// kind.
pub fn mmtype_variant(frame: &[u8]) -> Option<Variant> {
    wire_code(frame).map(Variant::from_code)
}

/// Parsed frame header and MME sub-header, borrowing the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader<'a> {
    version: u8,
    code: u16,
    fragment_seq: u8,
    fragment_opts: u8,
    body: &'a [u8],
}

impl<'a> FrameHeader<'a> {
    /// Parse the fixed header of `frame`.
    pub fn parse(frame: &'a [u8]) -> Result<Self> {
        if frame.len() < HEADER_SIZE {
            return Err(FrameError::Truncated {
                len: frame.len(),
                required: HEADER_SIZE,
            });
        }

        let mut src = frame;
        let version = src.get_u8();
        let code = src.get_u16_le();
        let fragment_seq = src.get_u8();
        let fragment_opts = src.get_u8();

        Ok(Self {
            version,
            code,
            fragment_seq,
            fragment_opts,
            body: src,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Raw wire code including the variant bits.
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn mmtype(&self) -> Option<MmType> {
        mmtype::from_code(self.code)
    }

    pub fn variant(&self) -> Variant {
        Variant::from_code(self.code)
    }

    pub fn category(&self) -> Option<MmCategory> {
        MmCategory::from_code(self.code)
    }

    pub fn fragment_seq(&self) -> u8 {
        self.fragment_seq
    }

    pub fn fragment_opts(&self) -> u8 {
        self.fragment_opts
    }

    /// True for a frame that is not part of a fragmented message.
    pub fn is_unfragmented(&self) -> bool {
        self.fragment_seq == 0 && self.fragment_opts == 0
    }

    /// Everything after the sub-header, padding included.
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// Decode the body as `P`. The kind and variant are not checked.
    pub fn payload<P: Payload>(&self) -> Result<P> {
        P::decode(self.body)
    }
}
