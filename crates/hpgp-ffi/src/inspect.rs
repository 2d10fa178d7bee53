use hpgp_frame::MmType;

use crate::args::bytes_arg;
use crate::types::{HPGP_MMTYPE_MAX, HPGP_MMTYPE_VARIANT_NONE};

/// Kind ordinal carried by a received frame, or `HPGP_MMTYPE_MAX` when the
/// frame is too short or its wire code is not one this library maps.
///
/// # Safety
/// `frame` must be readable for `len` bytes (or `len` must be 0).
#[no_mangle]
pub unsafe extern "C" fn hpgp_mmtype(frame: *const u8, len: usize) -> u32 {
    crate::ffi_boundary(HPGP_MMTYPE_MAX, || {
        // SAFETY: The caller guarantees `frame` is readable for `len` bytes.
        let Some(frame) = (unsafe { bytes_arg(frame, len, "frame") }) else {
            return HPGP_MMTYPE_MAX;
        };
        hpgp_frame::mmtype(frame).map_or(HPGP_MMTYPE_MAX, MmType::ordinal)
    })
}

/// Variant (0..=3) carried by a received frame, or -1 when the frame is too
/// short to carry a wire code. The bits are not checked against the kind.
///
/// # Safety
/// `frame` must be readable for `len` bytes (or `len` must be 0).
#[no_mangle]
pub unsafe extern "C" fn hpgp_mmtype_variant(frame: *const u8, len: usize) -> i32 {
    crate::ffi_boundary(HPGP_MMTYPE_VARIANT_NONE, || {
        // SAFETY: The caller guarantees `frame` is readable for `len` bytes.
        let Some(frame) = (unsafe { bytes_arg(frame, len, "frame") }) else {
            return HPGP_MMTYPE_VARIANT_NONE;
        };
        hpgp_frame::mmtype_variant(frame).map_or(HPGP_MMTYPE_VARIANT_NONE, |v| v as i32)
    })
}

/// Wire code (variant bits clear) for a kind ordinal, or 0 if the ordinal is
/// unknown.
#[no_mangle]
pub extern "C" fn hpgp_mmtype_code(mmtype: u32) -> u16 {
    crate::ffi_boundary(0, || hpgp_frame::mmtype::code_for_ordinal(mmtype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        HPGP_MMTYPE_CNF, HPGP_MMTYPE_DISCOVER_LIST, HPGP_MMTYPE_RSP, HPGP_MMTYPE_SLAC_MATCH,
    };

    #[test]
    fn inspect_wire_codes() {
        let frame = [1u8, 0x7D, 0x60, 0, 0];

        // SAFETY: `frame` is valid for its length.
        unsafe {
            assert_eq!(hpgp_mmtype(frame.as_ptr(), frame.len()), HPGP_MMTYPE_SLAC_MATCH);
            assert_eq!(hpgp_mmtype_variant(frame.as_ptr(), frame.len()), HPGP_MMTYPE_CNF);
        }
    }

    #[test]
    fn discover_list_lives_in_sta_cco() {
        let frame = [1u8, 0x17, 0x00];

        // SAFETY: `frame` is valid for its length.
        unsafe {
            assert_eq!(hpgp_mmtype(frame.as_ptr(), frame.len()), HPGP_MMTYPE_DISCOVER_LIST);
            assert_eq!(hpgp_mmtype_variant(frame.as_ptr(), frame.len()), HPGP_MMTYPE_RSP);
        }
    }

    #[test]
    fn unmapped_and_short_frames() {
        let proxy = [1u8, 0x14, 0x20];
        let short = [1u8, 0x14];

        // SAFETY: Both frames are valid for their lengths; the null frame has length 0.
        unsafe {
            assert_eq!(hpgp_mmtype(proxy.as_ptr(), proxy.len()), HPGP_MMTYPE_MAX);
            assert_eq!(hpgp_mmtype(short.as_ptr(), short.len()), HPGP_MMTYPE_MAX);
            assert_eq!(
                hpgp_mmtype_variant(short.as_ptr(), short.len()),
                HPGP_MMTYPE_VARIANT_NONE
            );
            assert_eq!(hpgp_mmtype(std::ptr::null(), 0), HPGP_MMTYPE_MAX);
        }
    }

    #[test]
    fn code_for_ordinal() {
        assert_eq!(hpgp_mmtype_code(HPGP_MMTYPE_DISCOVER_LIST), 0x0014);
        assert_eq!(hpgp_mmtype_code(HPGP_MMTYPE_SLAC_MATCH), 0x607C);
        assert_eq!(hpgp_mmtype_code(HPGP_MMTYPE_MAX), 0);
    }
}
