use hpgp_frame::MmType;

use crate::error;

/// Convert an optional byte pointer + length into a slice.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
pub(crate) unsafe fn bytes_arg<'a>(data: *const u8, len: usize, name: &str) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        error::set_error_message(format!("{name} cannot be null when len > 0"));
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Convert an output buffer pointer + capacity into a mutable slice.
///
/// # Safety
/// If `len > 0`, `buf` must be non-null and writable for `len` bytes, and must
/// not alias any other argument.
pub(crate) unsafe fn bytes_out_arg<'a>(buf: *mut u8, len: usize, name: &str) -> Option<&'a mut [u8]> {
    if len == 0 {
        return Some(&mut []);
    }
    if buf.is_null() {
        error::set_error_message(format!("{name} cannot be null when bufsize > 0"));
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts_mut(buf, len) })
}

/// Resolve a kind ordinal, recording an error for out-of-range values.
pub(crate) fn mmtype_arg(mmtype: u32) -> Option<MmType> {
    let kind = MmType::from_ordinal(mmtype);
    if kind.is_none() {
        error::set_error_message(format!("unknown mmtype ordinal {mmtype}"));
    }
    kind
}
