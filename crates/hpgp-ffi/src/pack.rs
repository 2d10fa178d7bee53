use hpgp_frame::Variant;

use crate::args::{bytes_arg, bytes_out_arg, mmtype_arg};
use crate::error;

/// # Safety
/// See [`hpgp_pack_request`].
unsafe fn pack_ffi(
    mmtype: u32,
    variant: Variant,
    data: *const u8,
    data_len: usize,
    buf: *mut u8,
    bufsize: usize,
) -> usize {
    crate::ffi_boundary(0, || {
        error::clear_error_state();

        let Some(kind) = mmtype_arg(mmtype) else {
            return 0;
        };
        // SAFETY: The caller guarantees `data` is readable for `data_len` bytes.
        let Some(payload) = (unsafe { bytes_arg(data, data_len, "data") }) else {
            return 0;
        };
        // SAFETY: The caller guarantees `buf` is writable for `bufsize` bytes.
        let Some(out) = (unsafe { bytes_out_arg(buf, bufsize, "buf") }) else {
            return 0;
        };

        match hpgp_frame::pack(kind, variant, payload, out) {
            Ok(len) => len,
            Err(err) => {
                error::map_frame_error(&err);
                0
            }
        }
    })
}

/// Pack a request frame for kind ordinal `mmtype` into `buf`.
///
/// Returns the body length (excluding the 5 header bytes), or 0 when the kind
/// carries no request body, the kind ordinal is unknown, or `bufsize` is below
/// the header size. The last two cases set `hpgp_last_error`.
///
/// # Safety
/// `data` must be readable for `data_len` bytes (or `data_len` must be 0).
/// `buf` must be writable for `bufsize` bytes (or `bufsize` must be 0), and
/// must not overlap `data`.
#[no_mangle]
pub unsafe extern "C" fn hpgp_pack_request(
    mmtype: u32,
    data: *const u8,
    data_len: usize,
    buf: *mut u8,
    bufsize: usize,
) -> usize {
    // SAFETY: Forwarded caller guarantees.
    unsafe { pack_ffi(mmtype, Variant::Request, data, data_len, buf, bufsize) }
}

/// Pack a confirm frame. See [`hpgp_pack_request`].
///
/// # Safety
/// Same requirements as [`hpgp_pack_request`].
#[no_mangle]
pub unsafe extern "C" fn hpgp_pack_confirm(
    mmtype: u32,
    data: *const u8,
    data_len: usize,
    buf: *mut u8,
    bufsize: usize,
) -> usize {
    // SAFETY: Forwarded caller guarantees.
    unsafe { pack_ffi(mmtype, Variant::Confirm, data, data_len, buf, bufsize) }
}

/// Pack an indication frame. See [`hpgp_pack_request`].
///
/// # Safety
/// Same requirements as [`hpgp_pack_request`].
#[no_mangle]
pub unsafe extern "C" fn hpgp_pack_indication(
    mmtype: u32,
    data: *const u8,
    data_len: usize,
    buf: *mut u8,
    bufsize: usize,
) -> usize {
    // SAFETY: Forwarded caller guarantees.
    unsafe { pack_ffi(mmtype, Variant::Indication, data, data_len, buf, bufsize) }
}

/// Pack a response frame. See [`hpgp_pack_request`].
///
/// # Safety
/// Same requirements as [`hpgp_pack_request`].
#[no_mangle]
pub unsafe extern "C" fn hpgp_pack_response(
    mmtype: u32,
    data: *const u8,
    data_len: usize,
    buf: *mut u8,
    bufsize: usize,
) -> usize {
    // SAFETY: Forwarded caller guarantees.
    unsafe { pack_ffi(mmtype, Variant::Response, data, data_len, buf, bufsize) }
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;
    use crate::types::{HPGP_MMTYPE_ATTEN_CHAR, HPGP_MMTYPE_MAX, HPGP_MMTYPE_SET_KEY};

    fn last_error() -> String {
        // SAFETY: hpgp_last_error returns a pointer to a thread-local CString.
        unsafe { CStr::from_ptr(crate::hpgp_last_error()) }
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn pack_set_key_request() {
        let req = [0x5Au8; 38];
        let mut buf = [0xFFu8; 128];

        // SAFETY: Both buffers are valid for the lengths passed.
        let len = unsafe {
            hpgp_pack_request(
                HPGP_MMTYPE_SET_KEY,
                req.as_ptr(),
                req.len(),
                buf.as_mut_ptr(),
                buf.len(),
            )
        };

        assert_eq!(len, 41);
        assert_eq!(&buf[..5], &[1, 0x08, 0x60, 0, 0]);
        assert_eq!(&buf[5..43], &req[..]);
        assert!(buf[43..].iter().all(|&b| b == 0));
        assert!(last_error().is_empty());
    }

    #[test]
    fn unknown_ordinal_returns_zero_and_sets_error() {
        let mut buf = [0xFFu8; 64];

        // SAFETY: `buf` is valid for its length; `data` is empty.
        let len = unsafe {
            hpgp_pack_confirm(
                HPGP_MMTYPE_MAX,
                std::ptr::null(),
                0,
                buf.as_mut_ptr(),
                buf.len(),
            )
        };

        assert_eq!(len, 0);
        assert!(last_error().contains("unknown mmtype"));
        assert_eq!(buf, [0xFF; 64]);
    }

    #[test]
    fn undersized_buffer_returns_zero_and_sets_error() {
        let rsp = [0u8; 51];
        let mut buf = [0u8; 3];

        // SAFETY: Both buffers are valid for the lengths passed.
        let len = unsafe {
            hpgp_pack_response(
                HPGP_MMTYPE_ATTEN_CHAR,
                rsp.as_ptr(),
                rsp.len(),
                buf.as_mut_ptr(),
                buf.len(),
            )
        };

        assert_eq!(len, 0);
        assert!(last_error().contains("buffer too small"));
    }

    #[test]
    fn null_data_with_length_is_rejected() {
        let mut buf = [0u8; 64];

        // SAFETY: `data` is null, which the function must reject without reading.
        let len = unsafe {
            hpgp_pack_indication(
                HPGP_MMTYPE_ATTEN_CHAR,
                std::ptr::null(),
                110,
                buf.as_mut_ptr(),
                buf.len(),
            )
        };

        assert_eq!(len, 0);
        assert!(last_error().contains("data cannot be null"));
    }

    #[test]
    fn empty_data_packs_zeroed_body() {
        let mut buf = [0xFFu8; 64];

        // SAFETY: `buf` is valid for its length; `data` is empty.
        let len = unsafe {
            hpgp_pack_request(
                HPGP_MMTYPE_SET_KEY,
                std::ptr::null(),
                0,
                buf.as_mut_ptr(),
                buf.len(),
            )
        };

        assert_eq!(len, 41);
        assert_eq!(&buf[..5], &[1, 0x08, 0x60, 0, 0]);
        assert!(buf[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn successful_call_clears_previous_error() {
        let mut buf = [0u8; 64];

        // SAFETY: `buf` is valid for its length; `data` is empty.
        unsafe {
            hpgp_pack_request(u32::MAX, std::ptr::null(), 0, buf.as_mut_ptr(), buf.len());
        }
        assert!(!last_error().is_empty());

        // SAFETY: As above.
        let len = unsafe {
            hpgp_pack_request(
                HPGP_MMTYPE_SET_KEY,
                std::ptr::null(),
                0,
                buf.as_mut_ptr(),
                buf.len(),
            )
        };
        assert_eq!(len, 41);
        assert!(last_error().is_empty());
    }
}
