//! hpgp-ffi: C-ABI exports for HomePlug GreenPHY frame packing and inspection.
//!
//! Kinds are passed as ordinals (`HPGP_MMTYPE_*`), not wire codes. Failures
//! are reported through sentinel return values; the reason is available from
//! [`hpgp_last_error`] on the calling thread.

mod args;
mod error;
mod inspect;
mod pack;
mod types;

use std::panic::AssertUnwindSafe;

pub use inspect::{hpgp_mmtype, hpgp_mmtype_code, hpgp_mmtype_variant};
pub use pack::{hpgp_pack_confirm, hpgp_pack_indication, hpgp_pack_request, hpgp_pack_response};
pub use types::{
    HPGP_MMTYPE_ATTEN_CHAR, HPGP_MMTYPE_ATTEN_PROFILE, HPGP_MMTYPE_BRG_INFO, HPGP_MMTYPE_CNF,
    HPGP_MMTYPE_DISCOVER_LIST, HPGP_MMTYPE_ENCRYPTED, HPGP_MMTYPE_GET_KEY, HPGP_MMTYPE_HFID,
    HPGP_MMTYPE_IND, HPGP_MMTYPE_MAX, HPGP_MMTYPE_MNBC_SOUND, HPGP_MMTYPE_NW_INFO,
    HPGP_MMTYPE_NW_STATS, HPGP_MMTYPE_PKCS_CERT, HPGP_MMTYPE_REQ, HPGP_MMTYPE_RSP,
    HPGP_MMTYPE_SET_KEY, HPGP_MMTYPE_SLAC_MATCH, HPGP_MMTYPE_SLAC_PARM,
    HPGP_MMTYPE_SLAC_USER_DATA, HPGP_MMTYPE_START_ATTEN_CHAR, HPGP_MMTYPE_VALIDATE,
    HPGP_MMTYPE_VARIANT_NONE,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

/// Message from the last failed call on this thread, or an empty string.
#[no_mangle]
pub extern "C" fn hpgp_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

/// Reset the last-error message for this thread.
#[no_mangle]
pub extern "C" fn hpgp_clear_error() {
    ffi_boundary((), error::clear_error_state);
}
