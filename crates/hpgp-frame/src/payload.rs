//! Fixed-layout MME bodies.
//!
//! Every body is byte-exact with no alignment padding. Multi-byte integers are
//! little-endian on the wire. Variable-length tails (cipher suite lists,
//! certificates) are not part of these layouts.

use bytes::{Buf, BufMut};

use crate::error::{FrameError, Result};
use crate::mmtype::{MmType, Variant};

mod sealed {
    pub trait Sealed {}
}

/// A typed MME body bound to one (kind, variant) pair.
pub trait Payload: sealed::Sealed + Sized {
    const MMTYPE: MmType;
    const VARIANT: Variant;
    /// Exact encoded length in bytes.
    const WIRE_SIZE: usize;

    /// Write exactly [`Self::WIRE_SIZE`] bytes into `dst`.
    fn put<B: BufMut>(&self, dst: &mut B);

    /// Read from `src`, which must hold at least [`Self::WIRE_SIZE`] bytes.
    fn get<B: Buf>(src: &mut B) -> Self;

    /// Decode a received body. Bytes past [`Self::WIRE_SIZE`] (padding) are ignored.
    fn decode(body: &[u8]) -> Result<Self> {
        if body.len() < Self::WIRE_SIZE {
            return Err(FrameError::Truncated {
                len: body.len(),
                required: Self::WIRE_SIZE,
            });
        }
        let mut src = &body[..Self::WIRE_SIZE];
        Ok(Self::get(&mut src))
    }
}

trait Field: Sized {
    const SIZE: usize;
    const ZERO: Self;
    fn put<B: BufMut>(&self, dst: &mut B);
    fn get<B: Buf>(src: &mut B) -> Self;
}

impl Field for u8 {
    const SIZE: usize = 1;
    const ZERO: Self = 0;

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(*self);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        src.get_u8()
    }
}

impl Field for u16 {
    const SIZE: usize = 2;
    const ZERO: Self = 0;

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u16_le(*self);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        src.get_u16_le()
    }
}

impl Field for u32 {
    const SIZE: usize = 4;
    const ZERO: Self = 0;

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_le(*self);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        src.get_u32_le()
    }
}

impl<const N: usize> Field for [u8; N] {
    const SIZE: usize = N;
    const ZERO: Self = [0; N];

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_slice(self);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        let mut out = [0u8; N];
        src.copy_to_slice(&mut out);
        out
    }
}

macro_rules! payload {
    (
        $(#[$meta:meta])*
        $name:ident => $mmtype:ident . $variant:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: <$ty as Field>::ZERO, )* }
            }
        }

        impl sealed::Sealed for $name {}

        impl Payload for $name {
            const MMTYPE: MmType = MmType::$mmtype;
            const VARIANT: Variant = Variant::$variant;
            const WIRE_SIZE: usize = 0 $( + <$ty as Field>::SIZE )*;

            fn put<B: BufMut>(&self, dst: &mut B) {
                $( Field::put(&self.$field, &mut *dst); )*
            }

            fn get<B: Buf>(src: &mut B) -> Self {
                Self { $( $field: <$ty as Field>::get(&mut *src), )* }
            }
        }
    };
}

payload! {
    /// `CM_SET_KEY.REQ`
    SetKeyReq => SetKey.Request {
        key_type: u8,
        my_nonce: u32,
        your_nonce: u32,
        /// Protocol ID.
        pid: u8,
        /// Protocol run number.
        prn: u16,
        /// Protocol message number.
        pmn: u8,
        cco: u8,
        nid: [u8; 7],
        key_selection: u8,
        key: [u8; 16],
    }
}

payload! {
    /// `CM_SET_KEY.CNF`
    ///
    /// Decode only: the packer carries no body for this pair.
    SetKeyCnf => SetKey.Confirm {
        result: u8,
        my_nonce: u32,
        your_nonce: u32,
        pid: u8,
        prn: u16,
        pmn: u8,
        cco: u8,
    }
}

payload! {
    /// `CM_GET_KEY.REQ`
    ///
    /// Decode only: the packer carries no body for this pair.
    GetKeyReq => GetKey.Request {
        req_type: u8,
        key_type: u8,
        nid: [u8; 7],
        my_nonce: u32,
        pid: u8,
        prn: u16,
        pmn: u8,
        key: [u8; 16],
    }
}

payload! {
    /// `CM_GET_KEY.CNF`
    ///
    /// Decode only: the packer carries no body for this pair.
    GetKeyCnf => GetKey.Confirm {
        result: u8,
        key_type: u8,
        my_nonce: u32,
        your_nonce: u32,
        nid: [u8; 7],
        /// Encryption key select.
        eks: u8,
        pid: u8,
        prn: u16,
        pmn: u8,
        key: [u8; 16],
    }
}

payload! {
    /// `CM_SLAC_PARM.REQ`
    ///
    /// The cipher suite list that follows `ciphersuite_size` on the wire is
    /// not carried; only the fixed part is packed.
    SlacParmReq => SlacParm.Request {
        app_type: u8,
        sec_type: u8,
        run_id: [u8; 8],
        ciphersuite_size: u8,
    }
}

payload! {
    /// `CM_SLAC_PARM.CNF`
    SlacParmCnf => SlacParm.Confirm {
        /// M-SOUND target address, normally broadcast.
        target_mac: [u8; 6],
        nr_sounds: u8,
        /// Sounding timeout in units of 100 ms.
        timeout: u8,
        forwarding_type: u8,
        forwarding_mac: [u8; 6],
        app_type: u8,
        sec_type: u8,
        run_id: [u8; 8],
        ciphersuite: u16,
    }
}

payload! {
    /// `CM_START_ATTEN_CHAR.IND`
    StartAttenCharInd => StartAttenChar.Indication {
        app_type: u8,
        sec_type: u8,
        nr_sounds: u8,
        /// Sounding timeout in units of 100 ms.
        timeout: u8,
        resp_type: u8,
        forwarding_sta: [u8; 6],
        run_id: [u8; 8],
    }
}

payload! {
    /// `CM_MNBC_SOUND.IND`
    MnbcSoundInd => MnbcSound.Indication {
        app_type: u8,
        sec_type: u8,
        sender_id: [u8; 17],
        /// Remaining sounds.
        count: u8,
        run_id: [u8; 8],
        reserved: [u8; 8],
        rnd: [u8; 16],
    }
}

payload! {
    /// `CM_ATTEN_CHAR.IND`
    AttenCharInd => AttenChar.Indication {
        app_type: u8,
        sec_type: u8,
        mac_src: [u8; 6],
        run_id: [u8; 8],
        id_src: [u8; 17],
        id_rsp: [u8; 17],
        nr_sounds: u8,
        nr_groups: u8,
        /// Average attenuation per carrier group, in dB.
        aag: [u8; 58],
    }
}

payload! {
    /// `CM_ATTEN_CHAR.RSP`
    AttenCharRsp => AttenChar.Response {
        app_type: u8,
        sec_type: u8,
        mac_src: [u8; 6],
        run_id: [u8; 8],
        id_src: [u8; 17],
        id_rsp: [u8; 17],
        result: u8,
    }
}

payload! {
    /// `CM_SLAC_MATCH.REQ`
    SlacMatchReq => SlacMatch.Request {
        app_type: u8,
        sec_type: u8,
        /// Length of the match fields that follow.
        len: u16,
        id_pev: [u8; 17],
        mac_pev: [u8; 6],
        id_evse: [u8; 17],
        mac_evse: [u8; 6],
        run_id: [u8; 8],
        reserved: [u8; 8],
    }
}

payload! {
    /// `CM_SLAC_MATCH.CNF`
    SlacMatchCnf => SlacMatch.Confirm {
        app_type: u8,
        sec_type: u8,
        len: u16,
        id_pev: [u8; 17],
        mac_pev: [u8; 6],
        id_evse: [u8; 17],
        mac_evse: [u8; 6],
        run_id: [u8; 8],
        reserved: [u8; 8],
        nid: [u8; 7],
        reserved2: u8,
        /// Network membership key.
        nmk: [u8; 16],
    }
}

/// Largest body any [`Payload`] encodes to.
pub const MAX_WIRE_SIZE: usize = AttenCharInd::WIRE_SIZE;

const _: () = {
    let sizes = [
        SetKeyReq::WIRE_SIZE,
        SetKeyCnf::WIRE_SIZE,
        GetKeyReq::WIRE_SIZE,
        GetKeyCnf::WIRE_SIZE,
        SlacParmReq::WIRE_SIZE,
        SlacParmCnf::WIRE_SIZE,
        StartAttenCharInd::WIRE_SIZE,
        MnbcSoundInd::WIRE_SIZE,
        AttenCharInd::WIRE_SIZE,
        AttenCharRsp::WIRE_SIZE,
        SlacMatchReq::WIRE_SIZE,
        SlacMatchCnf::WIRE_SIZE,
    ];
    let mut i = 0;
    while i < sizes.len() {
        assert!(sizes[i] <= MAX_WIRE_SIZE);
        i += 1;
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_sizes_match_layouts() {
        assert_eq!(SetKeyReq::WIRE_SIZE, 38);
        assert_eq!(SetKeyCnf::WIRE_SIZE, 14);
        assert_eq!(GetKeyReq::WIRE_SIZE, 33);
        assert_eq!(GetKeyCnf::WIRE_SIZE, 38);
        assert_eq!(SlacParmReq::WIRE_SIZE, 11);
        assert_eq!(SlacParmCnf::WIRE_SIZE, 27);
        assert_eq!(StartAttenCharInd::WIRE_SIZE, 19);
        assert_eq!(MnbcSoundInd::WIRE_SIZE, 52);
        assert_eq!(AttenCharInd::WIRE_SIZE, 110);
        assert_eq!(AttenCharRsp::WIRE_SIZE, 51);
        assert_eq!(SlacMatchReq::WIRE_SIZE, 66);
        assert_eq!(SlacMatchCnf::WIRE_SIZE, 90);
    }

    #[test]
    fn set_key_req_field_offsets() {
        let req = SetKeyReq {
            key_type: 0x01,
            my_nonce: 0x0403_0201,
            your_nonce: 0x0807_0605,
            pid: 0x04,
            prn: 0xBBAA,
            pmn: 0x03,
            cco: 0x00,
            nid: [0x11; 7],
            key_selection: 0x02,
            key: [0xEE; 16],
        };

        let mut out = [0u8; SetKeyReq::WIRE_SIZE];
        let mut dst = &mut out[..];
        req.put(&mut dst);
        assert!(dst.is_empty());

        assert_eq!(out[0], 0x01);
        assert_eq!(&out[1..5], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&out[5..9], &[0x05, 0x06, 0x07, 0x08]);
        assert_eq!(out[9], 0x04);
        assert_eq!(&out[10..12], &[0xAA, 0xBB]);
        assert_eq!(out[12], 0x03);
        assert_eq!(out[13], 0x00);
        assert_eq!(&out[14..21], &[0x11; 7]);
        assert_eq!(out[21], 0x02);
        assert_eq!(&out[22..38], &[0xEE; 16]);
    }

    #[test]
    fn slac_parm_cnf_ciphersuite_is_little_endian() {
        let cnf = SlacParmCnf {
            target_mac: [0xFF; 6],
            nr_sounds: 10,
            timeout: 6,
            forwarding_type: 1,
            ciphersuite: 0x0102,
            ..SlacParmCnf::default()
        };

        let mut out = [0u8; SlacParmCnf::WIRE_SIZE];
        cnf.put(&mut &mut out[..]);
        assert_eq!(&out[..6], &[0xFF; 6]);
        assert_eq!(&out[6..9], &[10, 6, 1]);
        assert_eq!(&out[25..27], &[0x02, 0x01]);
    }

    #[test]
    fn decode_reads_back_fields_and_ignores_padding() {
        let ind = StartAttenCharInd {
            nr_sounds: 10,
            timeout: 6,
            resp_type: 1,
            forwarding_sta: [0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
            run_id: *b"RUNID-01",
            ..StartAttenCharInd::default()
        };

        let mut body = [0u8; 41];
        ind.put(&mut &mut body[..]);

        assert_eq!(StartAttenCharInd::decode(&body).unwrap(), ind);
    }

    #[test]
    fn decode_short_body_is_truncated_error() {
        let err = AttenCharInd::decode(&[0u8; 40]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Truncated {
                len: 40,
                required: 110
            }
        ));
    }

    #[test]
    fn default_is_all_zero() {
        let mut out = [0xAAu8; SlacMatchCnf::WIRE_SIZE];
        SlacMatchCnf::default().put(&mut &mut out[..]);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn payloads_are_bound_to_their_message() {
        assert_eq!(SetKeyReq::MMTYPE, MmType::SetKey);
        assert_eq!(SetKeyReq::VARIANT, Variant::Request);
        assert_eq!(AttenCharRsp::MMTYPE, MmType::AttenChar);
        assert_eq!(AttenCharRsp::VARIANT, Variant::Response);
        assert_eq!(MnbcSoundInd::VARIANT, Variant::Indication);
    }
}
