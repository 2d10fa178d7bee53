use bytes::BufMut;

use crate::error::{FrameError, Result};
use crate::mmtype::{MmType, Variant};
use crate::payload::{
    AttenCharInd, AttenCharRsp, MnbcSoundInd, Payload, SetKeyReq, SlacMatchCnf, SlacMatchReq,
    SlacParmCnf, SlacParmReq, StartAttenCharInd, MAX_WIRE_SIZE,
};

/// Frame header: version (1) + wire code (2) = 3 bytes.
pub const FRAME_HEADER_SIZE: usize = 3;

/// MME sub-header: fragment sequence number (1) + fragment options (1) = 2 bytes.
pub const MME_HEADER_SIZE: usize = 2;

/// Everything written ahead of the body.
pub const HEADER_SIZE: usize = FRAME_HEADER_SIZE + MME_HEADER_SIZE;

/// Management message version written by this crate.
pub const MMV: u8 = 1;

/// Destination (6) + source (6) + EtherType (2).
pub const ETH_HEADER_SIZE: usize = 14;

/// Minimum Ethernet frame (60 bytes, no FCS) less the Ethernet header.
pub const MIN_FRAME_LEN: usize = 60 - ETH_HEADER_SIZE;

/// Largest HPGP frame that fits an Ethernet MTU.
pub const MAX_FRAME_LEN: usize = 1500;

type BodyTable = [Option<usize>; MmType::COUNT];

const REQUEST_BODIES: BodyTable = [
    None,                            // DiscoverList
    None,                            // Encrypted
    Some(SetKeyReq::WIRE_SIZE),      // SetKey
    None,                            // GetKey
    None,                            // BrgInfo
    None,                            // NwInfo
    None,                            // Hfid
    None,                            // NwStats
    Some(SlacParmReq::WIRE_SIZE),    // SlacParm
    None,                            // StartAttenChar
    None,                            // AttenChar
    None,                            // PkcsCert
    None,                            // MnbcSound
    None,                            // Validate
    Some(SlacMatchReq::WIRE_SIZE),   // SlacMatch
    None,                            // SlacUserData
    None,                            // AttenProfile
];

const CONFIRM_BODIES: BodyTable = [
    None,                            // DiscoverList
    None,                            // Encrypted
    None,                            // SetKey
    None,                            // GetKey
    None,                            // BrgInfo
    None,                            // NwInfo
    None,                            // Hfid
    None,                            // NwStats
    Some(SlacParmCnf::WIRE_SIZE),    // SlacParm
    None,                            // StartAttenChar
    None,                            // AttenChar
    None,                            // PkcsCert
    None,                            // MnbcSound
    None,                            // Validate
    Some(SlacMatchCnf::WIRE_SIZE),   // SlacMatch
    None,                            // SlacUserData
    None,                            // AttenProfile
];

const INDICATION_BODIES: BodyTable = [
    None,                                // DiscoverList
    None,                                // Encrypted
    None,                                // SetKey
    None,                                // GetKey
    None,                                // BrgInfo
    None,                                // NwInfo
    None,                                // Hfid
    None,                                // NwStats
    None,                                // SlacParm
    Some(StartAttenCharInd::WIRE_SIZE),  // StartAttenChar
    Some(AttenCharInd::WIRE_SIZE),       // AttenChar
    None,                                // PkcsCert
    Some(MnbcSoundInd::WIRE_SIZE),       // MnbcSound
    None,                                // Validate
    None,                                // SlacMatch
    None,                                // SlacUserData
    None,                                // AttenProfile
];

const RESPONSE_BODIES: BodyTable = [
    None,                            // DiscoverList
    None,                            // Encrypted
    None,                            // SetKey
    None,                            // GetKey
    None,                            // BrgInfo
    None,                            // NwInfo
    None,                            // Hfid
    None,                            // NwStats
    None,                            // SlacParm
    None,                            // StartAttenChar
    Some(AttenCharRsp::WIRE_SIZE),   // AttenChar
    None,                            // PkcsCert
    None,                            // MnbcSound
    None,                            // Validate
    None,                            // SlacMatch
    None,                            // SlacUserData
    None,                            // AttenProfile
];

const fn body_table(variant: Variant) -> &'static BodyTable {
    match variant {
        Variant::Request => &REQUEST_BODIES,
        Variant::Confirm => &CONFIRM_BODIES,
        Variant::Indication => &INDICATION_BODIES,
        Variant::Response => &RESPONSE_BODIES,
    }
}

/// Encoded body size for a (kind, variant) pair, or `None` if the pair
/// carries no body.
pub const fn body_size(kind: MmType, variant: Variant) -> Option<usize> {
    body_table(variant)[kind as usize]
}

/// Total frame length for a body length returned by the pack functions.
pub const fn frame_len(body_len: usize) -> usize {
    HEADER_SIZE + body_len
}

/// Configuration for the frame packer.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Management message version byte. Default: 1.
    pub version: u8,
    /// Frames shorter than this (header included) report a padded body
    /// length. Default: 46.
    pub min_frame_len: usize,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            version: MMV,
            min_frame_len: MIN_FRAME_LEN,
        }
    }
}

/// Pack a frame into `buf`.
///
/// The whole of `buf` is zeroed first, then the header is written and up to
/// the body size for (`kind`, `variant`) bytes of `payload` are copied after
/// it. The body is silently truncated to what `buf` can hold. A `payload`
/// shorter than the body leaves the remaining body bytes zero.
///
/// Returns the body length, excluding [`HEADER_SIZE`]: the full body size for
/// the pair, bounded by `buf`, whatever the length of `payload`. A body
/// shorter than the Ethernet minimum reports the padded length (bounded by
/// `buf`); a pair with no defined body returns 0 and is never padded.
///
/// Wire format:
/// ```text
/// ┌─────────┬─────────────┬──────┬──────────┬─────────────────┐
/// │ MMV     │ MMTYPE      │ FMSN │ FMI opts │ Body             │
/// │ (1B)    │ (2B LE)     │ (1B) │ (1B)     │ (0..N bytes)     │
/// └─────────┴─────────────┴──────┴──────────┴─────────────────┘
/// ```
pub fn pack_with_config(
    config: &PackConfig,
    kind: MmType,
    variant: Variant,
    payload: &[u8],
    buf: &mut [u8],
) -> Result<usize> {
    let capacity = buf.len();
    if capacity < HEADER_SIZE {
        tracing::debug!(%kind, %variant, capacity, "buffer cannot hold frame header");
        return Err(FrameError::BufferTooSmall {
            capacity,
            required: HEADER_SIZE,
        });
    }

    buf.fill(0);

    let code = kind.code_with(variant);
    let mut header = &mut buf[..HEADER_SIZE];
    header.put_u8(config.version);
    header.put_u16_le(code);
    header.put_u8(0); // fragment sequence number
    header.put_u8(0); // fragment options

    let maxlen = capacity.min(capacity - HEADER_SIZE);

    let len = match body_size(kind, variant) {
        Some(size) => {
            // A short payload leaves the rest of the body zero from the fill.
            let len = size.min(maxlen);
            let copied = len.min(payload.len());
            buf[HEADER_SIZE..HEADER_SIZE + copied].copy_from_slice(&payload[..copied]);
            len
        }
        None => {
            tracing::debug!(%kind, %variant, "no body defined, packing header only");
            0
        }
    };

    let reported = if len != 0 && len + HEADER_SIZE < config.min_frame_len {
        (config.min_frame_len - HEADER_SIZE).min(maxlen)
    } else {
        len
    };

    tracing::trace!(%kind, %variant, code, body = len, reported, "packed frame");
    Ok(reported)
}

/// Pack a frame with the default configuration. See [`pack_with_config`].
pub fn pack(kind: MmType, variant: Variant, payload: &[u8], buf: &mut [u8]) -> Result<usize> {
    pack_with_config(&PackConfig::default(), kind, variant, payload, buf)
}

/// Pack a `.REQ` frame.
pub fn pack_request(kind: MmType, req: &[u8], buf: &mut [u8]) -> Result<usize> {
    pack(kind, Variant::Request, req, buf)
}

/// Pack a `.CNF` frame.
pub fn pack_confirm(kind: MmType, cnf: &[u8], buf: &mut [u8]) -> Result<usize> {
    pack(kind, Variant::Confirm, cnf, buf)
}

/// Pack an `.IND` frame.
pub fn pack_indication(kind: MmType, ind: &[u8], buf: &mut [u8]) -> Result<usize> {
    pack(kind, Variant::Indication, ind, buf)
}

/// Pack a `.RSP` frame.
pub fn pack_response(kind: MmType, rsp: &[u8], buf: &mut [u8]) -> Result<usize> {
    pack(kind, Variant::Response, rsp, buf)
}

/// Encode a typed body and pack it under its own kind and variant.
///
/// Decode-only bodies (`SetKeyCnf`, `GetKeyReq`, `GetKeyCnf`) have no table
/// entry, so they pack as a header-only frame and return 0.
pub fn pack_payload<P: Payload>(payload: &P, buf: &mut [u8]) -> Result<usize> {
    pack_payload_with_config(&PackConfig::default(), payload, buf)
}

/// [`pack_payload`] with an explicit configuration.
pub fn pack_payload_with_config<P: Payload>(
    config: &PackConfig,
    payload: &P,
    buf: &mut [u8],
) -> Result<usize> {
    let mut scratch = [0u8; MAX_WIRE_SIZE];
    let mut dst = &mut scratch[..P::WIRE_SIZE];
    payload.put(&mut dst);
    pack_with_config(config, P::MMTYPE, P::VARIANT, &scratch[..P::WIRE_SIZE], buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_constants() {
        assert_eq!(HEADER_SIZE, 5);
        assert_eq!(MIN_FRAME_LEN, 46);
    }

    #[test]
    fn set_key_request_scenario() {
        let req = [0x5Au8; SetKeyReq::WIRE_SIZE];
        let mut buf = [0u8; 128];

        let len = pack_request(MmType::SetKey, &req, &mut buf).unwrap();

        assert!(len >= SetKeyReq::WIRE_SIZE);
        assert_eq!(len, MIN_FRAME_LEN - HEADER_SIZE);
        assert_eq!(&buf[..3], &[1, 0x08, 0x60]);
        assert_eq!(&buf[3..5], &[0, 0]);
        assert_eq!(&buf[5..5 + SetKeyReq::WIRE_SIZE], &req[..]);
    }

    #[test]
    fn variant_bits_follow_entry_point() {
        let mut buf = [0u8; 64];

        pack_confirm(MmType::SlacParm, &[0u8; 27], &mut buf).unwrap();
        assert_eq!(u16::from_le_bytes([buf[1], buf[2]]), 0x6065);

        pack_indication(MmType::AttenChar, &[0u8; 110], &mut buf).unwrap();
        assert_eq!(u16::from_le_bytes([buf[1], buf[2]]), 0x606E);

        pack_response(MmType::AttenChar, &[0u8; 51], &mut buf).unwrap();
        assert_eq!(u16::from_le_bytes([buf[1], buf[2]]), 0x606F);
    }

    #[test]
    fn dirty_buffer_is_zeroed() {
        let mut buf = [0xFFu8; 96];
        let body = [0x11u8; SlacParmReq::WIRE_SIZE];

        let len = pack_request(MmType::SlacParm, &body, &mut buf).unwrap();

        assert_eq!(len, 41);
        assert_eq!(&buf[3..5], &[0, 0]);
        assert_eq!(&buf[5..16], &body[..]);
        assert!(buf[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn undefined_body_reports_zero_and_is_not_padded() {
        let mut buf = [0xFFu8; 64];

        let len = pack_request(MmType::BrgInfo, &[0xAA; 32], &mut buf).unwrap();

        assert_eq!(len, 0);
        assert_eq!(&buf[..3], &[1, 0x20, 0x60]);
        assert!(buf[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn long_body_is_not_padded() {
        let mut buf = [0u8; 256];
        let len = pack_indication(MmType::AttenChar, &[7u8; 110], &mut buf).unwrap();
        assert_eq!(len, 110);
    }

    #[test]
    fn body_exactly_at_bound_is_not_padded() {
        // 38 + 5 sits exactly on the bound, which does not pad.
        let config = PackConfig {
            min_frame_len: SetKeyReq::WIRE_SIZE + HEADER_SIZE,
            ..PackConfig::default()
        };
        let mut buf = [0u8; 128];
        let len = pack_with_config(&config, MmType::SetKey, Variant::Request, &[1; 38], &mut buf)
            .unwrap();
        assert_eq!(len, SetKeyReq::WIRE_SIZE);
    }

    #[test]
    fn truncates_to_available_space() {
        let body: Vec<u8> = (0..110u8).collect();
        let mut buf = [0u8; 64];

        let len = pack_indication(MmType::AttenChar, &body, &mut buf).unwrap();

        assert_eq!(len, 64 - HEADER_SIZE);
        assert_eq!(&buf[HEADER_SIZE..], &body[..len]);
    }

    #[test]
    fn padded_length_never_exceeds_buffer() {
        let mut buf = [0u8; 20];
        let len = pack_request(MmType::SetKey, &[9u8; 38], &mut buf).unwrap();
        assert_eq!(len, 15);
        assert!(frame_len(len) <= buf.len());
    }

    #[test]
    fn header_only_buffer_packs_empty_body() {
        let mut buf = [0xFFu8; HEADER_SIZE];
        let len = pack_request(MmType::SetKey, &[9u8; 38], &mut buf).unwrap();
        assert_eq!(len, 0);
        assert_eq!(buf, [1, 0x08, 0x60, 0, 0]);
    }

    #[test]
    fn undersized_buffer_is_rejected_untouched() {
        let mut buf = [0xFFu8; HEADER_SIZE - 1];
        let err = pack_request(MmType::SetKey, &[0u8; 38], &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::BufferTooSmall {
                capacity: 4,
                required: 5
            }
        ));
        assert_eq!(buf, [0xFF; 4]);
    }

    #[test]
    fn short_payload_reports_full_body() {
        let mut buf = [0xEEu8; 128];
        let len = pack_request(MmType::SlacMatch, &[3u8; 10], &mut buf).unwrap();

        assert_eq!(len, SlacMatchReq::WIRE_SIZE);
        assert_eq!(&buf[5..15], &[3u8; 10]);
        assert!(buf[15..].iter().all(|&b| b == 0));

        let header = crate::inspect::FrameHeader::parse(&buf[..frame_len(len)]).unwrap();
        let req: SlacMatchReq = header.payload().unwrap();
        assert_eq!(req.app_type, 3);
        assert_eq!(req.run_id, [0; 8]);
    }

    #[test]
    fn empty_payload_packs_zero_body_and_pads() {
        let mut buf = [0xEEu8; 64];
        let len = pack_request(MmType::SlacParm, &[], &mut buf).unwrap();

        assert_eq!(len, MIN_FRAME_LEN - HEADER_SIZE);
        assert_eq!(&buf[..5], &[1, 0x64, 0x60, 0, 0]);
        assert!(buf[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn custom_version_byte() {
        let config = PackConfig {
            version: 0,
            ..PackConfig::default()
        };
        let mut buf = [0u8; 64];
        pack_with_config(&config, MmType::SlacParm, Variant::Request, &[0; 11], &mut buf).unwrap();
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn tables_define_only_packed_bodies() {
        use MmType::*;

        let defined = |variant| -> Vec<(MmType, usize)> {
            MmType::ALL
                .into_iter()
                .filter_map(|kind| body_size(kind, variant).map(|size| (kind, size)))
                .collect()
        };

        assert_eq!(
            defined(Variant::Request),
            [(SetKey, 38), (SlacParm, 11), (SlacMatch, 66)]
        );
        assert_eq!(defined(Variant::Confirm), [(SlacParm, 27), (SlacMatch, 90)]);
        assert_eq!(
            defined(Variant::Indication),
            [(StartAttenChar, 19), (AttenChar, 110), (MnbcSound, 52)]
        );
        assert_eq!(defined(Variant::Response), [(AttenChar, 51)]);
    }

    #[test]
    fn tables_agree_with_payload_types() {
        fn check<P: Payload>() {
            assert_eq!(
                body_size(P::MMTYPE, P::VARIANT),
                Some(P::WIRE_SIZE),
                "{} {}",
                P::MMTYPE,
                P::VARIANT
            );
        }

        check::<SetKeyReq>();
        check::<SlacParmReq>();
        check::<SlacParmCnf>();
        check::<StartAttenCharInd>();
        check::<AttenCharInd>();
        check::<MnbcSoundInd>();
        check::<AttenCharRsp>();
        check::<SlacMatchReq>();
        check::<SlacMatchCnf>();
    }

    #[test]
    fn key_exchange_bodies_are_not_packed() {
        let mut buf = [0xEEu8; 64];

        assert_eq!(pack_request(MmType::GetKey, &[1; 33], &mut buf).unwrap(), 0);
        assert_eq!(&buf[..5], &[1, 0x0C, 0x60, 0, 0]);
        assert_eq!(pack_confirm(MmType::SetKey, &[1; 14], &mut buf).unwrap(), 0);
        assert_eq!(pack_confirm(MmType::GetKey, &[1; 38], &mut buf).unwrap(), 0);
        assert!(buf[HEADER_SIZE..].iter().all(|&b| b == 0));

        let cnf = crate::payload::GetKeyCnf {
            result: 1,
            ..Default::default()
        };
        assert_eq!(pack_payload(&cnf, &mut buf).unwrap(), 0);
        assert_eq!(&buf[1..3], &[0x0D, 0x60]);
    }

    #[test]
    fn pack_payload_uses_payload_identity() {
        let cnf = SlacMatchCnf {
            len: 0x0056,
            nmk: [0x42; 16],
            ..SlacMatchCnf::default()
        };
        let mut buf = [0u8; 128];

        let len = pack_payload(&cnf, &mut buf).unwrap();

        assert_eq!(len, SlacMatchCnf::WIRE_SIZE);
        assert_eq!(u16::from_le_bytes([buf[1], buf[2]]), 0x607D);
        assert_eq!(&buf[7..9], &[0x56, 0x00]);
        assert_eq!(&buf[HEADER_SIZE + 74..HEADER_SIZE + 90], &[0x42; 16]);
    }
}
