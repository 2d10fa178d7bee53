use hpgp_frame::{MmType, Variant};

/// Kind ordinals, as accepted by the `hpgp_pack_*` functions.
pub const HPGP_MMTYPE_DISCOVER_LIST: u32 = MmType::DiscoverList as u32;
pub const HPGP_MMTYPE_ENCRYPTED: u32 = MmType::Encrypted as u32;
pub const HPGP_MMTYPE_SET_KEY: u32 = MmType::SetKey as u32;
pub const HPGP_MMTYPE_GET_KEY: u32 = MmType::GetKey as u32;
pub const HPGP_MMTYPE_BRG_INFO: u32 = MmType::BrgInfo as u32;
pub const HPGP_MMTYPE_NW_INFO: u32 = MmType::NwInfo as u32;
pub const HPGP_MMTYPE_HFID: u32 = MmType::Hfid as u32;
pub const HPGP_MMTYPE_NW_STATS: u32 = MmType::NwStats as u32;
pub const HPGP_MMTYPE_SLAC_PARM: u32 = MmType::SlacParm as u32;
pub const HPGP_MMTYPE_START_ATTEN_CHAR: u32 = MmType::StartAttenChar as u32;
pub const HPGP_MMTYPE_ATTEN_CHAR: u32 = MmType::AttenChar as u32;
pub const HPGP_MMTYPE_PKCS_CERT: u32 = MmType::PkcsCert as u32;
pub const HPGP_MMTYPE_MNBC_SOUND: u32 = MmType::MnbcSound as u32;
pub const HPGP_MMTYPE_VALIDATE: u32 = MmType::Validate as u32;
pub const HPGP_MMTYPE_SLAC_MATCH: u32 = MmType::SlacMatch as u32;
pub const HPGP_MMTYPE_SLAC_USER_DATA: u32 = MmType::SlacUserData as u32;
pub const HPGP_MMTYPE_ATTEN_PROFILE: u32 = MmType::AttenProfile as u32;

/// Unmapped kind sentinel.
pub const HPGP_MMTYPE_MAX: u32 = MmType::COUNT as u32;

pub const HPGP_MMTYPE_REQ: i32 = Variant::Request as i32;
pub const HPGP_MMTYPE_CNF: i32 = Variant::Confirm as i32;
pub const HPGP_MMTYPE_IND: i32 = Variant::Indication as i32;
pub const HPGP_MMTYPE_RSP: i32 = Variant::Response as i32;

/// Returned by `hpgp_mmtype_variant` for a frame too short to carry a wire code.
pub const HPGP_MMTYPE_VARIANT_NONE: i32 = -1;
