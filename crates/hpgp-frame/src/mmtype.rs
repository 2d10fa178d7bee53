//! Management message type (`mmtype`) numbering.
//!
//! A wire code is laid out as:
//!
//! ```text
//!  15     13 12                           2 1       0
//! ┌─────────┬──────────────────────────────┬─────────┐
//! │ category│ offset (11 bits)             │ variant │
//! └─────────┴──────────────────────────────┴─────────┘
//! ```
//!
//! Station-to-station offsets are not contiguous. The kinds are grouped into
//! ranges, and each range starts at a fixed offset. Lookups test the highest
//! range first.

use std::fmt;
use std::str::FromStr;

/// Bit position of the category field.
pub const CATEGORY_SHIFT: u32 = 13;

/// Bit position of the offset field.
pub const OFFSET_SHIFT: u32 = 2;

const OFFSET_MASK: u16 = 0x7ff;
const VARIANT_MASK: u16 = 0x3;

/// Offset of `CC_DISCOVER_LIST` inside the STA-CCo category.
const DISCOVER_LIST_OFFSET: u16 = 0x05;

const SLAC_PARM_BASE: u16 = 0x19;
const NW_STATS_BASE: u16 = 0x12;
const HFID_BASE: u16 = 0x10;
const NW_INFO_BASE: u16 = 0x0E;
const BRG_INFO_BASE: u16 = 0x08;

/// Sentinel wire code for ordinals outside [`MmType`].
pub const UNMAPPED_CODE: u16 = 0;

/// Which pair of peers exchanges a message.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MmCategory {
    /// Station and central coordinator.
    StaCco = 0,
    /// Proxy coordinator.
    Proxy = 1,
    /// Neighboring central coordinators.
    CcoCco = 2,
    /// Two stations.
    StaSta = 3,
    Manufacturer = 4,
    Vendor = 5,
}

impl MmCategory {
    /// Decode the category field of a wire code. Values 6 and 7 are undefined.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code >> CATEGORY_SHIFT {
            0 => Some(Self::StaCco),
            1 => Some(Self::Proxy),
            2 => Some(Self::CcoCco),
            3 => Some(Self::StaSta),
            4 => Some(Self::Manufacturer),
            5 => Some(Self::Vendor),
            _ => None,
        }
    }

    /// The category field shifted into wire position.
    pub const fn base(self) -> u16 {
        (self as u16) << CATEGORY_SHIFT
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::StaCco => "STA-CCo",
            Self::Proxy => "PROXY",
            Self::CcoCco => "CCo-CCo",
            Self::StaSta => "STA-STA",
            Self::Manufacturer => "MANUFACTURER",
            Self::Vendor => "VENDOR",
        }
    }
}

impl fmt::Display for MmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role of a message within its exchange. Encoded in the low two bits.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Request = 0,
    Confirm = 1,
    Indication = 2,
    Response = 3,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Self::Request,
        Self::Confirm,
        Self::Indication,
        Self::Response,
    ];

    /// Extract the variant from a wire code.
    ///
    /// Every 2-bit value is a defined variant, so this never fails.
    pub const fn from_code(code: u16) -> Self {
        match code & VARIANT_MASK {
            0 => Self::Request,
            1 => Self::Confirm,
            2 => Self::Indication,
            _ => Self::Response,
        }
    }

    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// HomePlug suffix, e.g. `REQ`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Request => "REQ",
            Self::Confirm => "CNF",
            Self::Indication => "IND",
            Self::Response => "RSP",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Variant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "req" | "request" => Ok(Self::Request),
            "cnf" | "confirm" => Ok(Self::Confirm),
            "ind" | "indication" => Ok(Self::Indication),
            "rsp" | "response" => Ok(Self::Response),
            _ => Err(ParseError::Variant(s.to_string())),
        }
    }
}

/// Management message kinds understood by this crate.
///
/// The discriminant is the kind's ordinal; it is not the wire code.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MmType {
    DiscoverList = 0,
    Encrypted = 1,
    SetKey = 2,
    GetKey = 3,
    BrgInfo = 4,
    NwInfo = 5,
    Hfid = 6,
    NwStats = 7,
    SlacParm = 8,
    StartAttenChar = 9,
    AttenChar = 10,
    PkcsCert = 11,
    MnbcSound = 12,
    Validate = 13,
    SlacMatch = 14,
    SlacUserData = 15,
    AttenProfile = 16,
}

impl MmType {
    /// Number of kinds. Ordinal `COUNT` is the "unmapped" sentinel in the C ABI.
    pub const COUNT: usize = 17;

    pub const ALL: [MmType; Self::COUNT] = [
        Self::DiscoverList,
        Self::Encrypted,
        Self::SetKey,
        Self::GetKey,
        Self::BrgInfo,
        Self::NwInfo,
        Self::Hfid,
        Self::NwStats,
        Self::SlacParm,
        Self::StartAttenChar,
        Self::AttenChar,
        Self::PkcsCert,
        Self::MnbcSound,
        Self::Validate,
        Self::SlacMatch,
        Self::SlacUserData,
        Self::AttenProfile,
    ];

    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    pub const fn from_ordinal(ordinal: u32) -> Option<Self> {
        if (ordinal as usize) < Self::COUNT {
            Some(Self::ALL[ordinal as usize])
        } else {
            None
        }
    }

    pub const fn category(self) -> MmCategory {
        match self {
            Self::DiscoverList => MmCategory::StaCco,
            _ => MmCategory::StaSta,
        }
    }

    /// Offset field of this kind, before shifting into wire position.
    pub const fn offset(self) -> u16 {
        let ord = self as u16;
        match self {
            Self::DiscoverList => DISCOVER_LIST_OFFSET,
            _ if ord >= Self::SlacParm as u16 => SLAC_PARM_BASE + ord - Self::SlacParm as u16,
            _ if ord >= Self::NwStats as u16 => NW_STATS_BASE + ord - Self::NwStats as u16,
            _ if ord >= Self::Hfid as u16 => HFID_BASE + ord - Self::Hfid as u16,
            _ if ord >= Self::NwInfo as u16 => NW_INFO_BASE + ord - Self::NwInfo as u16,
            _ if ord >= Self::BrgInfo as u16 => BRG_INFO_BASE + ord - Self::BrgInfo as u16,
            _ => ord,
        }
    }

    /// Wire code with the variant bits cleared.
    pub const fn code(self) -> u16 {
        self.category().base() | (self.offset() << OFFSET_SHIFT)
    }

    /// Wire code for this kind in the given variant.
    pub const fn code_with(self, variant: Variant) -> u16 {
        self.code() | variant.bits()
    }

    /// HomePlug message name without the variant suffix.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DiscoverList => "CC_DISCOVER_LIST",
            Self::Encrypted => "CM_ENCRYPTED_PAYLOAD",
            Self::SetKey => "CM_SET_KEY",
            Self::GetKey => "CM_GET_KEY",
            Self::BrgInfo => "CM_BRG_INFO",
            Self::NwInfo => "CM_NW_INFO",
            Self::Hfid => "CM_HFID",
            Self::NwStats => "CM_NW_STATS",
            Self::SlacParm => "CM_SLAC_PARM",
            Self::StartAttenChar => "CM_START_ATTEN_CHAR",
            Self::AttenChar => "CM_ATTEN_CHAR",
            Self::PkcsCert => "CM_PKCS_CERT",
            Self::MnbcSound => "CM_MNBC_SOUND",
            Self::Validate => "CM_VALIDATE",
            Self::SlacMatch => "CM_SLAC_MATCH",
            Self::SlacUserData => "CM_SLAC_USER_DATA",
            Self::AttenProfile => "CM_ATTEN_PROFILE",
        }
    }

    /// Short kebab-case alias, e.g. `set-key`.
    pub const fn alias(self) -> &'static str {
        match self {
            Self::DiscoverList => "discover-list",
            Self::Encrypted => "encrypted",
            Self::SetKey => "set-key",
            Self::GetKey => "get-key",
            Self::BrgInfo => "brg-info",
            Self::NwInfo => "nw-info",
            Self::Hfid => "hfid",
            Self::NwStats => "nw-stats",
            Self::SlacParm => "slac-parm",
            Self::StartAttenChar => "start-atten-char",
            Self::AttenChar => "atten-char",
            Self::PkcsCert => "pkcs-cert",
            Self::MnbcSound => "mnbc-sound",
            Self::Validate => "validate",
            Self::SlacMatch => "slac-match",
            Self::SlacUserData => "slac-user-data",
            Self::AttenProfile => "atten-profile",
        }
    }
}

impl fmt::Display for MmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MmType {
    type Err = ParseError;

    /// Accepts the HomePlug name (`CM_SET_KEY`) or the alias (`set-key`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || kind.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::MmType(s.to_string()))
    }
}

/// Failure to parse a kind or variant from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown message type: {0}")]
    MmType(String),
    #[error("unknown variant: {0} (expected req, cnf, ind or rsp)")]
    Variant(String),
}

/// Wire code for a raw kind ordinal, or [`UNMAPPED_CODE`] if it names no kind.
pub const fn code_for_ordinal(ordinal: u32) -> u16 {
    match MmType::from_ordinal(ordinal) {
        Some(kind) => kind.code(),
        None => UNMAPPED_CODE,
    }
}

/// Decode the kind carried by a wire code. Variant bits are ignored.
///
/// Only the STA-CCo and STA-STA categories are mapped. Offsets that fall
/// between ranges, or past the last kind of a range, yield `None`.
pub fn from_code(code: u16) -> Option<MmType> {
    let offset = (code >> OFFSET_SHIFT) & OFFSET_MASK;

    match MmCategory::from_code(code)? {
        MmCategory::StaCco => (offset == DISCOVER_LIST_OFFSET).then_some(MmType::DiscoverList),
        MmCategory::StaSta => MmType::from_ordinal(sta_sta_ordinal(offset))
            .filter(|kind| kind.category() == MmCategory::StaSta && kind.offset() == offset),
        MmCategory::Proxy
        | MmCategory::CcoCco
        | MmCategory::Manufacturer
        | MmCategory::Vendor => None,
    }
}

fn sta_sta_ordinal(offset: u16) -> u32 {
    let offset = u32::from(offset);
    let rebase = |base: u16, start: MmType| offset - u32::from(base) + start.ordinal();

    if offset >= u32::from(SLAC_PARM_BASE) {
        rebase(SLAC_PARM_BASE, MmType::SlacParm)
    } else if offset >= u32::from(NW_STATS_BASE) {
        rebase(NW_STATS_BASE, MmType::NwStats)
    } else if offset >= u32::from(HFID_BASE) {
        rebase(HFID_BASE, MmType::Hfid)
    } else if offset >= u32::from(NW_INFO_BASE) {
        rebase(NW_INFO_BASE, MmType::NwInfo)
    } else if offset >= u32::from(BRG_INFO_BASE) {
        rebase(BRG_INFO_BASE, MmType::BrgInfo)
    } else {
        offset
    }
}
