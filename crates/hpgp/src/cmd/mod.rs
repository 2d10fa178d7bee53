use clap::{Args, Subcommand};
use hpgp_frame::{MmType, Variant, MAX_FRAME_LEN};

use crate::exit::{CliError, CliResult, DATA_INVALID};
use crate::output::OutputFormat;

pub mod inspect;
pub mod pack;
pub mod table;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack one frame from a kind, a variant and a hex body.
    Pack(PackArgs),
    /// Decode the header of a hex-encoded frame.
    Inspect(InspectArgs),
    /// List every kind with its wire code and defined bodies.
    Table(TableArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Pack(args) => pack::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Table(args) => table::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Message kind, e.g. `slac-parm` or `CM_SLAC_PARM`.
    pub kind: MmType,
    /// Message variant: req, cnf, ind or rsp.
    #[arg(long, default_value = "req")]
    pub variant: Variant,
    /// Body bytes as hex. Missing bytes are zero-filled.
    #[arg(long, value_name = "HEX")]
    pub hex: Option<String>,
    /// Output buffer size in bytes. Smaller buffers truncate the body.
    #[arg(long, default_value_t = MAX_FRAME_LEN)]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Frame bytes as hex, starting at the MMV byte.
    pub hex: String,
}

#[derive(Args, Debug, Default)]
pub struct TableArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Decode hex input. Whitespace, `:` and `-` separators and a leading `0x`
/// are accepted.
pub fn parse_hex(input: &str, what: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    hex::decode(&digits)
        .map_err(|err| CliError::new(DATA_INVALID, format!("{what} is not valid hex: {err}")))
}
