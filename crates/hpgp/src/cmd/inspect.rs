use hpgp_frame::{body_size, FrameHeader};
use serde::Serialize;

use crate::cmd::{parse_hex, InspectArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{code_hex, new_table, print_json, print_raw, size_cell, OutputFormat};

#[derive(Serialize, Debug, PartialEq, Eq)]
struct HeaderOutput {
    version: u8,
    code: String,
    category: Option<&'static str>,
    kind: Option<&'static str>,
    variant: &'static str,
    fragmented: bool,
    body_len: usize,
    /// Layout size for the kind and variant, when one is defined.
    expected_body_len: Option<usize>,
}

impl HeaderOutput {
    fn from_header(header: &FrameHeader<'_>) -> Self {
        let kind = header.mmtype();
        let variant = header.variant();
        Self {
            version: header.version(),
            code: code_hex(header.code()),
            category: header.category().map(|category| category.name()),
            kind: kind.map(|kind| kind.name()),
            variant: variant.suffix(),
            fragmented: !header.is_unfragmented(),
            body_len: header.body().len(),
            expected_body_len: kind.and_then(|kind| body_size(kind, variant)),
        }
    }
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = parse_hex(&args.hex, "frame")?;
    let header = FrameHeader::parse(&frame).map_err(|err| frame_error("inspect failed", err))?;
    let out = HeaderOutput::from_header(&header);

    if out.kind.is_none() {
        tracing::debug!(code = %out.code, "wire code maps to no known kind");
    }

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            table
                .add_row(vec!["version".to_string(), out.version.to_string()])
                .add_row(vec!["code".to_string(), out.code.clone()])
                .add_row(vec![
                    "category".to_string(),
                    out.category.unwrap_or("unknown").to_string(),
                ])
                .add_row(vec![
                    "kind".to_string(),
                    out.kind.unwrap_or("unknown").to_string(),
                ])
                .add_row(vec!["variant".to_string(), out.variant.to_string()])
                .add_row(vec!["fragmented".to_string(), out.fragmented.to_string()])
                .add_row(vec!["body".to_string(), out.body_len.to_string()])
                .add_row(vec![
                    "layout".to_string(),
                    size_cell(out.expected_body_len),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "mmv={} code={} kind={}.{} category={} body={}",
                out.version,
                out.code,
                out.kind.unwrap_or("unknown"),
                out.variant,
                out.category.unwrap_or("unknown"),
                out.body_len
            );
        }
        OutputFormat::Raw => print_raw(header.body()),
    }

    Ok(SUCCESS)
}
