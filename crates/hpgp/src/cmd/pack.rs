use hpgp_frame::{body_size, frame_len, pack, MmType, Variant, HEADER_SIZE};
use serde::Serialize;

use crate::cmd::{parse_hex, PackArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{code_hex, new_table, print_json, print_raw, OutputFormat};

#[derive(Serialize, Debug, PartialEq, Eq)]
struct PackedOutput {
    kind: &'static str,
    variant: &'static str,
    code: String,
    body_len: usize,
    frame_len: usize,
    frame: String,
}

pub fn run(args: PackArgs, format: OutputFormat) -> CliResult<i32> {
    let body = match &args.hex {
        Some(hex) => parse_hex(hex, "--hex")?,
        None => Vec::new(),
    };

    let frame = pack_frame(args.kind, args.variant, &body, args.capacity)?;
    let body_len = frame.len() - HEADER_SIZE;

    match format {
        OutputFormat::Json => print_json(&packed_output(args.kind, args.variant, &frame)),
        OutputFormat::Table => {
            let out = packed_output(args.kind, args.variant, &frame);
            let mut table = new_table(vec!["KIND", "VARIANT", "CODE", "BODY", "FRAME"]);
            table.add_row(vec![
                out.kind.to_string(),
                out.variant.to_string(),
                out.code,
                out.body_len.to_string(),
                out.frame,
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{}.{} code={} body={} frame={}",
                args.kind,
                args.variant,
                code_hex(args.kind.code_with(args.variant)),
                body_len,
                hex::encode(&frame)
            );
        }
        OutputFormat::Raw => print_raw(&frame),
    }

    Ok(SUCCESS)
}

/// Pack into a buffer of `capacity` bytes and return the frame as it would be
/// sent: header plus the reported body length.
fn pack_frame(kind: MmType, variant: Variant, body: &[u8], capacity: usize) -> CliResult<Vec<u8>> {
    match body_size(kind, variant) {
        None => tracing::warn!(%kind, %variant, "no body defined; packing header only"),
        Some(size) if body.len() > size => {
            tracing::warn!(
                %kind,
                %variant,
                given = body.len(),
                size,
                "body longer than its layout; extra bytes dropped"
            );
        }
        Some(size) if body.len() < size => {
            tracing::info!(
                %kind,
                %variant,
                given = body.len(),
                size,
                "body shorter than its layout; remainder zero-filled"
            );
        }
        Some(_) => {}
    }

    let mut buf = vec![0u8; capacity];
    let len = pack(kind, variant, body, &mut buf).map_err(|err| frame_error("pack failed", err))?;
    buf.truncate(frame_len(len));
    Ok(buf)
}

fn packed_output(kind: MmType, variant: Variant, frame: &[u8]) -> PackedOutput {
    PackedOutput {
        kind: kind.name(),
        variant: variant.suffix(),
        code: code_hex(kind.code_with(variant)),
        body_len: frame.len() - HEADER_SIZE,
        frame_len: frame.len(),
        frame: hex::encode(frame),
    }
}
