use hpgp_frame::{body_size, MmType, Variant};
use serde::Serialize;

use crate::cmd::TableArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{code_hex, new_table, print_json, size_cell, OutputFormat};

#[derive(Serialize, Debug)]
struct KindRow {
    ordinal: u32,
    name: &'static str,
    alias: &'static str,
    category: &'static str,
    code: String,
    req: Option<usize>,
    cnf: Option<usize>,
    ind: Option<usize>,
    rsp: Option<usize>,
}

fn rows() -> Vec<KindRow> {
    MmType::ALL
        .into_iter()
        .map(|kind| KindRow {
            ordinal: kind.ordinal(),
            name: kind.name(),
            alias: kind.alias(),
            category: kind.category().name(),
            code: code_hex(kind.code()),
            req: body_size(kind, Variant::Request),
            cnf: body_size(kind, Variant::Confirm),
            ind: body_size(kind, Variant::Indication),
            rsp: body_size(kind, Variant::Response),
        })
        .collect()
}

pub fn run(_args: TableArgs, format: OutputFormat) -> CliResult<i32> {
    let rows = rows();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = new_table(vec![
                "#", "NAME", "ALIAS", "CATEGORY", "CODE", "REQ", "CNF", "IND", "RSP",
            ]);
            for row in &rows {
                table.add_row(vec![
                    row.ordinal.to_string(),
                    row.name.to_string(),
                    row.alias.to_string(),
                    row.category.to_string(),
                    row.code.clone(),
                    size_cell(row.req),
                    size_cell(row.cnf),
                    size_cell(row.ind),
                    size_cell(row.rsp),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!(
                    "{}\t{}\t{}\treq={} cnf={} ind={} rsp={}",
                    row.code,
                    row.name,
                    row.alias,
                    size_cell(row.req),
                    size_cell(row.cnf),
                    size_cell(row.ind),
                    size_cell(row.rsp)
                );
            }
        }
    }

    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_kind() {
        let rows = rows();
        assert_eq!(rows.len(), MmType::COUNT);
        assert_eq!(rows[0].name, "CC_DISCOVER_LIST");
        assert_eq!(rows[0].code, "0x0014");

        let set_key = &rows[MmType::SetKey.ordinal() as usize];
        assert_eq!((set_key.req, set_key.cnf), (Some(38), None));
        assert_eq!((set_key.ind, set_key.rsp), (None, None));

        let defined: usize = rows
            .iter()
            .map(|row| [row.req, row.cnf, row.ind, row.rsp].iter().flatten().count())
            .sum();
        assert_eq!(defined, 9);
    }
}
