// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use crate::dre::{Dre, RowKind, build_dre};
use crate::store::LedgerSnapshot;
use crate::utils::{maybe_print_json, month_or_current, pretty_table, today};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub, today(sub)?)?;
    let ledger = LedgerSnapshot::load(conn)?;
    let dre = build_dre(&ledger.incomes, &ledger.expenses, &ledger.investments, month);

    if let Some(out) = sub.get_one::<String>("out") {
        let file =
            std::fs::File::create(out).with_context(|| format!("Create {}", out))?;
        write_csv(&dre, file)?;
        println!("Exported DRE for {} to {}", month, out);
        return Ok(());
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dre)? {
        return Ok(());
    }
    let rows = dre
        .rows()
        .into_iter()
        .map(|r| {
            let label = match r.kind {
                RowKind::Item => format!("  {}", r.label),
                _ => r.label,
            };
            vec![label, r.value.map(|v| format!("{:.2}", v)).unwrap_or_default()]
        })
        .collect();
    let title = format!("DRE {}", month);
    println!("{}", pretty_table(&[title.as_str(), "Value"], rows));
    Ok(())
}

fn br_number(v: Decimal) -> String {
    format!("{:.2}", v).replace('.', ",")
}

/// Semicolon-separated statement with comma decimals, as spreadsheets in
/// pt-BR locales expect.
pub fn write_csv<W: Write>(dre: &Dre, out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(out);
    wtr.write_record(["DRE", &dre.month.to_string()])?;
    wtr.write_record(["Description", "Value"])?;
    for r in dre.rows() {
        match r.kind {
            RowKind::Section => wtr.write_record([r.label.as_str(), ""])?,
            RowKind::Item => {
                let v = r.value.map(br_number).unwrap_or_default();
                wtr.write_record([format!("  {}", r.label), v])?
            }
            RowKind::Total | RowKind::Result => {
                let v = r.value.map(br_number).unwrap_or_default();
                wtr.write_record([r.label, v])?
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
