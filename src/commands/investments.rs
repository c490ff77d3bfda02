// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewInvestment;
use crate::period::filter_investments_for_month;
use crate::store;
use crate::utils::{
    arg, fmt_money, maybe_print_json, month_or_current, parse_date, parse_decimal, pretty_table,
    today,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let inv = NewInvestment {
                description: arg(sub, "description")?.to_string(),
                amount: parse_decimal(arg(sub, "amount")?)?,
                category: arg(sub, "category")?.to_string(),
                date: parse_date(arg(sub, "date")?)?,
            };
            let saved = store::insert_investment(conn, &inv)?;
            println!(
                "Recorded investment {} on {} (id {})",
                fmt_money(&saved.amount),
                saved.date,
                saved.id
            );
        }
        Some(("list", sub)) => {
            let month = month_or_current(sub, today(sub)?)?;
            let all = store::list_investments(conn)?;
            let items = filter_investments_for_month(&all, month);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let data = items
                    .into_iter()
                    .map(|i| {
                        vec![
                            i.id.to_string(),
                            i.date.to_string(),
                            i.category,
                            i.description,
                            format!("{:.2}", i.amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Date", "Category", "Description", "Amount"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing investment id")?;
            store::delete_investment(conn, id)?;
            println!("Removed investment {}", id);
        }
        _ => {}
    }
    Ok(())
}
