// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{client_label, resolve_client};
use crate::models::{IncomeUpdate, NewIncome};
use crate::period::filter_incomes_for_month;
use crate::store::{self, LedgerSnapshot};
use crate::utils::{
    arg, fmt_money, maybe_print_json, month_or_current, parse_date, parse_decimal, pretty_table,
    today,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing income id")?;
            store::delete_income(conn, id)?;
            println!("Removed income {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let income = NewIncome {
        description: arg(sub, "description")?.to_string(),
        amount: parse_decimal(arg(sub, "amount")?)?,
        client_id: resolve_client(conn, arg(sub, "client")?)?,
        payment_date: parse_date(arg(sub, "date")?)?,
        category: arg(sub, "category")?.to_string(),
    };
    let saved = store::insert_income(conn, &income)?;
    println!(
        "Recorded income {} on {} (id {})",
        fmt_money(&saved.amount),
        saved.payment_date,
        saved.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing income id")?;
    let upd = IncomeUpdate {
        description: sub.get_one::<String>("description").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        client_id: sub
            .get_one::<String>("client")
            .map(|s| resolve_client(conn, s))
            .transpose()?,
        payment_date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
    };
    let saved = store::update_income(conn, id, &upd)?;
    println!("Updated income {}", saved.id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today(sub)?;
    let month = month_or_current(sub, today)?;
    let snapshot = LedgerSnapshot::load(conn)?;
    let incomes = filter_incomes_for_month(&snapshot.incomes, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &incomes)? {
        return Ok(());
    }
    let rows = incomes
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                i.payment_date.to_string(),
                client_label(&snapshot, i.client_id),
                i.category.clone(),
                i.description.clone(),
                format!("{:.2}", i.amount),
                if i.payment_date > today {
                    "pending".into()
                } else {
                    "received".into()
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Client", "Category", "Description", "Amount", "State"],
            rows
        )
    );
    Ok(())
}
