// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{client_label, resolve_client};
use crate::models::{ExpenseKind, ExpenseUpdate, NewExpense, PaymentStatus};
use crate::period::filter_expenses_for_month;
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
        Some(("status", sub)) => status(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing expense id")?;
            store::delete_expense(conn, id)?;
            println!("Removed expense {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn source(conn: &Connection, sub: &clap::ArgMatches) -> Result<Option<i64>> {
    sub.get_one::<String>("source")
        .map(|s| resolve_client(conn, s))
        .transpose()
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let status: PaymentStatus = arg(sub, "status")?.parse()?;
    let expense = NewExpense {
        description: arg(sub, "description")?.to_string(),
        amount: parse_decimal(arg(sub, "amount")?)?,
        category: arg(sub, "category")?.to_string(),
        due_date: parse_date(arg(sub, "date")?)?,
        status,
        // a source only makes sense once money is committed
        payment_source_id: if status == PaymentStatus::Unpaid {
            None
        } else {
            source(conn, sub)?
        },
        kind: arg(sub, "type")?.parse()?,
        is_fixed: sub.get_flag("fixed"),
    };
    let saved = store::insert_expense(conn, &expense)?;
    println!(
        "Recorded {} expense {} due {}{} (id {})",
        saved.kind,
        fmt_money(&saved.amount),
        saved.due_date,
        if saved.is_fixed { ", monthly" } else { "" },
        saved.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing expense id")?;
    let upd = ExpenseUpdate {
        description: sub.get_one::<String>("description").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        due_date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<ExpenseKind>())
            .transpose()?,
        is_fixed: sub.get_one::<bool>("fixed").copied(),
        ..Default::default()
    };
    let saved = store::update_expense(conn, id, &upd)?;
    println!("Updated expense {}", saved.id);
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing expense id")?;
    let status: PaymentStatus = arg(sub, "status")?.parse()?;
    let src = if status == PaymentStatus::Unpaid {
        None
    } else {
        source(conn, sub)?
    };
    let saved = store::set_expense_status(conn, id, status, src)?;
    println!("Expense {} is now {}", saved.id, saved.status);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub, today(sub)?)?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<ExpenseKind>())
        .transpose()?;
    let snapshot = LedgerSnapshot::load(conn)?;
    let expenses: Vec<_> = filter_expenses_for_month(&snapshot.expenses, month)
        .into_iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        return Ok(());
    }
    let rows = expenses
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.due_date.to_string(),
                e.kind.to_string(),
                e.category.clone(),
                e.description.clone(),
                format!("{:.2}", e.amount),
                e.status.to_string(),
                e.payment_source_id
                    .map(|id| client_label(&snapshot, id))
                    .unwrap_or_default(),
                if e.is_fixed { "yes".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Id",
                "Due",
                "Type",
                "Category",
                "Description",
                "Amount",
                "Status",
                "Source",
                "Fixed"
            ],
            rows
        )
    );
    Ok(())
}
