// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::period::MonthSnapshot;
use crate::reports;
use crate::store::LedgerSnapshot;
use crate::utils::{maybe_print_json, month_or_current, pretty_table, today};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("allocation", sub)) => allocation(conn, sub)?,
        Some(("sources", sub)) => sources(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("evolution", sub)) => evolution(conn, sub)?,
        Some(("compare", sub)) => compare(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn allocation(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today(sub)?;
    let month = month_or_current(sub, today)?;
    let ledger = LedgerSnapshot::load(conn)?;
    let view = MonthSnapshot::for_month(&ledger, month);
    let items = reports::client_allocations(&ledger.clients, &view.incomes, &view.expenses, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let data = items
        .into_iter()
        .map(|a| {
            vec![
                a.client_name,
                format!("{:.2}", a.total_received),
                format!("{:.2}", a.total_expected),
                format!("{:.2}", a.paid_expenses),
                format!("{:.2}", a.planned_expenses),
                format!("{:.2}", a.balance),
                format!("{}%", a.percent_allocated.round()),
                if a.over_budget { "over".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Client", "Received", "Expected", "Paid", "Planned", "Balance", "Allocated", ""
            ],
            data
        )
    );
    Ok(())
}

fn sources(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = LedgerSnapshot::load(conn)?;
    let items = reports::source_consolidation(&ledger.clients, &ledger.incomes, &ledger.expenses);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data = items
            .into_iter()
            .map(|s| {
                vec![
                    s.client_name,
                    format!("{:.2}", s.total_income),
                    format!("{:.2}", s.total_allocated),
                    format!("{:.2}", s.available),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Client", "Income", "Allocated", "Available"], data)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub, today(sub)?)?;
    let ledger = LedgerSnapshot::load(conn)?;
    let view = MonthSnapshot::for_month(&ledger, month);
    let items = reports::expense_categories(&view.expenses);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data = items
            .into_iter()
            .map(|c| {
                vec![
                    c.category,
                    format!("{:.2}", c.value),
                    format!("{:.1}%", c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    }
    Ok(())
}

fn evolution(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let end = month_or_current(sub, today(sub)?)?;
    let months = sub.get_one::<u16>("months").copied().map_or(12, usize::from);
    let ledger = LedgerSnapshot::load(conn)?;
    let items = reports::evolution(&ledger.incomes, &ledger.expenses, end, months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data = items
            .into_iter()
            .map(|f| {
                vec![
                    f.month.to_string(),
                    format!("{:.2}", f.income),
                    format!("{:.2}", f.expenses),
                    format!("{:.2}", f.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Balance"], data)
        );
    }
    Ok(())
}

fn compare(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let year = match sub.get_one::<i32>("year") {
        Some(y) => *y,
        None => today(sub)?.year(),
    };
    let ledger = LedgerSnapshot::load(conn)?;
    let items = reports::year_comparison(&ledger.incomes, &ledger.expenses, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data = items
            .into_iter()
            .map(|r| {
                vec![
                    format!("{:02}", r.month),
                    format!("{:.2}", r.income_previous),
                    format!("{:.2}", r.income_current),
                    format!("{:.2}", r.expenses_previous),
                    format!("{:.2}", r.expenses_current),
                ]
            })
            .collect();
        let prev = year.checked_sub(1).map_or_else(|| "-".into(), |y| y.to_string());
        let headers = [
            "Month".to_string(),
            format!("Income {}", prev),
            format!("Income {}", year),
            format!("Expenses {}", prev),
            format!("Expenses {}", year),
        ];
        let refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        println!("{}", pretty_table(&refs, data));
    }
    Ok(())
}
