// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::client_label;
use crate::period::MonthSnapshot;
use crate::store::LedgerSnapshot;
use crate::summary::{Scope, compute_summary};
use crate::utils::{maybe_print_json, month_or_current, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today(sub)?;
    let month = month_or_current(sub, today)?;
    let scope = sub
        .get_one::<String>("scope")
        .map(|s| s.parse::<Scope>())
        .transpose()?;

    let ledger = LedgerSnapshot::load(conn)?;
    let view = MonthSnapshot::for_month(&ledger, month);
    let s = compute_summary(
        scope,
        &view.incomes,
        &view.expenses,
        &view.investments,
        today,
    );
    tracing::debug!(%month, ?scope, "summary computed");

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }

    let money = |d: &rust_decimal::Decimal| format!("{:.2}", d);
    let mut rows = vec![
        vec!["Total income".into(), money(&s.total_income)],
        vec!["Total expenses".into(), money(&s.total_expenses)],
        vec!["Investments".into(), money(&s.total_investments)],
        vec!["Paid".into(), money(&s.paid_expenses)],
        vec!["Unpaid".into(), money(&s.unpaid_expenses)],
        vec!["Saved".into(), money(&s.saved_expenses)],
        vec!["Available".into(), money(&s.available_balance)],
        vec!["Business cash".into(), money(&s.business_balance)],
        vec!["Withdrawals".into(), money(&s.total_withdrawals)],
        vec!["Personal paid".into(), money(&s.personal_paid_expenses)],
        vec!["Personal balance".into(), money(&s.personal_balance)],
    ];
    for (src, amt) in &s.expenses_by_source {
        rows.push(vec![
            format!("Funded by {}", client_label(&ledger, *src)),
            money(amt),
        ]);
    }
    let title = match scope {
        Some(sc) => format!("{} ({})", month, sc),
        None => month.to_string(),
    };
    println!("{}", pretty_table(&[title.as_str(), "Value"], rows));
    Ok(())
}
