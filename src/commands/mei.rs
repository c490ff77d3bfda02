// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::threshold::{
    ANNUAL_LIMIT, AlertEvent, ProjectionAlert, SqliteAlertStore, ThresholdMonitor, YearProgress,
    compute_year_progress,
};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

/// Progress for `year` plus the alert this check fired, if any.
#[derive(Debug, Clone, Serialize)]
pub struct MeiStatus {
    pub progress: YearProgress,
    pub alert: Option<AlertEvent>,
}

/// Computes progress and runs the one-shot alert check. Only the running year
/// touches the stored alert flags; past and future years are read-only.
pub fn check(conn: &Connection, today: NaiveDate, year: i32) -> Result<MeiStatus> {
    let incomes = store::list_incomes(conn)?;
    let progress = compute_year_progress(&incomes, today, year);
    let alert = if year == today.year() {
        ThresholdMonitor::new(SqliteAlertStore::new(conn)).observe(&progress)
    } else {
        None
    };
    Ok(MeiStatus { progress, alert })
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today(sub)?;
    let year = sub.get_one::<i32>("year").copied().unwrap_or(today.year());
    let status = check(conn, today, year)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        return Ok(());
    }
    let MeiStatus {
        progress,
        alert: event,
    } = status;

    if let Some(ev) = &event {
        eprintln!("[{:?}] {}", ev.severity, ev.message);
    }

    let mut rows = vec![
        vec![
            "Accumulated".into(),
            format!(
                "{} of {} ({:.1}%)",
                fmt_money(&progress.accumulated),
                fmt_money(&ANNUAL_LIMIT),
                progress.percentage
            ),
        ],
        vec!["Status".into(), progress.zone.describe().into()],
        vec![
            "Projection".into(),
            format!(
                "{} ({:.1}% of limit)",
                fmt_money(&progress.projection),
                progress.projection_percentage
            ),
        ],
    ];
    if let Some(next) = progress.remaining_to_next() {
        rows.push(vec![
            "Next marker".into(),
            format!("{} left until {:?}", fmt_money(&next.remaining), next.zone),
        ]);
    }
    match progress.projection_alert() {
        Some(ProjectionAlert::Critical) => rows.push(vec![
            "Projection alert".into(),
            "Projection goes past the tolerance margin".into(),
        ]),
        Some(ProjectionAlert::Warning) => rows.push(vec![
            "Projection alert".into(),
            "Projection goes past the MEI limit; review revenue or consider migrating to ME"
                .into(),
        ]),
        None => {}
    }
    if !progress.problematic_categories.is_empty() {
        rows.push(vec![
            "Categories not allowed for MEI".into(),
            progress.problematic_categories.join(", "),
        ]);
    }
    let title = format!("MEI limit {}", progress.year);
    println!("{}", pretty_table(&[title.as_str(), ""], rows));
    Ok(())
}
