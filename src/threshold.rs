// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! MEI annual revenue limit tracking.
//!
//! [`compute_year_progress`] is a pure function over the income history.
//! [`ThresholdMonitor`] adds the one-shot alerts: each tier fires at most once
//! per calendar year, remembered through an [`AlertFlagStore`].

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::error::AlertStoreError;
use crate::models::Income;
use crate::summary::percent_of;

pub const ANNUAL_LIMIT: Decimal = Decimal::from_parts(81000, 0, 0, false, 0);
pub const ATTENTION_MARK: Decimal = Decimal::from_parts(56700, 0, 0, false, 0);
pub const URGENT_MARK: Decimal = Decimal::from_parts(72900, 0, 0, false, 0);
pub const TOLERANCE_CEILING: Decimal = Decimal::from_parts(97200, 0, 0, false, 0);
pub const MONTHLY_AVERAGE: Decimal = Decimal::from_parts(6750, 0, 0, false, 0);

/// Income categories an MEI is not allowed to operate in.
pub const PROBLEMATIC_CATEGORIES: [&str; 3] = [
    "Importação",
    "Revenda de produtos não permitidos",
    "Serviços financeiros",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Safe,
    Attention,
    Urgent,
    Exceeded,
    Critical,
}

impl Zone {
    /// Highest tier first; the first match wins.
    pub fn classify(percentage: Decimal) -> Zone {
        if percentage >= Decimal::from(120) {
            Zone::Critical
        } else if percentage >= Decimal::from(100) {
            Zone::Exceeded
        } else if percentage >= Decimal::from(90) {
            Zone::Urgent
        } else if percentage >= Decimal::from(70) {
            Zone::Attention
        } else {
            Zone::Safe
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Zone::Safe => "You are in the safe zone",
            Zone::Attention => "Attention: 70% of the annual limit used",
            Zone::Urgent => "Urgent: 90% of the annual limit used",
            Zone::Exceeded => "Limit exceeded: up to R$ 97,200 before penalties",
            Zone::Critical => "Critical: tolerance margin exceeded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionAlert {
    Warning,
    Critical,
}

/// How far revenue is from the next tier marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextMarker {
    pub zone: Zone,
    pub marker: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProgress {
    pub year: i32,
    pub accumulated: Decimal,
    pub current_month: u32,
    pub projection: Decimal,
    pub percentage: Decimal,
    pub projection_percentage: Decimal,
    pub zone: Zone,
    pub problematic_categories: Vec<String>,
}

impl YearProgress {
    pub fn remaining_to_next(&self) -> Option<NextMarker> {
        let (zone, marker) = match self.zone {
            Zone::Safe => (Zone::Attention, ATTENTION_MARK),
            Zone::Attention => (Zone::Urgent, URGENT_MARK),
            Zone::Urgent => (Zone::Exceeded, ANNUAL_LIMIT),
            Zone::Exceeded => (Zone::Critical, TOLERANCE_CEILING),
            Zone::Critical => return None,
        };
        Some(NextMarker {
            zone,
            marker,
            remaining: marker - self.accumulated,
        })
    }

    pub fn projection_alert(&self) -> Option<ProjectionAlert> {
        if self.projection_percentage > Decimal::from(120) {
            Some(ProjectionAlert::Critical)
        } else if self.projection_percentage > Decimal::ONE_HUNDRED {
            Some(ProjectionAlert::Warning)
        } else {
            None
        }
    }
}

/// Revenue received in `year` up to and including `today`, with a linear
/// full-year projection.
///
/// A past year counts all twelve months; a future year has nothing received
/// yet and `current_month` 0.
pub fn compute_year_progress(incomes: &[Income], today: NaiveDate, year: i32) -> YearProgress {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    let end = today.min(year_end);
    let current_month = match year.cmp(&today.year()) {
        Ordering::Less => 12,
        Ordering::Equal => today.month(),
        Ordering::Greater => 0,
    };
    let year_incomes: Vec<&Income> = incomes
        .iter()
        .filter(|i| i.payment_date >= start && i.payment_date <= end)
        .collect();

    let accumulated = year_incomes
        .iter()
        .fold(Decimal::ZERO, |acc, i| acc + i.amount);
    let projection = if current_month > 0 {
        accumulated / Decimal::from(current_month) * Decimal::from(12)
    } else {
        Decimal::ZERO
    };
    let percentage = percent_of(accumulated, ANNUAL_LIMIT);

    let mut problematic_categories: Vec<String> = Vec::new();
    for i in &year_incomes {
        if PROBLEMATIC_CATEGORIES.contains(&i.category.as_str())
            && !problematic_categories.contains(&i.category)
        {
            problematic_categories.push(i.category.clone());
        }
    }

    YearProgress {
        year,
        accumulated,
        current_month,
        projection,
        percentage,
        projection_percentage: percent_of(projection, ANNUAL_LIMIT),
        zone: Zone::classify(percentage),
        problematic_categories,
    }
}

/// Alert tiers, one flag each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertLevel {
    Attention70,
    Urgent90,
    Exceeded100,
    Critical120,
}

impl AlertLevel {
    const HIGH_TO_LOW: [AlertLevel; 4] = [
        AlertLevel::Critical120,
        AlertLevel::Exceeded100,
        AlertLevel::Urgent90,
        AlertLevel::Attention70,
    ];

    pub fn threshold(&self) -> Decimal {
        match self {
            AlertLevel::Attention70 => Decimal::from(70),
            AlertLevel::Urgent90 => Decimal::from(90),
            AlertLevel::Exceeded100 => Decimal::from(100),
            AlertLevel::Critical120 => Decimal::from(120),
        }
    }

    /// The highest tier `percentage` has reached, if any.
    pub fn highest_reached(percentage: Decimal) -> Option<AlertLevel> {
        Self::HIGH_TO_LOW
            .into_iter()
            .find(|l| percentage >= l.threshold())
    }

    pub fn severity(&self) -> Severity {
        match self {
            AlertLevel::Attention70 | AlertLevel::Urgent90 => Severity::Warning,
            AlertLevel::Exceeded100 | AlertLevel::Critical120 => Severity::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AlertLevel::Attention70 => "Attention: you reached 70% of the annual MEI limit",
            AlertLevel::Urgent90 => "Urgent: you reached 90% of the annual MEI limit",
            AlertLevel::Exceeded100 => {
                "MEI limit exceeded! You have up to R$ 97,200 before penalties"
            }
            AlertLevel::Critical120 => {
                "CRITICAL: tolerance margin exceeded! Contact your accountant"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub year: i32,
    pub level: AlertLevel,
    pub severity: Severity,
    pub message: &'static str,
}

/// Which alerts already fired for a year. Serialised as
/// `{"alert70":..,"alert90":..,"alert100":..,"alert120":..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFlags {
    pub alert70: bool,
    pub alert90: bool,
    pub alert100: bool,
    pub alert120: bool,
}

impl AlertFlags {
    pub fn is_set(&self, level: AlertLevel) -> bool {
        match level {
            AlertLevel::Attention70 => self.alert70,
            AlertLevel::Urgent90 => self.alert90,
            AlertLevel::Exceeded100 => self.alert100,
            AlertLevel::Critical120 => self.alert120,
        }
    }

    pub fn mark(&mut self, level: AlertLevel) {
        match level {
            AlertLevel::Attention70 => self.alert70 = true,
            AlertLevel::Urgent90 => self.alert90 = true,
            AlertLevel::Exceeded100 => self.alert100 = true,
            AlertLevel::Critical120 => self.alert120 = true,
        }
    }
}

pub fn alert_key(year: i32) -> String {
    format!("mei_alerts_shown_{year}")
}

/// Durable storage for alert flags, one entry per year.
pub trait AlertFlagStore {
    /// Flags for `year`; all false when nothing was stored yet.
    fn get(&self, year: i32) -> Result<AlertFlags, AlertStoreError>;
    fn set(&mut self, year: i32, flags: &AlertFlags) -> Result<(), AlertStoreError>;
}

/// Flags kept as JSON in the `settings` table.
pub struct SqliteAlertStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteAlertStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteAlertStore { conn }
    }
}

impl AlertFlagStore for SqliteAlertStore<'_> {
    fn get(&self, year: i32) -> Result<AlertFlags, AlertStoreError> {
        match db::get_setting(self.conn, &alert_key(year))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(AlertFlags::default()),
        }
    }

    fn set(&mut self, year: i32, flags: &AlertFlags) -> Result<(), AlertStoreError> {
        let raw = serde_json::to_string(flags)?;
        db::set_setting(self.conn, &alert_key(year), &raw)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    entries: HashMap<String, AlertFlags>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertFlagStore for MemoryAlertStore {
    fn get(&self, year: i32) -> Result<AlertFlags, AlertStoreError> {
        Ok(self
            .entries
            .get(&alert_key(year))
            .copied()
            .unwrap_or_default())
    }

    fn set(&mut self, year: i32, flags: &AlertFlags) -> Result<(), AlertStoreError> {
        self.entries.insert(alert_key(year), *flags);
        Ok(())
    }
}

/// Dispatches each threshold alert once per year.
///
/// `observe` takes `&mut self`, so the flag read and write for one check never
/// interleave with another check on the same monitor.
pub struct ThresholdMonitor<S> {
    store: S,
}

impl<S: AlertFlagStore> ThresholdMonitor<S> {
    pub fn new(store: S) -> Self {
        ThresholdMonitor { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Current flags, or all false when the store cannot be read.
    pub fn flags(&self, year: i32) -> AlertFlags {
        match self.store.get(year) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(year, error = %e, "could not read alert flags, assuming none shown");
                AlertFlags::default()
            }
        }
    }

    /// Fires the highest tier reached by `progress`, unless it already fired
    /// this year. Jumping from below 70% straight to 95% fires only the 90%
    /// alert.
    pub fn observe(&mut self, progress: &YearProgress) -> Option<AlertEvent> {
        let level = AlertLevel::highest_reached(progress.percentage)?;
        let mut flags = self.flags(progress.year);
        if flags.is_set(level) {
            return None;
        }
        flags.mark(level);
        if let Err(e) = self.store.set(progress.year, &flags) {
            tracing::warn!(year = progress.year, error = %e, "could not persist alert flag");
        }
        tracing::info!(year = progress.year, ?level, percentage = %progress.percentage.round_dp(1), "MEI limit alert");
        Some(AlertEvent {
            year: progress.year,
            level,
            severity: level.severity(),
            message: level.message(),
        })
    }
}
