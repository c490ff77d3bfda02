// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month selection and the per-month view of the ledger.
//!
//! Fixed expenses are registered once and recur: for any month on or after the
//! one they were first due, they show up as a copy whose due date is moved into
//! that month. The stored record is never touched.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::{Expense, Income, Investment};
use crate::store::LedgerSnapshot;

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && NaiveDate::from_ymd_opt(year, month, 1).is_some() {
            Some(Month { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let days = self.days_in_month();
        NaiveDate::from_ymd_opt(self.year, self.month, days).unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Same day of month inside `self`, clamped to the month's last day.
    pub fn with_day_of(&self, date: NaiveDate) -> NaiveDate {
        let day = date.day().min(self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.last_day())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidValue {
            field: "month",
            value: s.to_string(),
        };
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

/// Expenses active in `month`. Fixed expenses first due in an earlier month
/// are projected forward; fixed expenses anchored in a later month are left out.
pub fn filter_expenses_for_month(expenses: &[Expense], month: Month) -> Vec<Expense> {
    expenses
        .iter()
        .filter_map(|e| {
            let due = Month::of(e.due_date);
            if due == month {
                Some(e.clone())
            } else if e.is_fixed && due < month {
                Some(Expense {
                    due_date: month.with_day_of(e.due_date),
                    ..e.clone()
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn filter_incomes_for_month(incomes: &[Income], month: Month) -> Vec<Income> {
    incomes
        .iter()
        .filter(|i| month.contains(i.payment_date))
        .cloned()
        .collect()
}

pub fn filter_investments_for_month(investments: &[Investment], month: Month) -> Vec<Investment> {
    investments
        .iter()
        .filter(|i| month.contains(i.date))
        .cloned()
        .collect()
}

/// The three filtered collections for one month.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthSnapshot {
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub investments: Vec<Investment>,
}

impl MonthSnapshot {
    pub fn for_month(ledger: &LedgerSnapshot, month: Month) -> Self {
        MonthSnapshot {
            incomes: filter_incomes_for_month(&ledger.incomes, month),
            expenses: filter_expenses_for_month(&ledger.expenses, month),
            investments: filter_investments_for_month(&ledger.investments, month),
        }
    }
}
