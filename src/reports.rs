// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-client, per-category and per-month views built on the period filter.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Client, Expense, Income, PaymentStatus};
use crate::period::{self, Month};
use crate::summary::percent_of;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientAllocation {
    pub client_id: i64,
    pub client_name: String,
    pub total_received: Decimal,
    pub total_expected: Decimal,
    pub paid_expenses: Decimal,
    pub planned_expenses: Decimal,
    pub total_allocated: Decimal,
    pub balance: Decimal,
    pub over_budget: bool,
    pub percent_allocated: Decimal,
}

/// How much of each client's revenue is already earmarked for expenses.
/// Expects month-filtered incomes and expenses.
pub fn client_allocations(
    clients: &[Client],
    incomes: &[Income],
    expenses: &[Expense],
    today: NaiveDate,
) -> Vec<ClientAllocation> {
    clients
        .iter()
        .filter_map(|c| {
            let mine = incomes.iter().filter(|i| i.client_id == c.id);
            let total_expected = mine.clone().fold(Decimal::ZERO, |a, i| a + i.amount);
            let total_received = mine
                .filter(|i| i.payment_date <= today)
                .fold(Decimal::ZERO, |a, i| a + i.amount);

            let funded = expenses
                .iter()
                .filter(|e| e.payment_source_id == Some(c.id));
            let paid_expenses = funded
                .clone()
                .filter(|e| e.status == PaymentStatus::Paid)
                .fold(Decimal::ZERO, |a, e| a + e.amount);
            let planned_expenses = funded
                .filter(|e| e.status != PaymentStatus::Paid)
                .fold(Decimal::ZERO, |a, e| a + e.amount);
            let total_allocated = paid_expenses + planned_expenses;

            if total_expected.is_zero() && total_allocated.is_zero() {
                return None;
            }
            Some(ClientAllocation {
                client_id: c.id,
                client_name: c.name.clone(),
                total_received,
                total_expected,
                paid_expenses,
                planned_expenses,
                total_allocated,
                balance: total_received - total_allocated,
                over_budget: total_allocated > total_received,
                percent_allocated: percent_of(total_allocated, total_received),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceTotals {
    pub client_id: i64,
    pub client_name: String,
    pub total_income: Decimal,
    pub total_allocated: Decimal,
    pub available: Decimal,
}

/// All-time income and allocated expenses per client.
pub fn source_consolidation(
    clients: &[Client],
    incomes: &[Income],
    expenses: &[Expense],
) -> Vec<SourceTotals> {
    clients
        .iter()
        .map(|c| {
            let total_income = incomes
                .iter()
                .filter(|i| i.client_id == c.id)
                .fold(Decimal::ZERO, |a, i| a + i.amount);
            let total_allocated = expenses
                .iter()
                .filter(|e| e.payment_source_id == Some(c.id))
                .fold(Decimal::ZERO, |a, e| a + e.amount);
            SourceTotals {
                client_id: c.id,
                client_name: c.name.clone(),
                total_income,
                total_allocated,
                available: total_income - total_allocated,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncomeSplit {
    pub received: Decimal,
    pub pending: Decimal,
    pub total: Decimal,
}

/// Received (paid on or before `today`) versus still pending.
pub fn income_split(incomes: &[Income], today: NaiveDate) -> IncomeSplit {
    let mut split = IncomeSplit::default();
    for i in incomes {
        if i.payment_date <= today {
            split.received += i.amount;
        } else {
            split.pending += i.amount;
        }
    }
    split.total = split.received + split.pending;
    split
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Expense totals per category, largest first.
pub fn expense_categories(expenses: &[Expense]) -> Vec<CategoryShare> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for e in expenses {
        *totals.entry(e.category.as_str()).or_insert(Decimal::ZERO) += e.amount;
    }
    let total = totals.values().fold(Decimal::ZERO, |a, v| a + *v);
    let mut items: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, value)| CategoryShare {
            category: category.to_string(),
            value,
            percentage: percent_of(value, total),
        })
        .collect();
    items.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.category.cmp(&b.category)));
    items
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthFlow {
    pub month: Month,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

fn month_flow(incomes: &[Income], expenses: &[Expense], month: Month) -> MonthFlow {
    let income = period::filter_incomes_for_month(incomes, month)
        .iter()
        .fold(Decimal::ZERO, |a, i| a + i.amount);
    let spent = period::filter_expenses_for_month(expenses, month)
        .iter()
        .fold(Decimal::ZERO, |a, e| a + e.amount);
    MonthFlow {
        month,
        income,
        expenses: spent,
        balance: income - spent,
    }
}

/// Longest window `evolution` will produce: twenty years.
pub const MAX_EVOLUTION_MONTHS: usize = 240;

/// `months` consecutive months ending at `end`, oldest first. Windows longer
/// than [`MAX_EVOLUTION_MONTHS`] are cut to that length.
pub fn evolution(
    incomes: &[Income],
    expenses: &[Expense],
    end: Month,
    months: usize,
) -> Vec<MonthFlow> {
    let months = months.min(MAX_EVOLUTION_MONTHS);
    let mut window = Vec::with_capacity(months);
    let mut m = end;
    for _ in 0..months {
        window.push(m);
        m = m.pred();
    }
    window
        .into_iter()
        .rev()
        .map(|m| month_flow(incomes, expenses, m))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearComparisonRow {
    pub month: u32,
    pub income_previous: Decimal,
    pub income_current: Decimal,
    pub expenses_previous: Decimal,
    pub expenses_current: Decimal,
}

/// Month-by-month income and expenses of `year` next to `year - 1`. A year
/// outside the calendar range yields no rows; a missing previous year counts
/// as zero.
pub fn year_comparison(
    incomes: &[Income],
    expenses: &[Expense],
    year: i32,
) -> Vec<YearComparisonRow> {
    (1..=12)
        .filter_map(|m| {
            let cur = Month::new(year, m)?;
            let c = month_flow(incomes, expenses, cur);
            let p = match year.checked_sub(1).and_then(|y| Month::new(y, m)) {
                Some(prev) => month_flow(incomes, expenses, prev),
                None => MonthFlow {
                    month: cur,
                    income: Decimal::ZERO,
                    expenses: Decimal::ZERO,
                    balance: Decimal::ZERO,
                },
            };
            Some(YearComparisonRow {
                month: m,
                income_previous: p.income,
                income_current: c.income,
                expenses_previous: p.expenses,
                expenses_current: c.expenses,
            })
        })
        .collect()
}
