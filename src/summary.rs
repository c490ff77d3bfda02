// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly financial summary.
//!
//! Personal money only ever comes out of the business as a withdrawal
//! ("Saque"): a paid business expense in that category. The business balance
//! is income minus paid operating costs, withdrawals and investments; the
//! personal balance is withdrawals minus paid personal expenses.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::{Expense, ExpenseKind, Income, Investment, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Business,
    Personal,
}

impl Scope {
    fn kind(&self) -> ExpenseKind {
        match self {
            Scope::Business => ExpenseKind::Business,
            Scope::Personal => ExpenseKind::Personal,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

impl FromStr for Scope {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ExpenseKind>() {
            Ok(ExpenseKind::Business) => Ok(Scope::Business),
            Ok(ExpenseKind::Personal) => Ok(Scope::Personal),
            Err(_) => Err(LedgerError::InvalidValue {
                field: "scope",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_investments: Decimal,
    pub paid_expenses: Decimal,
    pub unpaid_expenses: Decimal,
    pub saved_expenses: Decimal,
    /// Income minus paid expenses and investments within the requested scope.
    pub available_balance: Decimal,
    pub business_balance: Decimal,
    pub personal_balance: Decimal,
    pub total_withdrawals: Decimal,
    pub personal_paid_expenses: Decimal,
    pub expenses_by_source: BTreeMap<i64, Decimal>,
}

fn sum<'a, I>(it: I) -> Decimal
where
    I: Iterator<Item = &'a Decimal>,
{
    it.fold(Decimal::ZERO, |acc, a| acc + *a)
}

/// Summarises already month-filtered entries.
///
/// Income counts only once its payment date is on or before `today`.
/// `Scope::Personal` has no income and no investments of its own.
pub fn compute_summary(
    scope: Option<Scope>,
    incomes: &[Income],
    expenses: &[Expense],
    investments: &[Investment],
    today: NaiveDate,
) -> FinancialSummary {
    let in_scope: Vec<&Expense> = match scope {
        Some(s) => expenses.iter().filter(|e| e.kind == s.kind()).collect(),
        None => expenses.iter().collect(),
    };
    let personal = scope == Some(Scope::Personal);

    let total_income = if personal {
        Decimal::ZERO
    } else {
        sum(incomes
            .iter()
            .filter(|i| i.payment_date <= today)
            .map(|i| &i.amount))
    };
    let total_investments = if personal {
        Decimal::ZERO
    } else {
        sum(investments.iter().map(|i| &i.amount))
    };

    let total_expenses = sum(in_scope.iter().map(|e| &e.amount));
    let by_status = |status: PaymentStatus| {
        sum(in_scope
            .iter()
            .filter(|e| e.status == status)
            .map(|e| &e.amount))
    };
    let paid_expenses = by_status(PaymentStatus::Paid);
    let unpaid_expenses = by_status(PaymentStatus::Unpaid);
    let saved_expenses = by_status(PaymentStatus::Saved);

    let mut expenses_by_source = BTreeMap::new();
    for e in &in_scope {
        if let Some(src) = e.payment_source_id {
            *expenses_by_source.entry(src).or_insert(Decimal::ZERO) += e.amount;
        }
    }

    // Withdrawal model always looks at every filtered expense.
    let total_withdrawals = sum(expenses
        .iter()
        .filter(|e| e.is_withdrawal())
        .map(|e| &e.amount));
    let paid_operating = sum(expenses
        .iter()
        .filter(|e| {
            e.kind == ExpenseKind::Business
                && e.status == PaymentStatus::Paid
                && !e.is_withdrawal()
        })
        .map(|e| &e.amount));
    let personal_paid_expenses = sum(expenses
        .iter()
        .filter(|e| e.kind == ExpenseKind::Personal && e.status == PaymentStatus::Paid)
        .map(|e| &e.amount));

    let business_balance = total_income - paid_operating - total_withdrawals - total_investments;
    let personal_balance = total_withdrawals - personal_paid_expenses;

    FinancialSummary {
        total_income,
        total_expenses,
        total_investments,
        paid_expenses,
        unpaid_expenses,
        saved_expenses,
        available_balance: total_income - paid_expenses - total_investments,
        business_balance,
        personal_balance,
        total_withdrawals,
        personal_paid_expenses,
        expenses_by_source,
    }
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part / whole * Decimal::ONE_HUNDRED
}
