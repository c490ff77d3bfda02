// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Category marking a business expense as money moved to the owner (pro-labore).
pub const WITHDRAWAL_CATEGORY: &str = "Saque";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Saved,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Saved => "saved",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            "saved" => Ok(PaymentStatus::Saved),
            other => Err(LedgerError::InvalidValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Which side of the books an expense belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Business,
    Personal,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Business => "business",
            ExpenseKind::Personal => "personal",
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "business" => Ok(ExpenseKind::Business),
            "personal" => Ok(ExpenseKind::Personal),
            other => Err(LedgerError::InvalidValue {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub client_id: i64,
    pub payment_date: NaiveDate,
    pub category: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    /// Client whose revenue funded this expense; only meaningful once paid or saved.
    pub payment_source_id: Option<i64>,
    pub kind: ExpenseKind,
    pub is_fixed: bool,
    pub created_at: NaiveDateTime,
}

impl Expense {
    pub fn is_withdrawal(&self) -> bool {
        self.kind == ExpenseKind::Business
            && self.category == WITHDRAWAL_CATEGORY
            && self.status == PaymentStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

// Inputs for the store; ids and timestamps are assigned on insert.

#[derive(Debug, Clone)]
pub struct NewIncome {
    pub description: String,
    pub amount: Decimal,
    pub client_id: i64,
    pub payment_date: NaiveDate,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub payment_source_id: Option<i64>,
    pub kind: ExpenseKind,
    pub is_fixed: bool,
}

#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct IncomeUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub client_id: Option<i64>,
    pub payment_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    /// `Some(None)` clears the source.
    pub payment_source_id: Option<Option<i64>>,
    pub kind: Option<ExpenseKind>,
    pub is_fixed: Option<bool>,
}
