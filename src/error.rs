// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by the ledger store.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(rust_decimal::Decimal),
    #[error("invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures reading or writing the alert flags.
#[derive(Debug, Error)]
pub enum AlertStoreError {
    #[error("alert storage unavailable: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("corrupt alert flags: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("alert storage unavailable: {0}")]
    Unavailable(String),
}
