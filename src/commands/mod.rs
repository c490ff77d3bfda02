// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod clients;
pub mod incomes;
pub mod expenses;
pub mod investments;
pub mod summary;
pub mod mei;
pub mod dre;
pub mod reports;

use anyhow::Result;
use rusqlite::Connection;

use crate::store;

/// Accepts a client id or an exact client name.
pub fn resolve_client(conn: &Connection, s: &str) -> Result<i64> {
    if let Ok(id) = s.trim().parse::<i64>() {
        return Ok(id);
    }
    Ok(store::id_for_client(conn, s)?)
}

/// Client name for display; dangling references show as unknown.
pub fn client_label(snapshot: &store::LedgerSnapshot, id: i64) -> String {
    snapshot
        .client_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| "(unknown source)".to_string())
}
