// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed ledger store: create, update, delete and list for clients,
//! incomes, expenses and investments.
//!
//! Amounts are kept as decimal text so no precision is lost on the way
//! through SQLite.

use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Client, Expense, ExpenseKind, ExpenseUpdate, Income, IncomeUpdate, Investment,
    NewExpense, NewIncome, NewInvestment, PaymentStatus,
};

fn text_col<T, F>(r: &Row<'_>, idx: usize, parse: F) -> rusqlite::Result<T>
where
    F: FnOnce(&str) -> Result<T, Box<dyn std::error::Error + Send + Sync>>,
{
    let s: String = r.get(idx)?;
    parse(&s).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e))
}

fn decimal_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    text_col(r, idx, |s| s.parse::<Decimal>().map_err(Into::into))
}

fn non_negative(amount: Decimal) -> LedgerResult<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::NegativeAmount(amount));
    }
    Ok(amount)
}

fn ensure_changed(changed: usize, entity: &'static str, id: i64) -> LedgerResult<()> {
    if changed == 0 {
        Err(LedgerError::NotFound { entity, id })
    } else {
        Ok(())
    }
}

// ---- clients ----

fn client_from_row(r: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: r.get(0)?,
        name: r.get(1)?,
        created_at: r.get(2)?,
    })
}

pub fn insert_client(conn: &Connection, name: &str) -> LedgerResult<Client> {
    conn.execute("INSERT INTO clients(name) VALUES (?1)", params![name.trim()])?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, name, "client created");
    get_client(conn, id)
}

pub fn get_client(conn: &Connection, id: i64) -> LedgerResult<Client> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM clients WHERE id=?1")?;
    let mut rows = stmt.query_map(params![id], client_from_row)?;
    match rows.next() {
        Some(c) => Ok(c?),
        None => Err(LedgerError::NotFound { entity: "client", id }),
    }
}

pub fn list_clients(conn: &Connection) -> LedgerResult<Vec<Client>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM clients ORDER BY created_at DESC, id DESC")?;
    let rows = stmt.query_map([], client_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Removes the client only; incomes and expenses keep their reference.
pub fn delete_client(conn: &Connection, id: i64) -> LedgerResult<()> {
    let n = conn.execute("DELETE FROM clients WHERE id=?1", params![id])?;
    ensure_changed(n, "client", id)?;
    tracing::debug!(id, "client removed");
    Ok(())
}

pub fn id_for_client(conn: &Connection, name: &str) -> LedgerResult<i64> {
    let mut stmt = conn.prepare("SELECT id FROM clients WHERE name=?1 ORDER BY id LIMIT 1")?;
    let mut rows = stmt.query_map(params![name.trim()], |r| r.get::<_, i64>(0))?;
    match rows.next() {
        Some(id) => Ok(id?),
        None => Err(LedgerError::InvalidValue {
            field: "client",
            value: name.to_string(),
        }),
    }
}

// ---- incomes ----

const INCOME_COLS: &str = "id, description, amount, client_id, payment_date, category, created_at";

fn income_from_row(r: &Row<'_>) -> rusqlite::Result<Income> {
    Ok(Income {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: decimal_col(r, 2)?,
        client_id: r.get(3)?,
        payment_date: r.get(4)?,
        category: r.get(5)?,
        created_at: r.get(6)?,
    })
}

pub fn insert_income(conn: &Connection, income: &NewIncome) -> LedgerResult<Income> {
    let amount = non_negative(income.amount)?;
    conn.execute(
        "INSERT INTO incomes(description, amount, client_id, payment_date, category)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            income.description,
            amount.to_string(),
            income.client_id,
            income.payment_date,
            income.category
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, amount = %amount, "income created");
    get_income(conn, id)
}

pub fn get_income(conn: &Connection, id: i64) -> LedgerResult<Income> {
    let sql = format!("SELECT {INCOME_COLS} FROM incomes WHERE id=?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], income_from_row)?;
    match rows.next() {
        Some(i) => Ok(i?),
        None => Err(LedgerError::NotFound { entity: "income", id }),
    }
}

pub fn update_income(conn: &Connection, id: i64, upd: &IncomeUpdate) -> LedgerResult<Income> {
    let mut cur = get_income(conn, id)?;
    if let Some(d) = &upd.description {
        cur.description = d.clone();
    }
    if let Some(a) = upd.amount {
        cur.amount = non_negative(a)?;
    }
    if let Some(c) = upd.client_id {
        cur.client_id = c;
    }
    if let Some(d) = upd.payment_date {
        cur.payment_date = d;
    }
    if let Some(c) = &upd.category {
        cur.category = c.clone();
    }
    conn.execute(
        "UPDATE incomes SET description=?1, amount=?2, client_id=?3, payment_date=?4, category=?5
         WHERE id=?6",
        params![
            cur.description,
            cur.amount.to_string(),
            cur.client_id,
            cur.payment_date,
            cur.category,
            id
        ],
    )?;
    tracing::debug!(id, "income updated");
    Ok(cur)
}

pub fn delete_income(conn: &Connection, id: i64) -> LedgerResult<()> {
    let n = conn.execute("DELETE FROM incomes WHERE id=?1", params![id])?;
    ensure_changed(n, "income", id)
}

pub fn list_incomes(conn: &Connection) -> LedgerResult<Vec<Income>> {
    let sql = format!("SELECT {INCOME_COLS} FROM incomes ORDER BY payment_date DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], income_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

// ---- expenses ----

const EXPENSE_COLS: &str = "id, description, amount, category, due_date, status, payment_source_id, type, is_fixed, created_at";

fn expense_from_row(r: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: decimal_col(r, 2)?,
        category: r.get(3)?,
        due_date: r.get(4)?,
        status: text_col(r, 5, |s| s.parse::<PaymentStatus>().map_err(Into::into))?,
        payment_source_id: r.get(6)?,
        kind: text_col(r, 7, |s| s.parse::<ExpenseKind>().map_err(Into::into))?,
        is_fixed: r.get(8)?,
        created_at: r.get(9)?,
    })
}

pub fn insert_expense(conn: &Connection, expense: &NewExpense) -> LedgerResult<Expense> {
    let amount = non_negative(expense.amount)?;
    conn.execute(
        "INSERT INTO expenses(description, amount, category, due_date, status, payment_source_id, type, is_fixed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            expense.description,
            amount.to_string(),
            expense.category,
            expense.due_date,
            expense.status.as_str(),
            expense.payment_source_id,
            expense.kind.as_str(),
            expense.is_fixed
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, amount = %amount, kind = %expense.kind, "expense created");
    get_expense(conn, id)
}

pub fn get_expense(conn: &Connection, id: i64) -> LedgerResult<Expense> {
    let sql = format!("SELECT {EXPENSE_COLS} FROM expenses WHERE id=?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], expense_from_row)?;
    match rows.next() {
        Some(e) => Ok(e?),
        None => Err(LedgerError::NotFound { entity: "expense", id }),
    }
}

pub fn update_expense(conn: &Connection, id: i64, upd: &ExpenseUpdate) -> LedgerResult<Expense> {
    let mut cur = get_expense(conn, id)?;
    if let Some(d) = &upd.description {
        cur.description = d.clone();
    }
    if let Some(a) = upd.amount {
        cur.amount = non_negative(a)?;
    }
    if let Some(c) = &upd.category {
        cur.category = c.clone();
    }
    if let Some(d) = upd.due_date {
        cur.due_date = d;
    }
    if let Some(s) = upd.status {
        cur.status = s;
    }
    if let Some(src) = upd.payment_source_id {
        cur.payment_source_id = src;
    }
    if let Some(k) = upd.kind {
        cur.kind = k;
    }
    if let Some(f) = upd.is_fixed {
        cur.is_fixed = f;
    }
    conn.execute(
        "UPDATE expenses SET description=?1, amount=?2, category=?3, due_date=?4, status=?5,
         payment_source_id=?6, type=?7, is_fixed=?8 WHERE id=?9",
        params![
            cur.description,
            cur.amount.to_string(),
            cur.category,
            cur.due_date,
            cur.status.as_str(),
            cur.payment_source_id,
            cur.kind.as_str(),
            cur.is_fixed,
            id
        ],
    )?;
    tracing::debug!(id, "expense updated");
    Ok(cur)
}

/// Sets status and funding source together, the way a payment is recorded.
pub fn set_expense_status(
    conn: &Connection,
    id: i64,
    status: PaymentStatus,
    payment_source_id: Option<i64>,
) -> LedgerResult<Expense> {
    update_expense(
        conn,
        id,
        &ExpenseUpdate {
            status: Some(status),
            payment_source_id: Some(payment_source_id),
            ..Default::default()
        },
    )
}

pub fn delete_expense(conn: &Connection, id: i64) -> LedgerResult<()> {
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    ensure_changed(n, "expense", id)
}

pub fn list_expenses(conn: &Connection) -> LedgerResult<Vec<Expense>> {
    let sql = format!("SELECT {EXPENSE_COLS} FROM expenses ORDER BY due_date DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], expense_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

// ---- investments ----

fn investment_from_row(r: &Row<'_>) -> rusqlite::Result<Investment> {
    Ok(Investment {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: decimal_col(r, 2)?,
        category: r.get(3)?,
        date: r.get(4)?,
        created_at: r.get(5)?,
    })
}

pub fn insert_investment(conn: &Connection, inv: &NewInvestment) -> LedgerResult<Investment> {
    let amount = non_negative(inv.amount)?;
    conn.execute(
        "INSERT INTO investments(description, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
        params![inv.description, amount.to_string(), inv.category, inv.date],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, amount = %amount, "investment created");
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, category, date, created_at FROM investments WHERE id=?1",
    )?;
    Ok(stmt.query_row(params![id], investment_from_row)?)
}

pub fn delete_investment(conn: &Connection, id: i64) -> LedgerResult<()> {
    let n = conn.execute("DELETE FROM investments WHERE id=?1", params![id])?;
    ensure_changed(n, "investment", id)
}

pub fn list_investments(conn: &Connection) -> LedgerResult<Vec<Investment>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, category, date, created_at FROM investments
         ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map([], investment_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Everything the engine reads, loaded in one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerSnapshot {
    pub clients: Vec<Client>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub investments: Vec<Investment>,
}

impl LedgerSnapshot {
    pub fn load(conn: &Connection) -> LedgerResult<Self> {
        Ok(LedgerSnapshot {
            clients: list_clients(conn)?,
            incomes: list_incomes(conn)?,
            expenses: list_expenses(conn)?,
            investments: list_investments(conn)?,
        })
    }

    pub fn client_name(&self, id: i64) -> Option<&str> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}
