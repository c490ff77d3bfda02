// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use meicaixa::error::LedgerError;
use meicaixa::models::{
    ExpenseKind, ExpenseUpdate, IncomeUpdate, NewExpense, NewIncome, NewInvestment, PaymentStatus,
};
use meicaixa::store::{self, LedgerSnapshot};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    meicaixa::db::init_schema(&conn).unwrap();
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn new_expense(amount: &str) -> NewExpense {
    NewExpense {
        description: "Internet empresa".into(),
        amount: amount.parse().unwrap(),
        category: "Infraestrutura".into(),
        due_date: d(2026, 1, 10),
        status: PaymentStatus::Unpaid,
        payment_source_id: None,
        kind: ExpenseKind::Business,
        is_fixed: true,
    }
}

#[test]
fn amounts_round_trip_without_float_drift() {
    let conn = setup();
    let client = store::insert_client(&conn, "Usina").unwrap();
    for _ in 0..10 {
        store::insert_income(
            &conn,
            &NewIncome {
                description: "parcela".into(),
                amount: "0.10".parse().unwrap(),
                client_id: client.id,
                payment_date: d(2026, 1, 5),
                category: "Serviços".into(),
            },
        )
        .unwrap();
    }
    let total: Decimal = store::list_incomes(&conn)
        .unwrap()
        .iter()
        .map(|i| i.amount)
        .sum();
    assert_eq!(total, Decimal::ONE);
}

#[test]
fn expense_update_and_status_change() {
    let conn = setup();
    let client = store::insert_client(&conn, "Campo Grande").unwrap();
    let e = store::insert_expense(&conn, &new_expense("150.00")).unwrap();
    assert!(e.is_fixed);
    assert_eq!(e.status, PaymentStatus::Unpaid);

    let paid = store::set_expense_status(&conn, e.id, PaymentStatus::Paid, Some(client.id)).unwrap();
    assert_eq!(paid.payment_source_id, Some(client.id));

    let edited = store::update_expense(
        &conn,
        e.id,
        &ExpenseUpdate {
            amount: Some("175.50".parse().unwrap()),
            is_fixed: Some(false),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(edited.amount, Decimal::new(17550, 2));
    assert_eq!(edited.status, PaymentStatus::Paid);

    let reloaded = store::get_expense(&conn, e.id).unwrap();
    assert_eq!(reloaded, edited);

    let unpaid = store::set_expense_status(&conn, e.id, PaymentStatus::Unpaid, None).unwrap();
    assert_eq!(unpaid.payment_source_id, None);
}

#[test]
fn negative_amounts_are_rejected() {
    let conn = setup();
    let err = store::insert_expense(&conn, &new_expense("-1")).unwrap_err();
    assert!(matches!(err, LedgerError::NegativeAmount(_)));
}

#[test]
fn missing_records_report_not_found() {
    let conn = setup();
    let err = store::update_income(&conn, 42, &IncomeUpdate::default()).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { entity: "income", id: 42 }));
    assert!(store::delete_investment(&conn, 7).is_err());
}

#[test]
fn deleting_a_client_leaves_references_dangling() {
    let conn = setup();
    let client = store::insert_client(&conn, "Mercado").unwrap();
    store::insert_income(
        &conn,
        &NewIncome {
            description: "Consultoria".into(),
            amount: Decimal::from(800),
            client_id: client.id,
            payment_date: d(2026, 2, 1),
            category: "Consultoria".into(),
        },
    )
    .unwrap();
    store::delete_client(&conn, client.id).unwrap();

    let snap = LedgerSnapshot::load(&conn).unwrap();
    assert!(snap.clients.is_empty());
    assert_eq!(snap.incomes.len(), 1);
    assert_eq!(snap.incomes[0].client_id, client.id);
    assert_eq!(snap.client_name(client.id), None);
}

#[test]
fn snapshot_loads_every_collection() {
    let conn = setup();
    store::insert_client(&conn, "Usina").unwrap();
    store::insert_expense(&conn, &new_expense("67")).unwrap();
    store::insert_investment(
        &conn,
        &NewInvestment {
            description: "Novo equipamento".into(),
            amount: Decimal::from(800),
            category: "Equipamentos".into(),
            date: d(2026, 1, 20),
        },
    )
    .unwrap();
    let snap = LedgerSnapshot::load(&conn).unwrap();
    assert_eq!(snap.clients.len(), 1);
    assert_eq!(snap.expenses.len(), 1);
    assert_eq!(snap.expenses[0].kind, ExpenseKind::Business);
    assert_eq!(snap.investments[0].date, d(2026, 1, 20));
}
