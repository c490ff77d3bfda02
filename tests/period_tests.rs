// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use meicaixa::models::{Expense, ExpenseKind, Income, Investment, PaymentStatus};
use meicaixa::period::{
    Month, MonthSnapshot, filter_expenses_for_month, filter_incomes_for_month,
    filter_investments_for_month,
};
use meicaixa::store::LedgerSnapshot;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn month(s: &str) -> Month {
    s.parse().unwrap()
}

fn expense(id: i64, due: NaiveDate, fixed: bool) -> Expense {
    Expense {
        id,
        description: format!("expense {id}"),
        amount: Decimal::from(150),
        category: "Infraestrutura".into(),
        due_date: due,
        status: PaymentStatus::Unpaid,
        payment_source_id: None,
        kind: ExpenseKind::Business,
        is_fixed: fixed,
        created_at: d(2026, 1, 1).and_hms_opt(12, 0, 0).unwrap(),
    }
}

fn income(id: i64, paid: NaiveDate) -> Income {
    Income {
        id,
        description: "Serviço mensal".into(),
        amount: Decimal::from(3500),
        client_id: 1,
        payment_date: paid,
        category: "Serviços".into(),
        created_at: d(2026, 1, 1).and_hms_opt(12, 0, 0).unwrap(),
    }
}

#[test]
fn expense_inside_month_is_kept_unchanged() {
    let e = expense(1, d(2026, 2, 14), false);
    let out = filter_expenses_for_month(&[e.clone()], month("2026-02"));
    assert_eq!(out, vec![e]);
}

#[test]
fn non_fixed_expense_outside_month_is_dropped() {
    let out = filter_expenses_for_month(&[expense(1, d(2026, 1, 14), false)], month("2026-02"));
    assert!(out.is_empty());
}

#[test]
fn fixed_expense_projects_forward_keeping_day() {
    let stored = vec![expense(1, d(2026, 1, 10), true)];
    let out = filter_expenses_for_month(&stored, month("2026-06"));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].due_date, d(2026, 6, 10));
    assert_eq!(out[0].amount, Decimal::from(150));
    // the stored record is untouched
    assert_eq!(stored[0].due_date, d(2026, 1, 10));
}

#[test]
fn fixed_expense_projects_across_years() {
    let out = filter_expenses_for_month(&[expense(1, d(2025, 11, 5), true)], month("2026-02"));
    assert_eq!(out[0].due_date, d(2026, 2, 5));
}

#[test]
fn fixed_expense_never_projects_backward() {
    let out = filter_expenses_for_month(&[expense(1, d(2026, 3, 10), true)], month("2026-01"));
    assert!(out.is_empty());
    let out = filter_expenses_for_month(&[expense(1, d(2027, 1, 10), true)], month("2026-12"));
    assert!(out.is_empty());
}

#[test]
fn projection_is_stable_across_repeated_filtering() {
    let stored = vec![
        expense(1, d(2026, 1, 31), true),
        expense(2, d(2026, 1, 15), true),
        expense(3, d(2026, 4, 2), false),
    ];
    let first = filter_expenses_for_month(&stored, month("2026-04"));
    let second = filter_expenses_for_month(&stored, month("2026-04"));
    assert_eq!(first, second);
    let dates: Vec<_> = first.iter().map(|e| e.due_date).collect();
    assert_eq!(dates, vec![d(2026, 4, 30), d(2026, 4, 15), d(2026, 4, 2)]);
}

#[test]
fn incomes_and_investments_use_plain_month_membership() {
    let incomes = vec![income(1, d(2026, 1, 5)), income(2, d(2026, 3, 31))];
    let march = filter_incomes_for_month(&incomes, month("2026-03"));
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].id, 2);

    let investments = vec![Investment {
        id: 1,
        description: "Novo equipamento".into(),
        amount: Decimal::from(800),
        category: "Equipamentos".into(),
        date: d(2026, 3, 1),
        created_at: d(2026, 3, 1).and_hms_opt(9, 0, 0).unwrap(),
    }];
    assert_eq!(filter_investments_for_month(&investments, month("2026-03")).len(), 1);
    assert!(filter_investments_for_month(&investments, month("2026-04")).is_empty());
}

#[test]
fn scenario_fixed_bill_and_january_income_viewed_in_march() {
    let ledger = LedgerSnapshot {
        clients: vec![],
        incomes: vec![income(1, d(2026, 1, 5))],
        expenses: vec![expense(1, d(2026, 1, 1), true)],
        investments: vec![],
    };
    let view = MonthSnapshot::for_month(&ledger, month("2026-03"));
    assert!(view.incomes.is_empty());
    assert_eq!(view.expenses.len(), 1);
    assert_eq!(view.expenses[0].due_date, d(2026, 3, 1));
    assert_eq!(view.expenses[0].amount, Decimal::from(150));

    let s = meicaixa::summary::compute_summary(
        None,
        &view.incomes,
        &view.expenses,
        &view.investments,
        d(2026, 3, 20),
    );
    assert_eq!(s.business_balance, Decimal::ZERO);
    assert_eq!(s.unpaid_expenses, Decimal::from(150));
}
