// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use meicaixa::models::{Expense, ExpenseKind, Income, Investment, PaymentStatus};
use meicaixa::summary::{Scope, compute_summary, percent_of};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn money(v: i64) -> Decimal {
    Decimal::from(v)
}

fn income(amount: i64, client_id: i64, paid: NaiveDate) -> Income {
    Income {
        id: 0,
        description: String::new(),
        amount: money(amount),
        client_id,
        payment_date: paid,
        category: "Serviços".into(),
        created_at: paid.and_hms_opt(12, 0, 0).unwrap(),
    }
}

fn expense(
    amount: i64,
    kind: ExpenseKind,
    category: &str,
    status: PaymentStatus,
    source: Option<i64>,
) -> Expense {
    Expense {
        id: 0,
        description: String::new(),
        amount: money(amount),
        category: category.into(),
        due_date: d(2026, 5, 10),
        status,
        payment_source_id: source,
        kind,
        is_fixed: false,
        created_at: d(2026, 5, 1).and_hms_opt(12, 0, 0).unwrap(),
    }
}

fn investment(amount: i64) -> Investment {
    Investment {
        id: 0,
        description: String::new(),
        amount: money(amount),
        category: "Equipamentos".into(),
        date: d(2026, 5, 3),
        created_at: d(2026, 5, 3).and_hms_opt(12, 0, 0).unwrap(),
    }
}

struct Month {
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
    investments: Vec<Investment>,
}

fn may_2026() -> Month {
    use ExpenseKind::*;
    use PaymentStatus::*;
    Month {
        incomes: vec![
            income(3500, 1, d(2026, 5, 5)),
            income(1200, 2, d(2026, 5, 15)),
            // not received yet on the 20th
            income(800, 3, d(2026, 5, 28)),
        ],
        expenses: vec![
            expense(150, Business, "Infraestrutura", Paid, Some(1)),
            expense(67, Business, "Impostos", Unpaid, None),
            expense(2000, Business, "Saque", Paid, Some(1)),
            expense(300, Business, "Saque", Unpaid, None),
            expense(1200, Personal, "Moradia", Paid, Some(1)),
            expense(280, Personal, "Moradia", Unpaid, None),
            expense(500, Personal, "Poupança", Saved, Some(2)),
        ],
        investments: vec![investment(800)],
    }
}

fn today() -> NaiveDate {
    d(2026, 5, 20)
}

#[test]
fn total_summary_follows_the_withdrawal_model() {
    let m = may_2026();
    let s = compute_summary(None, &m.incomes, &m.expenses, &m.investments, today());

    assert_eq!(s.total_income, money(4700));
    assert_eq!(s.total_expenses, money(4497));
    assert_eq!(s.total_investments, money(800));
    assert_eq!(s.paid_expenses, money(3350));
    assert_eq!(s.unpaid_expenses, money(647));
    assert_eq!(s.saved_expenses, money(500));
    assert_eq!(s.total_withdrawals, money(2000));
    assert_eq!(s.personal_paid_expenses, money(1200));
    // 4700 - 150 - 2000 - 800
    assert_eq!(s.business_balance, money(1750));
    assert_eq!(s.personal_balance, money(800));
    // 4700 - 3350 - 800
    assert_eq!(s.available_balance, money(550));
    assert_eq!(s.expenses_by_source.get(&1), Some(&money(3350)));
    assert_eq!(s.expenses_by_source.get(&2), Some(&money(500)));
    assert_eq!(s.expenses_by_source.len(), 2);
}

#[test]
fn balance_identities_hold_in_every_scope() {
    let m = may_2026();
    for scope in [None, Some(Scope::Business), Some(Scope::Personal)] {
        let s = compute_summary(scope, &m.incomes, &m.expenses, &m.investments, today());
        let paid_operating: Decimal = m
            .expenses
            .iter()
            .filter(|e| {
                e.kind == ExpenseKind::Business
                    && e.status == PaymentStatus::Paid
                    && e.category != "Saque"
            })
            .map(|e| e.amount)
            .sum();
        assert_eq!(
            s.business_balance,
            s.total_income - paid_operating - s.total_withdrawals - s.total_investments
        );
        assert_eq!(
            s.personal_balance,
            s.total_withdrawals - s.personal_paid_expenses
        );
    }
}

#[test]
fn business_scope_only_counts_business_expenses() {
    let m = may_2026();
    let s = compute_summary(
        Some(Scope::Business),
        &m.incomes,
        &m.expenses,
        &m.investments,
        today(),
    );
    assert_eq!(s.total_income, money(4700));
    assert_eq!(s.total_expenses, money(2517));
    assert_eq!(s.paid_expenses, money(2150));
    assert_eq!(s.unpaid_expenses, money(367));
    assert_eq!(s.saved_expenses, Decimal::ZERO);
    assert_eq!(s.available_balance, money(1750));
    assert_eq!(s.expenses_by_source.get(&1), Some(&money(2150)));
    assert!(s.expenses_by_source.get(&2).is_none());
}

#[test]
fn personal_scope_has_no_income_or_investments() {
    let m = may_2026();
    let s = compute_summary(
        Some(Scope::Personal),
        &m.incomes,
        &m.expenses,
        &m.investments,
        today(),
    );
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_investments, Decimal::ZERO);
    assert_eq!(s.total_expenses, money(1980));
    assert_eq!(s.paid_expenses, money(1200));
    assert_eq!(s.available_balance, money(-1200));
    // withdrawals are still read from the whole month
    assert_eq!(s.total_withdrawals, money(2000));
    assert_eq!(s.personal_balance, money(800));
    // business balance uses the scope's zero income
    assert_eq!(s.business_balance, money(-2150));
}

#[test]
fn unpaid_withdrawal_is_not_a_withdrawal() {
    let expenses = vec![expense(
        900,
        ExpenseKind::Business,
        "Saque",
        PaymentStatus::Unpaid,
        None,
    )];
    let s = compute_summary(None, &[], &expenses, &[], today());
    assert_eq!(s.total_withdrawals, Decimal::ZERO);
    assert_eq!(s.business_balance, Decimal::ZERO);
}

#[test]
fn empty_month_is_all_zero() {
    let s = compute_summary(None, &[], &[], &[], today());
    assert_eq!(s, Default::default());
}

#[test]
fn dangling_source_is_tolerated() {
    let expenses = vec![expense(
        40,
        ExpenseKind::Business,
        "Infraestrutura",
        PaymentStatus::Paid,
        Some(999),
    )];
    let s = compute_summary(None, &[], &expenses, &[], today());
    assert_eq!(s.expenses_by_source.get(&999), Some(&money(40)));
}

#[test]
fn percent_of_zero_whole_is_zero() {
    assert_eq!(percent_of(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_of(money(5), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_of(money(25), money(200)), Decimal::new(125, 1));
}
