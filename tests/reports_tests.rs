// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use meicaixa::models::{Client, Expense, ExpenseKind, Income, PaymentStatus};
use meicaixa::period::Month;
use meicaixa::reports::{
    MAX_EVOLUTION_MONTHS, client_allocations, evolution, expense_categories, income_split,
    source_consolidation, year_comparison,
};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn client(id: i64, name: &str) -> Client {
    Client {
        id,
        name: name.into(),
        created_at: d(2026, 1, 1).and_hms_opt(9, 0, 0).unwrap(),
    }
}

fn income(client_id: i64, amount: i64, paid: NaiveDate) -> Income {
    Income {
        id: 0,
        description: String::new(),
        amount: Decimal::from(amount),
        client_id,
        payment_date: paid,
        category: "Serviços".into(),
        created_at: paid.and_hms_opt(9, 0, 0).unwrap(),
    }
}

fn expense(
    amount: i64,
    due: NaiveDate,
    status: PaymentStatus,
    source: Option<i64>,
    category: &str,
) -> Expense {
    Expense {
        id: 0,
        description: String::new(),
        amount: Decimal::from(amount),
        category: category.into(),
        due_date: due,
        status,
        payment_source_id: source,
        kind: ExpenseKind::Business,
        is_fixed: false,
        created_at: due.and_hms_opt(9, 0, 0).unwrap(),
    }
}

fn may_ledger() -> (Vec<Client>, Vec<Income>, Vec<Expense>) {
    let clients = vec![
        client(1, "Usina"),
        client(2, "Campo Grande"),
        client(3, "Parado"),
        client(4, "Nova"),
    ];
    let incomes = vec![
        income(1, 3500, d(2026, 5, 5)),
        income(1, 1200, d(2026, 5, 25)),
        income(2, 800, d(2026, 5, 10)),
    ];
    let expenses = vec![
        expense(150, d(2026, 5, 10), PaymentStatus::Paid, Some(1), "Infraestrutura"),
        expense(67, d(2026, 5, 20), PaymentStatus::Unpaid, Some(1), "Impostos"),
        expense(280, d(2026, 5, 8), PaymentStatus::Saved, Some(2), "Moradia"),
        expense(1200, d(2026, 5, 5), PaymentStatus::Paid, Some(2), "Moradia"),
        expense(100, d(2026, 5, 30), PaymentStatus::Unpaid, Some(4), "Impostos"),
        expense(50, d(2026, 5, 30), PaymentStatus::Unpaid, None, "Impostos"),
    ];
    (clients, incomes, expenses)
}

#[test]
fn allocations_per_client() {
    let (c, i, e) = may_ledger();
    let items = client_allocations(&c, &i, &e, d(2026, 5, 20));
    let names: Vec<&str> = items.iter().map(|a| a.client_name.as_str()).collect();
    // a client with neither revenue nor allocations is left out
    assert_eq!(names, vec!["Usina", "Campo Grande", "Nova"]);

    let usina = &items[0];
    assert_eq!(usina.total_expected, Decimal::from(4700));
    assert_eq!(usina.total_received, Decimal::from(3500));
    assert_eq!(usina.paid_expenses, Decimal::from(150));
    assert_eq!(usina.planned_expenses, Decimal::from(67));
    assert_eq!(usina.balance, Decimal::from(3283));
    assert!(!usina.over_budget);
    assert_eq!(usina.percent_allocated, Decimal::new(62, 1));

    let campo = &items[1];
    assert_eq!(campo.total_allocated, Decimal::from(1480));
    assert_eq!(campo.balance, Decimal::from(-680));
    assert!(campo.over_budget);
    assert_eq!(campo.percent_allocated, Decimal::from(185));
}

#[test]
fn allocation_with_nothing_received_reports_zero_percent() {
    let (c, i, e) = may_ledger();
    let items = client_allocations(&c, &i, &e, d(2026, 5, 20));
    let nova = items.iter().find(|a| a.client_id == 4).unwrap();
    assert_eq!(nova.total_received, Decimal::ZERO);
    assert_eq!(nova.percent_allocated, Decimal::ZERO);
    assert!(nova.over_budget);
}

#[test]
fn consolidation_lists_every_client() {
    let (c, i, e) = may_ledger();
    let items = source_consolidation(&c, &i, &e);
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].total_income, Decimal::from(4700));
    assert_eq!(items[0].available, Decimal::from(4483));
    assert_eq!(items[2].total_income, Decimal::ZERO);
    assert_eq!(items[2].available, Decimal::ZERO);
}

#[test]
fn split_received_and_pending() {
    let (_, i, _) = may_ledger();
    let split = income_split(&i, d(2026, 5, 20));
    assert_eq!(split.received, Decimal::from(4300));
    assert_eq!(split.pending, Decimal::from(1200));
    assert_eq!(split.total, Decimal::from(5500));
}

#[test]
fn categories_sorted_by_value() {
    let e = vec![
        expense(25, d(2026, 5, 1), PaymentStatus::Paid, None, "Impostos"),
        expense(50, d(2026, 5, 2), PaymentStatus::Paid, None, "Moradia"),
        expense(25, d(2026, 5, 3), PaymentStatus::Unpaid, None, "Moradia"),
    ];
    let items = expense_categories(&e);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].category, "Moradia");
    assert_eq!(items[0].value, Decimal::from(75));
    assert_eq!(items[0].percentage, Decimal::from(75));
    assert_eq!(items[1].percentage, Decimal::from(25));
    assert!(expense_categories(&[]).is_empty());
}

#[test]
fn evolution_projects_fixed_expenses_oldest_first() {
    let mut fixed = expense(100, d(2026, 1, 31), PaymentStatus::Paid, None, "Infraestrutura");
    fixed.is_fixed = true;
    let incomes = vec![income(1, 500, d(2026, 3, 2))];
    let flows = evolution(&incomes, &[fixed], Month::new(2026, 3).unwrap(), 3);

    let months: Vec<String> = flows.iter().map(|f| f.month.to_string()).collect();
    assert_eq!(months, vec!["2026-01", "2026-02", "2026-03"]);
    assert_eq!(flows[0].balance, Decimal::from(-100));
    assert_eq!(flows[1].expenses, Decimal::from(100));
    assert_eq!(flows[2].income, Decimal::from(500));
    assert_eq!(flows[2].balance, Decimal::from(400));

    assert!(evolution(&incomes, &[], Month::new(2026, 3).unwrap(), 0).is_empty());
}

#[test]
fn evolution_window_crosses_year_boundary() {
    let incomes = vec![income(1, 10, d(2025, 12, 15))];
    let flows = evolution(&incomes, &[], Month::new(2026, 2).unwrap(), 4);
    assert_eq!(flows[0].month, Month::new(2025, 11).unwrap());
    assert_eq!(flows[1].income, Decimal::from(10));
}

#[test]
fn year_comparison_pairs_months() {
    let incomes = vec![
        income(1, 300, d(2025, 3, 10)),
        income(1, 450, d(2026, 3, 12)),
    ];
    let expenses = vec![expense(90, d(2026, 7, 1), PaymentStatus::Paid, None, "Impostos")];
    let rows = year_comparison(&incomes, &expenses, 2026);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[2].month, 3);
    assert_eq!(rows[2].income_previous, Decimal::from(300));
    assert_eq!(rows[2].income_current, Decimal::from(450));
    assert_eq!(rows[6].expenses_current, Decimal::from(90));
    assert_eq!(rows[6].expenses_previous, Decimal::ZERO);
}

#[test]
fn evolution_window_is_bounded() {
    let end = Month::new(2026, 1).unwrap();
    assert!(evolution(&[], &[], end, 0).is_empty());

    let flows = evolution(&[], &[], end, usize::MAX);
    assert_eq!(flows.len(), MAX_EVOLUTION_MONTHS);
    assert_eq!(flows.last().unwrap().month, end);
    assert_eq!(flows[0].month, Month::new(2006, 2).unwrap());
}

#[test]
fn year_comparison_at_calendar_edges_does_not_overflow() {
    let incomes = vec![income(1, 40, d(2026, 1, 3))];
    assert!(year_comparison(&incomes, &[], i32::MIN).is_empty());
    assert!(year_comparison(&incomes, &[], i32::MAX).is_empty());
    let rows = year_comparison(&incomes, &[], 2027);
    assert_eq!(rows[0].income_previous, Decimal::from(40));
    assert_eq!(rows[0].income_current, Decimal::ZERO);
}
