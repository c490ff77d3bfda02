// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Simplified income statement (DRE) for one month.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, ExpenseKind, Income, Investment};
use crate::period::{self, Month};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dre {
    pub month: Month,
    pub revenue_by_category: BTreeMap<String, Decimal>,
    pub operating_by_category: BTreeMap<String, Decimal>,
    pub investments_by_category: BTreeMap<String, Decimal>,
    pub personal_by_category: BTreeMap<String, Decimal>,
    pub revenue: Decimal,
    pub operating_expenses: Decimal,
    pub gross_profit: Decimal,
    pub investments: Decimal,
    pub operating_result: Decimal,
    pub personal_expenses: Decimal,
    pub net_result: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Section,
    Item,
    Total,
    Result,
}

/// One line of the tabular statement. Deductions carry negative values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DreRow {
    pub kind: RowKind,
    pub label: String,
    pub value: Option<Decimal>,
}

impl DreRow {
    fn section(label: &str) -> Self {
        DreRow {
            kind: RowKind::Section,
            label: label.to_string(),
            value: None,
        }
    }

    fn item(label: &str, value: Decimal) -> Self {
        DreRow {
            kind: RowKind::Item,
            label: label.to_string(),
            value: Some(value),
        }
    }

    fn total(label: &str, value: Decimal) -> Self {
        DreRow {
            kind: RowKind::Total,
            label: label.to_string(),
            value: Some(value),
        }
    }

    fn result(label: &str, value: Decimal) -> Self {
        DreRow {
            kind: RowKind::Result,
            label: label.to_string(),
            value: Some(value),
        }
    }
}

fn group<'a, I>(entries: I) -> (BTreeMap<String, Decimal>, Decimal)
where
    I: Iterator<Item = (&'a str, Decimal)>,
{
    let mut map = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for (cat, amt) in entries {
        *map.entry(cat.to_string()).or_insert(Decimal::ZERO) += amt;
        total += amt;
    }
    (map, total)
}

/// Builds the statement from the full ledger collections for `month`.
/// Fixed expenses are projected into the month; revenue counts every income
/// dated in the month whether or not it has been received yet.
pub fn build_dre(
    incomes: &[Income],
    expenses: &[Expense],
    investments: &[Investment],
    month: Month,
) -> Dre {
    let incomes = period::filter_incomes_for_month(incomes, month);
    let expenses = period::filter_expenses_for_month(expenses, month);
    let investments = period::filter_investments_for_month(investments, month);

    let (revenue_by_category, revenue) =
        group(incomes.iter().map(|i| (i.category.as_str(), i.amount)));
    let (operating_by_category, operating_expenses) = group(
        expenses
            .iter()
            .filter(|e| e.kind == ExpenseKind::Business)
            .map(|e| (e.category.as_str(), e.amount)),
    );
    let (personal_by_category, personal_expenses) = group(
        expenses
            .iter()
            .filter(|e| e.kind == ExpenseKind::Personal)
            .map(|e| (e.category.as_str(), e.amount)),
    );
    let (investments_by_category, investments_total) =
        group(investments.iter().map(|i| (i.category.as_str(), i.amount)));

    let gross_profit = revenue - operating_expenses;
    let operating_result = gross_profit - investments_total;
    let net_result = operating_result - personal_expenses;

    Dre {
        month,
        revenue_by_category,
        operating_by_category,
        investments_by_category,
        personal_by_category,
        revenue,
        operating_expenses,
        gross_profit,
        investments: investments_total,
        operating_result,
        personal_expenses,
        net_result,
    }
}

impl Dre {
    pub fn rows(&self) -> Vec<DreRow> {
        let mut rows = Vec::new();

        rows.push(DreRow::section("Gross Operating Revenue"));
        for (cat, v) in &self.revenue_by_category {
            rows.push(DreRow::item(cat, *v));
        }
        rows.push(DreRow::total("Total Revenue", self.revenue));

        rows.push(DreRow::section("(-) Operating Expenses"));
        for (cat, v) in &self.operating_by_category {
            rows.push(DreRow::item(cat, -*v));
        }
        rows.push(DreRow::total(
            "Total Operating Expenses",
            -self.operating_expenses,
        ));
        rows.push(DreRow::result("Gross Profit", self.gross_profit));

        rows.push(DreRow::section("(-) Investments"));
        for (cat, v) in &self.investments_by_category {
            rows.push(DreRow::item(cat, -*v));
        }
        rows.push(DreRow::total("Total Investments", -self.investments));
        rows.push(DreRow::result("Operating Result", self.operating_result));

        rows.push(DreRow::section("(-) Personal Expenses"));
        for (cat, v) in &self.personal_by_category {
            rows.push(DreRow::item(cat, -*v));
        }
        rows.push(DreRow::total(
            "Total Personal Expenses",
            -self.personal_expenses,
        ));
        rows.push(DreRow::result("Net Result for the Period", self.net_result));

        rows
    }
}
