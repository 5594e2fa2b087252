// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures over a transaction snapshot.
//!
//! Everything here is a pure function of the transactions (plus the opening
//! balance or a reference day) and is recomputed in full after each mutation.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Category, Transaction, TransactionType};

pub const TREND_POINTS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Unclamped; negative when expenses exceed income.
    pub savings_rate: Decimal,
}

impl Summary {
    /// Savings rate as shown to the user: floored at 0, capped at 100, one decimal.
    pub fn display_savings_rate(&self) -> Decimal {
        self.savings_rate
            .max(Decimal::ZERO)
            .min(Decimal::ONE_HUNDRED)
            .round_dp(1)
    }
}

pub fn total_income(txs: &[Transaction]) -> Decimal {
    txs.iter().filter(|t| t.is_income()).map(|t| t.amount).sum()
}

pub fn total_expense(txs: &[Transaction]) -> Decimal {
    txs.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum()
}

/// Percent of income kept. A tiny income against large expenses can push the
/// ratio past `Decimal`'s range; that saturates at `Decimal::MIN`, since the
/// ratio can never exceed 100.
pub fn savings_rate(income: Decimal, expense: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    income
        .checked_sub(expense)
        .and_then(|kept| kept.checked_div(income))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MIN)
}

pub fn summarize(txs: &[Transaction], initial_balance: Decimal) -> Summary {
    let total_income = total_income(txs);
    let total_expense = total_expense(txs);
    Summary {
        total_income,
        total_expense,
        balance: initial_balance + total_income - total_expense,
        savings_rate: savings_rate(total_income, total_expense),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    /// Share of all expenses, in percent.
    pub share: Decimal,
}

/// Expense totals per category. Categories without expenses are left out.
pub fn category_breakdown(txs: &[Transaction]) -> Vec<CategoryTotal> {
    let mut agg: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txs.iter().filter(|t| t.is_expense()) {
        *agg.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
    }
    let grand: Decimal = agg.values().copied().sum();
    agg.into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            share: if grand > Decimal::ZERO {
                (total / grand * Decimal::ONE_HUNDRED).round_dp(1)
            } else {
                Decimal::ZERO
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayLabel {
    Today,
    Yesterday,
    Date(NaiveDate),
}

impl DayLabel {
    fn rank(&self) -> u8 {
        match self {
            DayLabel::Today => 0,
            DayLabel::Yesterday => 1,
            DayLabel::Date(_) => 2,
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Today => f.write_str("Today"),
            DayLabel::Yesterday => f.write_str("Yesterday"),
            DayLabel::Date(d) => write!(f, "{}", d.format("%b %-d, %Y")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub label: DayLabel,
    pub transactions: Vec<Transaction>,
}

pub fn day_label(date: NaiveDate, today: NaiveDate) -> DayLabel {
    if date == today {
        DayLabel::Today
    } else if Some(date) == today.checked_sub_signed(Duration::days(1)) {
        DayLabel::Yesterday
    } else {
        DayLabel::Date(date)
    }
}

/// Bucket transactions by calendar day: Today, Yesterday, then older days
/// newest first. Each bucket is ordered newest first.
pub fn group_by_day(txs: &[Transaction], today: NaiveDate) -> Vec<DayGroup> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for t in txs {
        buckets.entry(t.date.date()).or_default().push(t.clone());
    }
    let mut groups: Vec<DayGroup> = buckets
        .into_iter()
        .map(|(date, mut items)| {
            items.sort_by(|a, b| b.date.cmp(&a.date));
            DayGroup {
                label: day_label(date, today),
                transactions: items,
            }
        })
        .collect();
    groups.sort_by(|a, b| {
        a.label.rank().cmp(&b.label.rank()).then_with(|| {
            let da = a.transactions.first().map(|t| t.date.date());
            let db = b.transactions.first().map(|t| t.date.date());
            db.cmp(&da)
        })
    });
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub amount: Decimal,
}

/// Last [`TREND_POINTS`] transactions in chronological order; income counts as 0.
pub fn recent_trend(txs: &[Transaction]) -> Vec<TrendPoint> {
    let mut sorted: Vec<&Transaction> = txs.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    let skip = sorted.len().saturating_sub(TREND_POINTS);
    sorted
        .into_iter()
        .skip(skip)
        .map(|t| TrendPoint {
            label: t.date.format("%b %-d").to_string(),
            amount: if t.is_expense() { t.amount } else { Decimal::ZERO },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

/// List view filter: by type, then a case-insensitive search over description
/// and category name.
pub fn filter_transactions(
    txs: &[Transaction],
    kind: TypeFilter,
    search: Option<&str>,
) -> Vec<Transaction> {
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    txs.iter()
        .filter(|t| match kind {
            TypeFilter::All => true,
            TypeFilter::Only(k) => t.r#type == k,
        })
        .filter(|t| {
            needle.is_empty()
                || t.description.to_lowercase().contains(&needle)
                || t.category.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
