// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Map a tip to the in-app view it asks for.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{AiTip, Category, TipAction, Transaction};

// Title heuristic for tips that carry no explicit action tag.
static BILL_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)recurring|subscription|bill").expect("static keyword pattern")
});

pub const REVIEW_CATEGORIES: [Category; 2] = [Category::Bills, Category::Entertainment];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipReview {
    pub action: TipAction,
    pub transactions: Vec<Transaction>,
}

pub fn tip_action(tip: &AiTip) -> Option<TipAction> {
    match tip.action {
        Some(TipAction::ReviewBills) => Some(TipAction::ReviewBills),
        _ if BILL_KEYWORDS.is_match(&tip.title) => Some(TipAction::ReviewBills),
        _ => None,
    }
}

/// The filtered transaction view a tip opens, if it opens one.
pub fn resolve_tip(tip: &AiTip, transactions: &[Transaction]) -> Option<TipReview> {
    match tip_action(tip)? {
        TipAction::ReviewBills => Some(TipReview {
            action: TipAction::ReviewBills,
            transactions: transactions
                .iter()
                .filter(|t| REVIEW_CATEGORIES.contains(&t.category))
                .cloned()
                .collect(),
        }),
        TipAction::Unknown => None,
    }
}
