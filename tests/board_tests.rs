// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use smartexpense::advice::{fallback_tips, AdviceBackend, AdviceProvider, TipsBoard};
use smartexpense::error::Result;
use smartexpense::models::{AiTip, Category, NewTransaction, TipIcon, Transaction};
use smartexpense::store::TransactionStore;

/// Slow for an empty ledger, fast otherwise, so the older request finishes last.
struct RacingBackend;

impl AdviceBackend for RacingBackend {
    fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.contains("none recorded") {
            thread::sleep(Duration::from_millis(400));
            Ok(r#"[{"title": "Old", "description": "stale", "icon": "idea"}]"#.to_string())
        } else {
            Ok(r#"[{"title": "New", "description": "fresh", "icon": "check"}]"#.to_string())
        }
    }

    fn model(&self) -> &str {
        "racing"
    }
}

fn one_expense() -> Vec<Transaction> {
    let mut store = TransactionStore::new();
    store
        .add_at(
            NewTransaction::expense(Decimal::from(20), Category::Food, "Lunch"),
            NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
        .unwrap();
    store.transactions().to_vec()
}

#[test]
fn starts_empty_and_idle() {
    let board = TipsBoard::new(AdviceProvider::offline());
    assert!(board.tips().is_empty());
    assert!(!board.is_loading());
    assert_eq!(board.latest_token(), 0);
}

#[test]
fn request_sets_loading_until_result_lands() {
    let mut board = TipsBoard::new(AdviceProvider::offline());
    let token = board.request(Vec::new());
    assert_eq!(token, 1);
    assert!(board.is_loading());
    assert!(board.wait(Duration::from_secs(5)));
    assert!(!board.is_loading());
    assert_eq!(board.tips(), fallback_tips().as_slice());
}

#[test]
fn older_token_cannot_overwrite_newer() {
    let mut board = TipsBoard::new(AdviceProvider::offline());
    let first = board.request(Vec::new());
    let second = board.request(Vec::new());
    assert!(second > first);

    let newer = vec![AiTip::new("Newer", "from the second request", TipIcon::Check)];
    let older = vec![AiTip::new("Older", "from the first request", TipIcon::Idea)];
    assert!(board.accept(second, newer.clone()));
    assert!(!board.accept(first, older));
    assert_eq!(board.tips(), newer.as_slice());
    assert!(!board.is_loading());
}

#[test]
fn late_stale_response_is_discarded() {
    let mut board = TipsBoard::new(AdviceProvider::with_backend(Arc::new(RacingBackend)));
    board.request(Vec::new());
    board.request(one_expense());

    assert!(board.wait(Duration::from_secs(5)));
    assert_eq!(board.tips()[0].title, "New");

    // Give the slow first request time to finish, then drain it.
    thread::sleep(Duration::from_millis(700));
    assert!(!board.poll());
    assert_eq!(board.tips()[0].title, "New");
}

#[test]
fn new_result_replaces_old_set_wholesale() {
    let mut board = TipsBoard::new(AdviceProvider::with_backend(Arc::new(RacingBackend)));
    board.request(one_expense());
    assert!(board.wait(Duration::from_secs(5)));
    assert_eq!(board.tips().len(), 1);

    let token = board.request(one_expense());
    let replacement = fallback_tips();
    assert!(board.accept(token, replacement.clone()));
    assert_eq!(board.tips(), replacement.as_slice());
}
