// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use smartexpense::advice::{
    build_prompt, fallback_tips, parse_tips, AdviceBackend, AdviceProvider, GeminiBackend,
};
use smartexpense::config::AdviceConfig;
use smartexpense::error::{Error, Result};
use smartexpense::models::{Category, NewTransaction, TipAction, TipIcon, Transaction};
use smartexpense::store::TransactionStore;

/// Backend that answers with canned text (or an error) and records prompts.
struct ScriptedBackend {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

impl AdviceBackend for ScriptedBackend {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(t) => Ok(t.clone()),
            Err(m) => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                m.clone(),
            ))),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn ledger() -> Vec<Transaction> {
    let mut store = TransactionStore::new();
    store
        .add_at(
            NewTransaction::income(Decimal::from(5000), Category::Salary, "Monthly Salary"),
            base_time(),
        )
        .unwrap();
    store
        .add_at(
            NewTransaction::expense(Decimal::from(1200), Category::Bills, "Rent Payment"),
            base_time() + Duration::days(4),
        )
        .unwrap();
    store
        .add_at(
            NewTransaction::expense(Decimal::from(150), Category::Food, "Grocery Shopping"),
            base_time() + Duration::days(10),
        )
        .unwrap();
    store.transactions().to_vec()
}

const GOOD_REPLY: &str = r#"[
  {"title": "Cook at Home", "description": "Groceries beat takeout.", "icon": "idea"},
  {"title": "Review Recurring Bills", "description": "Rent is your biggest cost.", "icon": "alert", "action": "review_bills"},
  {"title": "Nice Work", "description": "You saved most of your salary.", "icon": "check"}
]"#;

#[test]
fn no_credential_serves_fallback_without_backend() {
    let provider = AdviceProvider::from_config(None);
    assert!(!provider.is_live());
    let tips = provider.get_financial_advice(&ledger());
    assert_eq!(tips.len(), 3);
    assert_eq!(tips, fallback_tips());
    assert_eq!(tips[1].title, "Review Recurring Bills");
    assert_eq!(tips[1].icon, TipIcon::Alert);
}

#[test]
fn backend_failure_serves_fallback() {
    let backend = ScriptedBackend::failing("connection refused");
    let provider = AdviceProvider::with_backend(backend.clone());
    let tips = provider.get_financial_advice(&ledger());
    assert_eq!(tips, fallback_tips());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unreachable_service_serves_fallback() {
    let mut cfg = AdviceConfig::new("test-key");
    cfg.api_base = "http://127.0.0.1:1".to_string();
    cfg.timeout = std::time::Duration::from_secs(2);
    let backend = GeminiBackend::new(cfg).unwrap();
    let provider = AdviceProvider::with_backend(Arc::new(backend));
    assert_eq!(provider.get_financial_advice(&ledger()), fallback_tips());
}

#[test]
fn valid_reply_is_parsed() {
    let backend = ScriptedBackend::ok(GOOD_REPLY);
    let provider = AdviceProvider::with_backend(backend.clone());
    let tips = provider.get_financial_advice(&ledger());
    assert_eq!(tips.len(), 3);
    assert_eq!(tips[0].title, "Cook at Home");
    assert_eq!(tips[0].action, None);
    assert_eq!(tips[1].action, Some(TipAction::ReviewBills));
    assert_eq!(tips[2].icon, TipIcon::Check);
}

#[test]
fn fenced_or_malformed_reply_serves_fallback() {
    for reply in [
        format!("```json\n{}\n```", GOOD_REPLY),
        "Here are some tips: eat less".to_string(),
        "{\"title\": \"one\"}".to_string(),
        "[]".to_string(),
        "   ".to_string(),
        r#"[{"title": "x", "description": "y", "icon": "sparkle"}]"#.to_string(),
    ] {
        let provider = AdviceProvider::with_backend(ScriptedBackend::ok(&reply));
        assert_eq!(provider.get_financial_advice(&ledger()), fallback_tips(), "reply: {}", reply);
    }
}

#[test]
fn long_reply_is_cut_to_three() {
    let reply = r#"[
      {"title": "a", "description": "1", "icon": "idea"},
      {"title": "b", "description": "2", "icon": "idea"},
      {"title": "c", "description": "3", "icon": "idea"},
      {"title": "d", "description": "4", "icon": "idea"}
    ]"#;
    let tips = parse_tips(reply).unwrap();
    assert_eq!(tips.len(), 3);
    assert_eq!(tips[2].title, "c");
}

#[test]
fn unknown_action_tag_is_tolerated() {
    let reply = r#"[{"title": "Invest", "description": "Index funds.", "icon": "idea", "action": "open_broker"}]"#;
    let tips = parse_tips(reply).unwrap();
    assert_eq!(tips[0].action, Some(TipAction::Unknown));
}

#[test]
fn prompt_lists_recent_expenses_and_total() {
    let mut store = TransactionStore::new();
    for i in 0..12i64 {
        store
            .add_at(
                NewTransaction::expense(Decimal::from(i + 1), Category::Food, "Coffee"),
                base_time() + Duration::hours(i),
            )
            .unwrap();
    }
    store
        .add_at(
            NewTransaction::income(Decimal::from(900), Category::Salary, "Pay"),
            base_time(),
        )
        .unwrap();
    let prompt = build_prompt(store.transactions());
    // Newest ten expenses are 12 down to 3; 1 and 2 are left out.
    assert!(prompt.contains("Food: 12, Food: 11"));
    assert!(prompt.contains("Food: 3."));
    assert!(!prompt.contains("Food: 2"));
    assert!(!prompt.contains("Salary"));
    // 1 + 2 + ... + 12
    assert!(prompt.contains("Total spent: 78."));
    assert!(prompt.contains("Review Recurring Bills"));
}

#[test]
fn prompt_reaches_backend() {
    let backend = ScriptedBackend::ok(GOOD_REPLY);
    let provider = AdviceProvider::with_backend(backend.clone());
    provider.get_financial_advice(&ledger());
    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Food: 150, Bills: 1200"));
    assert!(prompts[0].contains("Total spent: 1350."));
}

#[test]
fn config_reads_key_with_fallback_names() {
    let env = |pairs: &'static [(&'static str, &'static str)]| {
        move |k: &str| {
            pairs
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.to_string())
        }
    };

    assert!(AdviceConfig::from_lookup(env(&[])).is_none());
    assert!(AdviceConfig::from_lookup(env(&[("SMARTEXPENSE_API_KEY", "  ")])).is_none());

    let cfg = AdviceConfig::from_lookup(env(&[("API_KEY", "k1")])).unwrap();
    assert_eq!(cfg.api_key, "k1");
    assert_eq!(cfg.model, "gemini-2.5-flash");

    let cfg = AdviceConfig::from_lookup(env(&[
        ("API_KEY", "generic"),
        ("SMARTEXPENSE_API_KEY", "specific"),
        ("SMARTEXPENSE_MODEL", "gemini-pro"),
        ("SMARTEXPENSE_API_BASE", "http://localhost:8080/"),
        ("SMARTEXPENSE_TIMEOUT_SECS", "3"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_key, "specific");
    assert_eq!(cfg.model, "gemini-pro");
    assert_eq!(cfg.api_base, "http://localhost:8080");
    assert_eq!(cfg.timeout, std::time::Duration::from_secs(3));
}
