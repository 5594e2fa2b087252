// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Smart tips: generated by an external text model, with a static fallback.
//!
//! - `AdviceBackend`: one prompt in, raw model text out
//! - `GeminiBackend`: the HTTP implementation
//! - `AdviceProvider`: builds the prompt, parses the reply, and never fails
//! - `TipsBoard`: runs the provider off the input loop and keeps the latest result

mod board;
mod gemini;

pub use board::TipsBoard;
pub use gemini::GeminiBackend;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::config::AdviceConfig;
use crate::error::{Error, Result};
use crate::models::{AiTip, TipAction, TipIcon, Transaction};

pub const MAX_TIPS: usize = 3;
pub const RECENT_EXPENSES: usize = 10;

static FALLBACK_TIPS: Lazy<Vec<AiTip>> = Lazy::new(|| {
    vec![
        AiTip::new(
            "Track Small Expenses",
            "Small daily purchases like coffee add up. Try making coffee at home to save ~$100/month.",
            TipIcon::Idea,
        ),
        AiTip::new(
            "Review Recurring Bills",
            "You have multiple entertainment charges. Check if you are using all your streaming services.",
            TipIcon::Alert,
        )
        .with_action(TipAction::ReviewBills),
        AiTip::new(
            "Emergency Fund",
            "Great job on your savings this month! Consider moving 20% to a high-yield savings account.",
            TipIcon::Check,
        ),
    ]
});

pub fn fallback_tips() -> Vec<AiTip> {
    FALLBACK_TIPS.clone()
}

/// A text-generation service.
pub trait AdviceBackend: Send + Sync {
    /// Submit a prompt and return the model's raw text reply.
    fn generate(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;
}

#[derive(Clone, Default)]
pub struct AdviceProvider {
    backend: Option<Arc<dyn AdviceBackend>>,
}

impl AdviceProvider {
    /// Provider without a backend; always serves the fallback tips.
    pub fn offline() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Arc<dyn AdviceBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn from_config(config: Option<AdviceConfig>) -> Self {
        match config {
            Some(cfg) => match GeminiBackend::new(cfg) {
                Ok(b) => Self::with_backend(Arc::new(b)),
                Err(e) => {
                    tracing::warn!(error = %e, "could not build advice client, tips will use fallback");
                    Self::offline()
                }
            },
            None => Self::offline(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    /// Up to [`MAX_TIPS`] tips for the snapshot. Failures are logged and
    /// answered with the fallback set.
    pub fn get_financial_advice(&self, transactions: &[Transaction]) -> Vec<AiTip> {
        let Some(backend) = &self.backend else {
            tracing::warn!("no advice API key configured, returning fallback tips");
            return fallback_tips();
        };
        let prompt = build_prompt(transactions);
        match backend.generate(&prompt).and_then(|text| parse_tips(&text)) {
            Ok(tips) => tips,
            Err(e) => {
                tracing::warn!(model = backend.model(), error = %e, "advice request failed, returning fallback tips");
                fallback_tips()
            }
        }
    }
}

/// Summarize the most recent expenses and the expense total as a prompt.
pub fn build_prompt(transactions: &[Transaction]) -> String {
    let mut expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    let total: Decimal = expenses.iter().map(|t| t.amount).sum();
    let recent = expenses
        .iter()
        .take(RECENT_EXPENSES)
        .map(|t| format!("{}: {}", t.category, t.amount.round_dp(2)))
        .collect::<Vec<_>>()
        .join(", ");
    let recent = if recent.is_empty() {
        "none recorded".to_string()
    } else {
        recent
    };

    format!(
        r#"You are a financial advisor. Analyze these recent expenses: {recent}. Total spent: {total}.
Provide {MAX_TIPS} specific, actionable, and short tips to help the user save money.
One of the tips MUST be titled "Review Recurring Bills" and carry "action": "review_bills" if there are any recurring-looking payments.
Return the response as a JSON array of objects with the following shape:
[
  {{ "title": "Tip Title", "description": "Short description (max 20 words)", "icon": "idea" | "alert" | "check", "action": "review_bills" (optional) }}
]
Do not wrap in markdown code blocks. Just return raw JSON."#,
        total = total.round_dp(2),
    )
}

/// Parse the model reply. It must be a bare JSON array of tips; fenced or
/// wrapped output is rejected.
pub fn parse_tips(text: &str) -> Result<Vec<AiTip>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Advice("empty response text".into()));
    }
    let mut tips: Vec<AiTip> = serde_json::from_str(text).map_err(|e| {
        let shown: String = text.chars().take(200).collect();
        Error::Advice(format!("invalid tips JSON: {} | Raw: {}", e, shown))
    })?;
    if tips.is_empty() {
        return Err(Error::Advice("response contained no tips".into()));
    }
    tips.truncate(MAX_TIPS);
    Ok(tips)
}
