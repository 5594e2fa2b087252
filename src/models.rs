// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Largest magnitude accepted for a single amount or the opening balance
/// (one trillion). Keeps every running total far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(Error::Validation(format!(
                "Invalid type '{}', expected expense|income",
                other
            ))),
        }
    }
}

/// Fixed category set. Declaration order is the display order of breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Bills,
    Entertainment,
    Shopping,
    Salary,
    Investment,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Bills,
        Category::Entertainment,
        Category::Shopping,
        Category::Salary,
        Category::Investment,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Validation(format!("Unknown category '{}'", wanted)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
    pub description: String,
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }
}

/// Request to record a transaction; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
    pub description: String,
}

impl NewTransaction {
    pub fn expense(amount: Decimal, category: Category, description: &str) -> Self {
        Self {
            amount,
            r#type: TransactionType::Expense,
            category,
            description: description.to_string(),
        }
    }

    pub fn income(amount: Decimal, category: Category, description: &str) -> Self {
        Self {
            amount,
            r#type: TransactionType::Income,
            category,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

impl ThemeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeColor::Blue => "blue",
            ThemeColor::Green => "green",
            ThemeColor::Purple => "purple",
            ThemeColor::Orange => "orange",
        }
    }
}

impl FromStr for ThemeColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blue" => Ok(ThemeColor::Blue),
            "green" => Ok(ThemeColor::Green),
            "purple" => Ok(ThemeColor::Purple),
            "orange" => Ok(ThemeColor::Orange),
            other => Err(Error::Validation(format!(
                "Unknown theme color '{}', expected blue|green|purple|orange",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub currency: String,
    pub theme_color: ThemeColor,
    pub dark_mode: bool,
    pub passcode: Option<String>,
    pub initial_balance: Decimal,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            theme_color: ThemeColor::default(),
            dark_mode: false,
            passcode: None,
            initial_balance: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipIcon {
    Alert,
    Idea,
    Check,
}

impl TipIcon {
    pub fn marker(&self) -> &'static str {
        match self {
            TipIcon::Alert => "!",
            TipIcon::Idea => "*",
            TipIcon::Check => "+",
        }
    }
}

/// In-app action a tip can request. Tags the client does not know map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipAction {
    ReviewBills,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTip {
    pub title: String,
    pub description: String,
    pub icon: TipIcon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TipAction>,
}

impl AiTip {
    pub fn new(title: &str, description: &str, icon: TipIcon) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon,
            action: None,
        }
    }

    pub fn with_action(mut self, action: TipAction) -> Self {
        self.action = Some(action);
        self
    }
}
