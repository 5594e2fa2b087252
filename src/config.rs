// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings defaults, the currency table, and advice-service configuration.
//!
//! Settings are read once at startup and never written back.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::AppSettings;
use crate::utils::check_magnitude;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "SmartExpense", "smartexpense"));

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", name: "Euro" },
    Currency { code: "GBP", symbol: "£", name: "British Pound" },
    Currency { code: "PKR", symbol: "Rs", name: "Pakistani Rupee" },
    Currency { code: "INR", symbol: "₹", name: "Indian Rupee" },
    Currency { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    Currency { code: "AED", symbol: "AED", name: "UAE Dirham" },
    Currency { code: "SAR", symbol: "SAR", name: "Saudi Riyal" },
    Currency { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    Currency { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    Currency { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    Currency { code: "RUB", symbol: "₽", name: "Russian Ruble" },
    Currency { code: "KRW", symbol: "₩", name: "South Korean Won" },
    Currency { code: "TRY", symbol: "₺", name: "Turkish Lira" },
    Currency { code: "BRL", symbol: "R$", name: "Brazilian Real" },
    Currency { code: "NGN", symbol: "₦", name: "Nigerian Naira" },
];

/// Resolve user input to a display symbol.
///
/// Three ASCII letters are treated as an ISO code and must be in [`CURRENCIES`];
/// anything else is taken as a raw symbol.
pub fn currency_symbol(input: &str) -> Result<String> {
    let s = input.trim();
    if s.is_empty() {
        return Err(Error::Validation("Currency must not be empty".into()));
    }
    if let Some(c) = CURRENCIES.iter().find(|c| c.symbol == s) {
        return Ok(c.symbol.to_string());
    }
    if s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic()) {
        let code = s.to_uppercase();
        return CURRENCIES
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.symbol.to_string())
            .ok_or_else(|| Error::Validation(format!("Unknown currency code '{}'", code)));
    }
    Ok(s.to_string())
}

pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join("settings.json"))
}

/// Load settings from an explicit path (which must exist), or from the platform
/// config dir when present, or fall back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<AppSettings> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_settings_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(AppSettings::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)?;
    let settings: AppSettings = serde_json::from_str(&raw)?;
    validate_settings(&settings)?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

pub fn validate_settings(settings: &AppSettings) -> Result<()> {
    if let Some(code) = &settings.passcode {
        validate_passcode(code)?;
    }
    if settings.currency.trim().is_empty() {
        return Err(Error::Validation("Currency must not be empty".into()));
    }
    check_magnitude(settings.initial_balance)
}

pub fn validate_passcode(code: &str) -> Result<()> {
    if code.chars().count() != 4 {
        return Err(Error::Validation(
            "Passcode must be exactly 4 characters".into(),
        ));
    }
    Ok(())
}

/// Live-advice configuration. Absent key means the fallback tips are served.
#[derive(Clone, PartialEq, Eq)]
pub struct AdviceConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AdviceConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read from `SMARTEXPENSE_API_KEY` (or `GEMINI_API_KEY`, `API_KEY`),
    /// `SMARTEXPENSE_MODEL`, `SMARTEXPENSE_API_BASE`, `SMARTEXPENSE_TIMEOUT_SECS`.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = ["SMARTEXPENSE_API_KEY", "GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|k| lookup(k))
            .find(|v| !v.trim().is_empty())?;
        let mut cfg = Self::new(api_key.trim());
        if let Some(model) = lookup("SMARTEXPENSE_MODEL").filter(|v| !v.trim().is_empty()) {
            cfg.model = model.trim().to_string();
        }
        if let Some(base) = lookup("SMARTEXPENSE_API_BASE").filter(|v| !v.trim().is_empty()) {
            cfg.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("SMARTEXPENSE_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(s) if s > 0 => cfg.timeout = Duration::from_secs(s),
                _ => tracing::warn!(value = %secs, "ignoring invalid SMARTEXPENSE_TIMEOUT_SECS"),
            }
        }
        Some(cfg)
    }
}
