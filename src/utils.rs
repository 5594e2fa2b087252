// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use dialoguer::{theme::ColorfulTheme, Confirm};
use rust_decimal::Decimal;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::MAX_AMOUNT;

const UA: &str = concat!(
    "smartexpense/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/smartexpense)"
);

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Parse a signed amount, bounded by [`MAX_AMOUNT`] either way.
pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| Error::Validation(format!("Invalid amount '{}'", s)))?;
    check_magnitude(d)?;
    Ok(d)
}

pub fn check_magnitude(d: Decimal) -> Result<()> {
    if d.abs() > MAX_AMOUNT {
        return Err(Error::Validation(format!(
            "Amount must not exceed {} (got {})",
            MAX_AMOUNT, d
        )));
    }
    Ok(())
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(Error::Validation(format!("Amount must not be negative (got {})", d)));
    }
    Ok(d)
}

/// `$120.00`, `-€3.50`. Zero never gets a sign, even when it is `-0`.
pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("-{}{:.2}", symbol, d.abs())
    } else {
        format!("{}{:.2}", symbol, d.abs())
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

/// Ask a y/N question on the terminal. Defaults to no.
pub fn confirm(question: &str) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(question)
        .default(false)
        .interact()?;
    Ok(answer)
}
