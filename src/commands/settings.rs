// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use crate::config::CURRENCIES;
use crate::models::ThemeColor;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};

pub fn handle(state: &mut AppState, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    match name {
        "balance" => {
            let raw = sub.get_one::<String>("amount").context("amount is required")?;
            let value = parse_decimal(raw)?;
            state.set_initial_balance(value)?;
            println!(
                "Opening balance set to {}",
                fmt_money(&value, &state.settings().currency)
            );
        }
        "settings" => settings(state, sub)?,
        "currencies" => {
            let data = CURRENCIES
                .iter()
                .map(|c| vec![c.code.to_string(), c.symbol.to_string(), c.name.to_string()])
                .collect();
            println!("{}", pretty_table(&["Code", "Symbol", "Name"], data));
        }
        "lock" => {
            state.lock()?;
            println!("Locked.");
        }
        "unlock" => {
            let code = sub.get_one::<String>("passcode").context("passcode is required")?;
            match state.unlock(code) {
                Ok(()) => println!("Unlocked."),
                Err(crate::error::Error::IncorrectPasscode) => println!("Incorrect passcode"),
                Err(e) => return Err(e.into()),
            }
        }
        _ => {}
    }
    Ok(())
}

fn settings(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(c) = sub.get_one::<String>("currency") {
        state.set_currency(c)?;
    }
    if let Some(t) = sub.get_one::<String>("theme") {
        state.set_theme(t.parse::<ThemeColor>()?)?;
    }
    if let Some(d) = sub.get_one::<bool>("dark") {
        state.set_dark_mode(*d)?;
    }
    if let Some(p) = sub.get_one::<String>("passcode") {
        state.set_passcode(Some(p))?;
    }
    if sub.get_flag("clear-passcode") {
        state.set_passcode(None)?;
    }

    let s = state.settings();
    if maybe_print_json(sub.get_flag("json"), s)? {
        return Ok(());
    }
    let data = vec![
        vec!["Currency".into(), s.currency.clone()],
        vec!["Theme".into(), s.theme_color.as_str().to_string()],
        vec!["Dark mode".into(), if s.dark_mode { "on" } else { "off" }.to_string()],
        vec![
            "App lock".into(),
            if s.passcode.is_some() { "on" } else { "off" }.to_string(),
        ],
        vec!["Opening balance".into(), fmt_money(&s.initial_balance, &s.currency)],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], data));
    Ok(())
}
