// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn handle(state: &mut AppState, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    match name {
        "summary" => summary(state, sub)?,
        "categories" => categories(state, sub)?,
        "trend" => trend(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let s = state.summary();
    if maybe_print_json(sub.get_flag("json"), &s)? {
        return Ok(());
    }
    let ccy = &state.settings().currency;
    let rate = s.display_savings_rate();
    let data = vec![
        vec!["Balance".into(), fmt_money(&s.balance, ccy)],
        vec!["Income".into(), fmt_money(&s.total_income, ccy)],
        vec!["Expenses".into(), fmt_money(&s.total_expense, ccy)],
        vec!["Savings rate".into(), format!("{:.1}%", rate)],
    ];
    println!("{}", pretty_table(&["", "Amount"], data));
    if rate > Decimal::from(20) {
        println!("Savings goal met: keep your savings rate above 20%");
    } else {
        println!("Savings goal: keep your savings rate above 20%");
    }
    Ok(())
}

fn categories(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let items = state.category_breakdown();
    if maybe_print_json(sub.get_flag("json"), &items)? {
        return Ok(());
    }
    if items.is_empty() {
        println!("No expenses to break down yet.");
        return Ok(());
    }
    let ccy = &state.settings().currency;
    let data = items
        .iter()
        .map(|c| {
            vec![
                c.category.to_string(),
                fmt_money(&c.total, ccy),
                format!("{:.1}%", c.share),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    Ok(())
}

fn trend(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let points = state.trend();
    if maybe_print_json(sub.get_flag("json"), &points)? {
        return Ok(());
    }
    let ccy = &state.settings().currency;
    let peak = points
        .iter()
        .map(|p| p.amount)
        .max()
        .unwrap_or_default();
    let data = points
        .iter()
        .map(|p| {
            let width = if peak.is_zero() {
                0
            } else {
                (p.amount / peak * Decimal::from(20))
                    .round()
                    .to_usize()
                    .unwrap_or(0)
            };
            vec![p.label.clone(), fmt_money(&p.amount, ccy), "#".repeat(width)]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Spent", ""], data));
    Ok(())
}
