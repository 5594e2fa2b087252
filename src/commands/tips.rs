// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{bail, Context, Result};
use std::time::Duration;

pub fn handle(state: &mut AppState, name: &str, sub: &clap::ArgMatches, interactive: bool) -> Result<()> {
    match name {
        "tips" => show(state, sub, interactive)?,
        "tip" => open(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(state: &mut AppState, sub: &clap::ArgMatches, interactive: bool) -> Result<()> {
    if sub.get_flag("refresh") {
        state.refresh_tips();
    } else {
        state.refresh_if_count_changed();
    }
    // A one-shot run has no later prompt to pick the result up at.
    if sub.get_flag("wait") || !interactive {
        let budget = Duration::from_secs(DEFAULT_TIMEOUT_SECS + 5);
        if !state.board_mut().wait(budget) {
            tracing::warn!("timed out waiting for tips");
        }
    }
    state.poll_tips();

    let board = state.board();
    if board.is_loading() {
        println!("Analyzing your finances...");
        if board.tips().is_empty() {
            return Ok(());
        }
    }
    if maybe_print_json(sub.get_flag("json"), &board.tips())? {
        return Ok(());
    }
    if board.tips().is_empty() {
        println!("No tips yet.");
        return Ok(());
    }
    let data = board
        .tips()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            vec![
                format!("{} {}", i + 1, t.icon.marker()),
                t.title.clone(),
                t.description.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["#", "Tip", ""], data));
    Ok(())
}

fn open(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let number = *sub.get_one::<usize>("number").context("tip number is required")?;
    if number == 0 {
        bail!("Tips are numbered from 1");
    }
    let Some(review) = state.open_tip(number - 1)? else {
        println!("This tip has no review attached.");
        return Ok(());
    };
    if maybe_print_json(sub.get_flag("json"), &review)? {
        return Ok(());
    }
    if review.transactions.is_empty() {
        println!("No bills or entertainment expenses to review.");
        return Ok(());
    }
    let ccy = &state.settings().currency;
    let data = review
        .transactions
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.format("%Y-%m-%d").to_string(),
                t.category.to_string(),
                t.description.clone(),
                fmt_money(&t.amount, ccy),
            ]
        })
        .collect();
    println!("Recurring bills to review:");
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Category", "Description", "Amount"], data)
    );
    Ok(())
}
