// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{DayGroup, TypeFilter};
use crate::app::AppState;
use crate::models::{Category, NewTransaction, TransactionType};
use crate::utils::{confirm, fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(state: &mut AppState, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    match name {
        "add" => add(state, sub)?,
        "rm" => remove(state, sub)?,
        "list" => list(state, sub)?,
        "reset" => reset(state, sub)?,
        _ => {}
    }
    Ok(())
}

/// Build the add request from `add` arguments.
pub fn new_transaction(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let amount_s = sub
        .get_one::<String>("amount")
        .context("amount is required")?;
    let amount = parse_amount(amount_s)?;
    let description = sub
        .get_many::<String>("description")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let r#type = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?
        .unwrap_or(TransactionType::Expense);
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.parse::<Category>())
        .transpose()?
        .unwrap_or(Category::Others);
    Ok(NewTransaction {
        amount,
        r#type,
        category,
        description,
    })
}

fn add(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction(sub)?;
    let tx = state.add_transaction(new)?;
    println!(
        "Recorded #{} {} {} '{}' ({})",
        tx.id,
        tx.r#type,
        fmt_money(&tx.amount, &state.settings().currency),
        tx.description,
        tx.category
    );
    Ok(())
}

fn remove(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    let tx = state
        .store()
        .get(id)
        .cloned()
        .with_context(|| format!("Transaction {} not found", id))?;
    let confirmed = sub.get_flag("yes")
        || confirm(&format!("Delete #{} '{}'?", tx.id, tx.description))
            .context("Confirmation needs a terminal; pass --yes")?;
    if state.delete_transaction(id, confirmed)? {
        println!("Deleted #{}", id);
    } else {
        println!("Kept #{}", id);
    }
    Ok(())
}

fn reset(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let confirmed = sub.get_flag("yes")
        || confirm("This will delete all data. Are you sure?")
            .context("Confirmation needs a terminal; pass --yes")?;
    if state.reset(confirmed)? {
        println!("All transactions deleted");
    } else {
        println!("Nothing deleted");
    }
    Ok(())
}

pub fn type_filter(s: &str) -> Result<TypeFilter> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(TypeFilter::All);
    }
    Ok(TypeFilter::Only(s.parse::<TransactionType>()?))
}

#[derive(Serialize)]
pub struct ListRow {
    pub day: String,
    pub id: i64,
    pub time: String,
    pub r#type: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

pub fn list_rows(groups: &[DayGroup], symbol: &str) -> Vec<ListRow> {
    let mut rows = Vec::new();
    for g in groups {
        for t in &g.transactions {
            let signed = if t.is_expense() && !t.amount.is_zero() {
                -t.amount
            } else {
                t.amount
            };
            rows.push(ListRow {
                day: g.label.to_string(),
                id: t.id,
                time: t.date.format("%H:%M").to_string(),
                r#type: t.r#type.to_string(),
                category: t.category.to_string(),
                description: t.description.clone(),
                amount: fmt_money(&signed, symbol),
            });
        }
    }
    rows
}

fn list(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let kind = type_filter(sub.get_one::<String>("type").map(String::as_str).unwrap_or("all"))?;
    let search = sub.get_one::<String>("search").map(String::as_str);
    let groups = state.grouped(kind, search);
    let data = list_rows(&groups, &state.settings().currency);
    if maybe_print_json(sub.get_flag("json"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions found. Try adding a new one or adjusting filters.");
    } else {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.day,
                    r.id.to_string(),
                    r.time,
                    r.category,
                    r.description,
                    r.amount,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Day", "ID", "Time", "Category", "Description", "Amount"], rows)
        );
    }
    Ok(())
}
