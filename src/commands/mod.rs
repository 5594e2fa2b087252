// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod reports;
pub mod tips;
pub mod exporter;
pub mod settings;

use anyhow::Result;

use crate::app::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Run one parsed command against the app state.
pub fn dispatch(state: &mut AppState, matches: &clap::ArgMatches, interactive: bool) -> Result<Outcome> {
    // Pick up tips that landed since the last command.
    state.poll_tips();

    let Some((name, sub)) = matches.subcommand() else {
        return Ok(Outcome::Continue);
    };
    if state.is_locked() && !matches!(name, "unlock" | "quit") {
        println!("Locked. Enter `unlock <passcode>` to continue.");
        return Ok(Outcome::Continue);
    }
    match name {
        "add" | "rm" | "list" | "reset" => transactions::handle(state, name, sub)?,
        "summary" | "categories" | "trend" => reports::handle(state, name, sub)?,
        "tips" | "tip" => tips::handle(state, name, sub, interactive)?,
        "export" => exporter::handle(state, sub)?,
        "balance" | "settings" | "currencies" | "lock" | "unlock" => {
            settings::handle(state, name, sub)?
        }
        "quit" => return Ok(Outcome::Quit),
        _ => {}
    }
    Ok(Outcome::Continue)
}
