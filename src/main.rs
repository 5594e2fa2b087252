// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Local;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use smartexpense::advice::AdviceProvider;
use smartexpense::app::AppState;
use smartexpense::commands::{self, Outcome};
use smartexpense::config::{self, AdviceConfig};
use smartexpense::{cli, utils::fmt_money};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    let settings = config::load_settings(matches.get_one::<String>("settings").map(Path::new))
        .context("Load settings")?;
    let provider = AdviceProvider::from_config(AdviceConfig::from_env());
    let mut state = AppState::new(settings, provider);
    if matches.get_flag("demo") {
        state.store_mut().seed_demo(Local::now().naive_local())?;
    }

    if matches.subcommand().is_some() {
        if state.is_locked() {
            anyhow::bail!("App is locked; start an interactive session to unlock");
        }
        commands::dispatch(&mut state, &matches, false)?;
        return Ok(());
    }
    run_session(&mut state)
}

fn run_session(state: &mut AppState) -> Result<()> {
    println!("SmartExpense {}. Type `help` for commands, `quit` to leave.", env!("CARGO_PKG_VERSION"));
    if state.is_locked() {
        println!("Enter passcode to unlock: `unlock <passcode>`");
    } else {
        let s = state.summary();
        println!("Balance: {}", fmt_money(&s.balance, &state.settings().currency));
    }
    // Tips for the starting ledger; later fetches follow mutations.
    state.refresh_if_count_changed();

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => return Err(e.into()),
        };
        let words = cli::split_line(&line);
        if words.is_empty() {
            state.poll_tips();
            continue;
        }
        // Passcodes stay out of history.
        if words[0] != "unlock" && !line.contains("--passcode") {
            let _ = rl.add_history_entry(line.as_str());
        }
        let argv = std::iter::once("smartexpense".to_string()).chain(words);
        let matches = match cli::build_cli().try_get_matches_from(argv) {
            Ok(m) => m,
            Err(e) => {
                // Help and version requests land here too.
                let _ = e.print();
                continue;
            }
        };
        match commands::dispatch(state, &matches, true) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue) => {}
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }
    Ok(())
}
