// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::Path;

use crate::app::AppState;
use crate::export::{export_csv_file, write_csv};

pub fn handle(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub
        .get_one::<String>("out")
        .map(String::as_str)
        .unwrap_or("transactions.csv");
    if out == "-" {
        write_csv(std::io::stdout().lock(), state.transactions())?;
        return Ok(());
    }
    export_csv_file(Path::new(out), state.transactions())
        .with_context(|| format!("Export to {}", out))?;
    println!(
        "Exported {} transactions to {}",
        state.transactions().len(),
        out
    );
    Ok(())
}
