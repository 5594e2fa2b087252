// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

/// Command tree shared by the process arguments and each line of the
/// interactive session.
pub fn build_cli() -> Command {
    Command::new("smartexpense")
        .version(clap::crate_version!())
        .about("Track income and expenses, see where the money goes, get smart tips")
        .arg(
            Arg::new("demo")
                .long("demo")
                .action(ArgAction::SetTrue)
                .help("Start with the sample transactions"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("PATH")
                .help("Read settings from this JSON file"),
        )
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("amount")
                        .required(true)
                        .help("Amount, e.g. 12.50"),
                )
                .arg(
                    Arg::new("description")
                        .required(true)
                        .num_args(1..)
                        .help("What it was for"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .default_value("expense")
                        .help("expense|income"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .default_value("Others")
                        .help("Food|Transport|Bills|Entertainment|Shopping|Salary|Investment|Others"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(yes_flag()),
        )
        .subcommand(
            Command::new("list")
                .about("Transactions grouped by day")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .default_value("all")
                        .help("all|income|expense"),
                )
                .arg(Arg::new("search").long("search").short('s'))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("summary")
                .about("Balance, totals and savings rate")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("categories")
                .about("Expense breakdown by category")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("trend")
                .about("Spending over the last 7 transactions")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("tips")
                .about("Show smart tips")
                .arg(
                    Arg::new("refresh")
                        .long("refresh")
                        .action(ArgAction::SetTrue)
                        .help("Ask for a fresh set"),
                )
                .arg(
                    Arg::new("wait")
                        .long("wait")
                        .action(ArgAction::SetTrue)
                        .help("Wait for a pending request to finish"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("tip")
                .about("Open the review behind a tip")
                .arg(
                    Arg::new("number")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions as CSV")
                .arg(
                    Arg::new("out")
                        .default_value("transactions.csv")
                        .help("Output path, or - for stdout"),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all transactions")
                .arg(yes_flag()),
        )
        .subcommand(
            Command::new("balance")
                .about("Set the opening balance")
                .arg(
                    Arg::new("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change settings")
                .arg(Arg::new("currency").long("currency").help("ISO code or symbol"))
                .arg(Arg::new("theme").long("theme").help("blue|green|purple|orange"))
                .arg(
                    Arg::new("dark")
                        .long("dark")
                        .value_parser(value_parser!(bool))
                        .help("true|false"),
                )
                .arg(Arg::new("passcode").long("passcode").help("4-character passcode"))
                .arg(
                    Arg::new("clear-passcode")
                        .long("clear-passcode")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("passcode"),
                )
                .arg(json_flag()),
        )
        .subcommand(Command::new("currencies").about("List selectable currencies"))
        .subcommand(Command::new("lock").about("Lock the app"))
        .subcommand(
            Command::new("unlock")
                .about("Unlock with the passcode")
                .arg(Arg::new("passcode").required(true)),
        )
        .subcommand(Command::new("quit").alias("exit").about("Leave the session"))
}

/// Split a session line into words. Single or double quotes group words;
/// no escapes.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;
    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => cur.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut cur));
                    in_word = false;
                }
            }
            None => {
                cur.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(cur);
    }
    words
}
