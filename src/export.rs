// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::Transaction;

pub const CSV_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Write one CSV row per transaction, in the order given. Fields holding
/// commas, quotes or newlines are quoted.
pub fn write_csv<W: Write>(out: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADERS)?;
    for t in transactions {
        wtr.write_record([
            t.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            t.r#type.to_string(),
            t.category.to_string(),
            t.description.clone(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv_file(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, transactions)
}

pub fn to_csv_string(transactions: &[Transaction]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, transactions)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
