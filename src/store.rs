// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory transaction store. Newest records come first.

use chrono::{Datelike, Duration, Local, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Category, NewTransaction, Transaction};
use crate::utils::check_magnitude;

#[derive(Debug, Default)]
pub struct TransactionStore {
    items: Vec<Transaction>,
    next_id: i64,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Record a transaction stamped with the current local time.
    pub fn add(&mut self, new: NewTransaction) -> Result<&Transaction> {
        self.add_at(new, Local::now().naive_local())
    }

    pub fn add_at(&mut self, new: NewTransaction, date: NaiveDateTime) -> Result<&Transaction> {
        validate(&new)?;
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let tx = Transaction {
            id,
            amount: new.amount,
            r#type: new.r#type,
            category: new.category,
            description: new.description.trim().to_string(),
            date,
        };
        tracing::debug!(id, amount = %tx.amount, kind = %tx.r#type, "transaction added");
        self.items.insert(0, tx);
        Ok(&self.items[0])
    }

    pub fn delete(&mut self, id: i64) -> Result<Transaction> {
        let pos = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        tracing::debug!(id, "transaction deleted");
        Ok(self.items.remove(pos))
    }

    /// Drop every record. Ids keep counting up so none is reused in a session.
    pub fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        n
    }

    /// Seed the sample ledger used by `--demo`, dated relative to `now`.
    pub fn seed_demo(&mut self, now: NaiveDateTime) -> Result<()> {
        let day = |n: u32| now.with_day(n).unwrap_or(now);
        let ago = |n: i64| now - Duration::days(n);
        let samples = [
            (NewTransaction::income(Decimal::from(5000), Category::Salary, "Monthly Salary"), day(1)),
            (NewTransaction::expense(Decimal::from(150), Category::Food, "Grocery Shopping"), now),
            (NewTransaction::expense(Decimal::from(45), Category::Transport, "Uber ride"), ago(1)),
            (NewTransaction::expense(Decimal::from(120), Category::Entertainment, "Movie Night"), ago(2)),
            (NewTransaction::expense(Decimal::from(1200), Category::Bills, "Rent Payment"), day(5)),
            (NewTransaction::expense(Decimal::from(300), Category::Shopping, "New Shoes"), ago(5)),
        ];
        // Inserted in reverse so the first sample ends up first.
        for (new, date) in samples.into_iter().rev() {
            self.add_at(new, date)?;
        }
        Ok(())
    }
}

fn validate(new: &NewTransaction) -> Result<()> {
    if new.description.trim().is_empty() {
        return Err(Error::Validation("Description must not be empty".into()));
    }
    if new.amount.is_sign_negative() && !new.amount.is_zero() {
        return Err(Error::Validation(format!(
            "Amount must not be negative (got {})",
            new.amount
        )));
    }
    check_magnitude(new.amount)
}
