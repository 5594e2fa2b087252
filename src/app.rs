// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state owned by a single controller.
//!
//! Commands get `&mut AppState`; the store, settings and tips live here
//! rather than in globals.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::advice::{AdviceProvider, TipsBoard};
use crate::aggregate::{self, CategoryTotal, DayGroup, Summary, TrendPoint, TypeFilter};
use crate::config;
use crate::error::{Error, Result};
use crate::models::{AppSettings, NewTransaction, ThemeColor, Transaction};
use crate::store::TransactionStore;
use crate::tips::{self, TipReview};
use crate::utils::check_magnitude;

pub struct AppState {
    store: TransactionStore,
    settings: AppSettings,
    board: TipsBoard,
    locked: bool,
    advised_count: Option<usize>,
}

impl AppState {
    pub fn new(settings: AppSettings, provider: AdviceProvider) -> Self {
        let locked = settings.passcode.is_some();
        Self {
            store: TransactionStore::new(),
            settings,
            board: TipsBoard::new(provider),
            locked,
            advised_count: None,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TransactionStore {
        &mut self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn board(&self) -> &TipsBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut TipsBoard {
        &mut self.board
    }

    // --- lock ---

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) -> Result<()> {
        if self.settings.passcode.is_none() {
            return Err(Error::Validation("Set a passcode before locking".into()));
        }
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self, input: &str) -> Result<()> {
        match &self.settings.passcode {
            Some(code) if code == input => {
                self.locked = false;
                Ok(())
            }
            Some(_) => Err(Error::IncorrectPasscode),
            None => {
                self.locked = false;
                Ok(())
            }
        }
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked { Err(Error::Locked) } else { Ok(()) }
    }

    // --- store mutations ---

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        self.ensure_unlocked()?;
        let tx = self.store.add(new)?.clone();
        self.refetch_after_change();
        Ok(tx)
    }

    /// Delete after confirmation. Without confirmation nothing happens and
    /// `Ok(false)` is returned.
    pub fn delete_transaction(&mut self, id: i64, confirmed: bool) -> Result<bool> {
        self.ensure_unlocked()?;
        if self.store.get(id).is_none() {
            return Err(Error::NotFound(id));
        }
        if !confirmed {
            return Ok(false);
        }
        self.store.delete(id)?;
        self.refetch_after_change();
        Ok(true)
    }

    pub fn reset(&mut self, confirmed: bool) -> Result<bool> {
        self.ensure_unlocked()?;
        if !confirmed {
            return Ok(false);
        }
        let removed = self.store.clear();
        tracing::debug!(removed, "all transactions cleared");
        self.refetch_after_change();
        Ok(true)
    }

    // --- settings ---

    pub fn set_initial_balance(&mut self, value: Decimal) -> Result<()> {
        self.ensure_unlocked()?;
        check_magnitude(value)?;
        self.settings.initial_balance = value;
        Ok(())
    }

    pub fn set_currency(&mut self, input: &str) -> Result<()> {
        self.ensure_unlocked()?;
        self.settings.currency = config::currency_symbol(input)?;
        Ok(())
    }

    pub fn set_theme(&mut self, color: ThemeColor) -> Result<()> {
        self.ensure_unlocked()?;
        self.settings.theme_color = color;
        Ok(())
    }

    pub fn set_dark_mode(&mut self, on: bool) -> Result<()> {
        self.ensure_unlocked()?;
        self.settings.dark_mode = on;
        Ok(())
    }

    pub fn set_passcode(&mut self, code: Option<&str>) -> Result<()> {
        self.ensure_unlocked()?;
        if let Some(c) = code {
            config::validate_passcode(c)?;
        }
        self.settings.passcode = code.map(str::to_string);
        Ok(())
    }

    // --- aggregates ---

    pub fn summary(&self) -> Summary {
        aggregate::summarize(self.transactions(), self.settings.initial_balance)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        aggregate::category_breakdown(self.transactions())
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        aggregate::recent_trend(self.transactions())
    }

    pub fn grouped(&self, kind: TypeFilter, search: Option<&str>) -> Vec<DayGroup> {
        self.grouped_on(kind, search, Local::now().date_naive())
    }

    pub fn grouped_on(&self, kind: TypeFilter, search: Option<&str>, today: NaiveDate) -> Vec<DayGroup> {
        let filtered = aggregate::filter_transactions(self.transactions(), kind, search);
        aggregate::group_by_day(&filtered, today)
    }

    // --- tips ---

    /// Fetch tips if the transaction count moved since the last fetch.
    /// Also covers the first fetch after startup.
    pub fn refresh_if_count_changed(&mut self) -> Option<u64> {
        let count = self.store.len();
        if self.advised_count == Some(count) {
            return None;
        }
        Some(self.refresh_tips())
    }

    /// Mutations only refetch once tips have been asked for, so one-shot
    /// commands never send the ledger out.
    fn refetch_after_change(&mut self) {
        if self.advised_count.is_some() {
            self.refresh_if_count_changed();
        }
    }

    pub fn refresh_tips(&mut self) -> u64 {
        self.advised_count = Some(self.store.len());
        self.board.request(self.store.transactions().to_vec())
    }

    pub fn poll_tips(&mut self) -> bool {
        self.board.poll()
    }

    /// Resolve the action behind the tip at `index` on the board.
    pub fn open_tip(&self, index: usize) -> Result<Option<TipReview>> {
        self.ensure_unlocked()?;
        let tip = self
            .board
            .tips()
            .get(index)
            .ok_or_else(|| Error::Validation(format!("No tip #{}", index + 1)))?;
        Ok(tips::resolve_tip(tip, self.transactions()))
    }
}
