// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use super::AdviceProvider;
use crate::models::{AiTip, Transaction};

/// Current tips plus the bookkeeping for in-flight fetches.
///
/// Every fetch gets a token from a counter; a completed fetch only replaces
/// the tips when its token is still the newest one issued.
pub struct TipsBoard {
    provider: AdviceProvider,
    tips: Vec<AiTip>,
    latest: u64,
    applied: u64,
    tx: Sender<(u64, Vec<AiTip>)>,
    rx: Receiver<(u64, Vec<AiTip>)>,
}

impl TipsBoard {
    pub fn new(provider: AdviceProvider) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            tips: Vec::new(),
            latest: 0,
            applied: 0,
            tx,
            rx,
        }
    }

    pub fn provider(&self) -> &AdviceProvider {
        &self.provider
    }

    pub fn tips(&self) -> &[AiTip] {
        &self.tips
    }

    /// True while the newest fetch has not come back.
    pub fn is_loading(&self) -> bool {
        self.applied < self.latest
    }

    pub fn latest_token(&self) -> u64 {
        self.latest
    }

    /// Start a fetch on a worker thread and return its token.
    pub fn request(&mut self, snapshot: Vec<Transaction>) -> u64 {
        self.latest += 1;
        let token = self.latest;
        let provider = self.provider.clone();
        let tx = self.tx.clone();
        tracing::debug!(token, count = snapshot.len(), "advice fetch started");
        thread::spawn(move || {
            let tips = provider.get_financial_advice(&snapshot);
            // The board may be gone by now; nothing to deliver to then.
            let _ = tx.send((token, tips));
        });
        token
    }

    /// Apply whatever has arrived without blocking. Returns true if the tips changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((token, tips)) = self.rx.try_recv() {
            changed |= self.accept(token, tips);
        }
        changed
    }

    /// Block until the newest fetch lands or `timeout` passes.
    /// Returns false on timeout.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_loading() {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok((token, tips)) => {
                    self.accept(token, tips);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    /// Apply a finished fetch. Older tokens are dropped.
    pub fn accept(&mut self, token: u64, tips: Vec<AiTip>) -> bool {
        if token != self.latest {
            tracing::debug!(token, latest = self.latest, "discarding stale advice response");
            return false;
        }
        self.tips = tips;
        self.applied = token;
        true
    }
}
