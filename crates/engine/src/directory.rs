// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent directory of per-component hand-off signals

use crate::gate::Gate;
use berth_core::ComponentId;
use dashmap::DashMap;
use std::sync::Arc;

/// The signaling half of a component record
///
/// Reused across the component's lifetime: both gates are reset at the end
/// of each transfer.
#[derive(Debug, Default)]
pub struct TransferSignals {
    pub prepare: Gate,
    pub perform: Gate,
}

impl TransferSignals {
    pub fn reset(&self) {
        self.prepare.reset();
        self.perform.reset();
    }
}

/// Identity-keyed map of signal records, safe to read from any thread
///
/// Lookups need no external locking; creation and removal happen inside the
/// engine's admission and completion critical sections, so a grant can never
/// race a record's lifetime.
#[derive(Debug, Default)]
pub struct SignalDirectory {
    records: DashMap<ComponentId, Arc<TransferSignals>>,
}

impl SignalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the component's record, creating it if absent
    pub fn ensure(&self, component: &ComponentId) -> Arc<TransferSignals> {
        self.records
            .entry(component.clone())
            .or_default()
            .value()
            .clone()
    }

    pub fn get(&self, component: &ComponentId) -> Option<Arc<TransferSignals>> {
        self.records.get(component).map(|record| record.value().clone())
    }

    pub fn remove(&self, component: &ComponentId) {
        self.records.remove(component);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
