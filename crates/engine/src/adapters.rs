// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter seam for the external data-movement collaborator

/// The two protocol points at which the engine hands control to the caller's
/// data-movement logic
///
/// One adapter serves one transfer. Faults inside a callback are fatal to
/// that transfer; the engine defines no recovery.
pub trait TransferAdapter: Send + Sync {
    /// Invoked exactly once per transfer, after the destination slot is
    /// acquired and before any capacity is freed on the source
    fn prepare(&self);

    /// Invoked exactly once per transfer, once the destination slot is
    /// unconditionally available
    fn perform(&self);
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAdapter, Journal};

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::TransferAdapter;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Shared, ordered record of adapter callbacks across threads
    #[derive(Clone, Debug, Default)]
    pub struct Journal(Arc<Mutex<Vec<String>>>);

    impl Journal {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn record(&self, entry: impl Into<String>) {
            self.0.lock().push(entry.into());
        }

        pub fn entries(&self) -> Vec<String> {
            self.0.lock().clone()
        }
    }

    /// Counting adapter for tests
    #[derive(Debug, Default)]
    pub struct FakeAdapter {
        label: String,
        journal: Option<Journal>,
        prepares: AtomicU32,
        performs: AtomicU32,
    }

    impl FakeAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// An adapter that appends `label:prepare` / `label:perform` entries
        /// to a shared journal
        pub fn with_journal(label: impl Into<String>, journal: Journal) -> Self {
            Self {
                label: label.into(),
                journal: Some(journal),
                ..Self::default()
            }
        }

        pub fn prepare_count(&self) -> u32 {
            self.prepares.load(Ordering::SeqCst)
        }

        pub fn perform_count(&self) -> u32 {
            self.performs.load(Ordering::SeqCst)
        }
    }

    impl TransferAdapter for FakeAdapter {
        fn prepare(&self) {
            self.prepares.fetch_add(1, Ordering::SeqCst);
            if let Some(journal) = &self.journal {
                journal.record(format!("{}:prepare", self.label));
            }
        }

        fn perform(&self) {
            self.performs.fetch_add(1, Ordering::SeqCst);
            if let Some(journal) = &self.journal {
                journal.record(format!("{}:perform", self.label));
            }
        }
    }
}
