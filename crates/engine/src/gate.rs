// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot hand-off gates

use parking_lot::{Condvar, Mutex};

/// A one-shot wake-up signal with an explicit open/closed state
///
/// A gate starts closed. `open` may happen before or after the single waiter
/// arrives; either way `wait` returns once the gate is open. `reset` closes
/// the gate again so the same record serves its component's next transfer.
#[derive(Debug, Default)]
pub struct Gate {
    opened: Mutex<bool>,
    signal: Condvar,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate, waking the waiter if one is parked
    pub fn open(&self) {
        let mut opened = self.opened.lock();
        *opened = true;
        self.signal.notify_one();
    }

    /// Block the calling thread until the gate is open
    pub fn wait(&self) {
        let mut opened = self.opened.lock();
        while !*opened {
            self.signal.wait(&mut opened);
        }
    }

    /// Close the gate for reuse
    pub fn reset(&self) {
        *self.opened.lock() = false;
    }

    pub fn is_open(&self) -> bool {
        *self.opened.lock()
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
