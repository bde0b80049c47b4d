// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The blocking transfer engine

use crate::adapters::TransferAdapter;
use crate::directory::SignalDirectory;
use berth_core::{
    ComponentId, ConfigError, DeviceId, Grant, Scheduler, SystemConfig, TransferError,
    TransferRequest,
};
use parking_lot::FairMutex;

/// Coordinates concurrent component relocations across capacity-bounded
/// devices
///
/// Any number of threads may call [`execute`] concurrently. Every scheduling
/// decision runs as one short critical section under a fair mutex, so
/// decisions happen in call order; the long-running `prepare` and `perform`
/// callbacks run with no lock held.
///
/// [`execute`]: TransferEngine::execute
#[derive(Debug)]
pub struct TransferEngine {
    sched: FairMutex<Scheduler>,
    directory: SignalDirectory,
}

impl TransferEngine {
    /// Build an engine from its configuration, pre-registering every placed
    /// component
    pub fn new(config: &SystemConfig) -> Result<Self, ConfigError> {
        let sched = Scheduler::from_config(config)?;
        let directory = SignalDirectory::new();
        for component in config.placement.keys() {
            directory.ensure(component);
        }
        Ok(Self {
            sched: FairMutex::new(sched),
            directory,
        })
    }

    /// Run one transfer to completion
    ///
    /// Blocks the calling thread until the transfer's `perform` phase has
    /// finished, or returns a validation error before either callback runs.
    /// A transfer that cannot reserve its destination waits in that device's
    /// line until a vacancy propagates to it or a cyclic exchange releases
    /// it.
    pub fn execute(
        &self,
        request: &TransferRequest,
        adapter: &impl TransferAdapter,
    ) -> Result<(), TransferError> {
        let (signals, grants) = {
            let mut sched = self.sched.lock();
            let grants = sched.admit(request)?;
            // Register the signal record before the lock drops: grants aimed
            // at this component can only be decided under the same lock.
            (self.directory.ensure(&request.component), grants)
        };
        self.apply(grants);

        signals.prepare.wait();
        if let Some(source) = &request.source {
            let grants = self.sched.lock().begin_vacate(&request.component, source);
            self.apply(grants);
        }

        adapter.prepare();

        if let Some(source) = &request.source {
            let grants = self.sched.lock().finish_vacate(&request.component, source);
            self.apply(grants);
        }
        signals.perform.wait();

        adapter.perform();

        // Close the gates before the component stops being in flight; the
        // next transfer admitted for it must find them fresh.
        signals.reset();
        {
            let mut sched = self.sched.lock();
            sched.complete(&request.component, request.destination.as_ref());
            if request.destination.is_none() {
                self.directory.remove(&request.component);
            }
        }
        tracing::debug!(component = %request.component, "transfer complete");

        Ok(())
    }

    fn apply(&self, grants: Vec<Grant>) {
        for grant in grants {
            match &grant {
                Grant::Prepare(component) => match self.directory.get(component) {
                    Some(signals) => signals.prepare.open(),
                    None => {
                        tracing::error!(component = %component, "prepare grant for unregistered component");
                    }
                },
                Grant::Perform(component) => match self.directory.get(component) {
                    Some(signals) => signals.perform.open(),
                    None => {
                        tracing::error!(component = %component, "perform grant for unregistered component");
                    }
                },
            }
        }
    }

    // === Inspection ===

    /// Device the component currently resides on, if any
    pub fn location_of(&self, component: &ComponentId) -> Option<DeviceId> {
        self.sched.lock().location_of(component).cloned()
    }

    /// Whether the component has a transfer in flight
    pub fn is_in_flight(&self, component: &ComponentId) -> bool {
        self.sched.lock().is_in_flight(component)
    }

    /// Occupied-slot count of a device, including granted reservations
    pub fn device_used(&self, device: &DeviceId) -> Option<u32> {
        let sched = self.sched.lock();
        Some(sched.device(device)?.used())
    }

    /// Fixed slot capacity of a device
    pub fn device_capacity(&self, device: &DeviceId) -> Option<u32> {
        let sched = self.sched.lock();
        Some(sched.device(device)?.capacity())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
