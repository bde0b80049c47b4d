// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission, reservation, hand-off, and completion transitions

use super::cycle;
use super::device::DeviceState;
use crate::config::SystemConfig;
use crate::error::{ConfigError, TransferError};
use crate::grant::Grant;
use crate::id::{ComponentId, DeviceId};
use crate::transfer::TransferRequest;
use std::collections::HashMap;

/// Scheduling state of one component
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentState {
    pub(super) location: Option<DeviceId>,
    pub(super) in_flight: bool,
    pub(super) successor: Option<ComponentId>,
}

impl ComponentState {
    fn resident(device: DeviceId) -> Self {
        Self {
            location: Some(device),
            in_flight: false,
            successor: None,
        }
    }

    fn arriving() -> Self {
        Self {
            location: None,
            in_flight: false,
            successor: None,
        }
    }
}

/// The coordinator's entire mutable scheduling state
///
/// The runtime serializes access; every method here runs as one atomic,
/// non-suspending transaction and returns the grants it decided.
#[derive(Clone, Debug, PartialEq)]
pub struct Scheduler {
    pub(super) devices: HashMap<DeviceId, DeviceState>,
    pub(super) components: HashMap<ComponentId, ComponentState>,
}

impl Scheduler {
    /// Build the initial state from a validated configuration
    pub fn from_config(config: &SystemConfig) -> Result<Self, ConfigError> {
        let mut devices = HashMap::new();
        for (id, &capacity) in &config.devices {
            if capacity == 0 {
                return Err(ConfigError::ZeroCapacity(id.clone()));
            }
            devices.insert(id.clone(), DeviceState::new(capacity));
        }

        let mut components = HashMap::new();
        for (component, device) in &config.placement {
            let Some(state) = devices.get_mut(device) else {
                return Err(ConfigError::UnknownDevice {
                    component: component.clone(),
                    device: device.clone(),
                });
            };
            state.used += 1;
            components.insert(component.clone(), ComponentState::resident(device.clone()));
        }

        for (id, state) in &devices {
            if state.used > state.capacity {
                return Err(ConfigError::DeviceOverfull {
                    device: id.clone(),
                    capacity: state.capacity,
                    placed: state.used,
                });
            }
        }

        Ok(Self {
            devices,
            components,
        })
    }

    /// Validate and admit a transfer, deciding how its destination slot is
    /// obtained
    ///
    /// On success the component is in flight. A removal gets both its gates
    /// granted at once. An introduction or move either gets an immediate
    /// reservation, or joins the destination's waiting line; a queued move
    /// additionally triggers a cycle search seeded at its source.
    pub fn admit(&mut self, request: &TransferRequest) -> Result<Vec<Grant>, TransferError> {
        self.validate(request)?;

        let component = request.component.clone();
        if request.source.is_none() && request.destination.is_none() {
            // validate() already rejects this; guard again before mutating.
            return Err(TransferError::MissingEndpoints(component));
        }

        let entry = self
            .components
            .entry(component.clone())
            .or_insert_with(ComponentState::arriving);
        entry.in_flight = true;

        let mut grants = Vec::new();
        match (&request.source, &request.destination) {
            (Some(_), None) => {
                // A pure removal never waits.
                grants.push(Grant::Prepare(component.clone()));
                grants.push(Grant::Perform(component));
            }
            (None, Some(destination)) => {
                if !self.reserve(destination, &component, &mut grants) {
                    tracing::debug!(component = %component, device = %destination, "introduction queued");
                }
            }
            (Some(source), Some(destination)) => {
                if !self.reserve(destination, &component, &mut grants) {
                    match cycle::find(self, source) {
                        Some(found) => {
                            tracing::debug!(component = %component, len = found.len(), "cycle resolved");
                            grants.extend(cycle::resolve(self, &found));
                        }
                        None => {
                            tracing::debug!(component = %component, device = %destination, "move queued");
                        }
                    }
                }
            }
            (None, None) => {}
        }

        Ok(grants)
    }

    /// The validation ladder, checked in a fixed order
    fn validate(&self, request: &TransferRequest) -> Result<(), TransferError> {
        let component = &request.component;
        let state = self.components.get(component);

        if state.is_some_and(|s| s.in_flight) {
            return Err(TransferError::ComponentBusy(component.clone()));
        }
        if request.source.is_none() && request.destination.is_none() {
            return Err(TransferError::MissingEndpoints(component.clone()));
        }
        for device in [&request.source, &request.destination].into_iter().flatten() {
            if !self.devices.contains_key(device) {
                return Err(TransferError::UnknownDevice(device.clone()));
            }
        }

        let location = state.and_then(|s| s.location.as_ref());
        match &request.source {
            None => {
                if let Some(current) = location {
                    return Err(TransferError::DuplicateComponent {
                        component: component.clone(),
                        device: current.clone(),
                    });
                }
            }
            Some(source) => {
                if location != Some(source) {
                    return Err(TransferError::UnknownComponent {
                        component: component.clone(),
                        device: source.clone(),
                    });
                }
            }
        }

        if let Some(destination) = &request.destination {
            if state.is_some() && location == Some(destination) {
                return Err(TransferError::RedundantTransfer {
                    component: component.clone(),
                    device: destination.clone(),
                });
            }
        }

        Ok(())
    }

    /// Try to obtain a destination slot: free slot, then vacated-set claim,
    /// then join the waiting line
    ///
    /// Returns whether a reservation was made. The strategy order is fixed;
    /// see DESIGN.md.
    fn reserve(
        &mut self,
        destination: &DeviceId,
        component: &ComponentId,
        grants: &mut Vec<Grant>,
    ) -> bool {
        let Some(device) = self.devices.get_mut(destination) else {
            return false;
        };

        if device.has_free_slot() {
            device.used += 1;
            grants.push(Grant::Prepare(component.clone()));
            grants.push(Grant::Perform(component.clone()));
            return true;
        }

        if let Some(vacated) = device.claim_vacated() {
            // The slot exists but is not yet physically free: prepare may
            // start, perform waits for the vacating component's hand-off.
            if let Some(state) = self.components.get_mut(&vacated) {
                state.successor = Some(component.clone());
            }
            grants.push(Grant::Prepare(component.clone()));
            tracing::debug!(component = %component, after = %vacated, "claimed vacated slot");
            return true;
        }

        device.incoming.push_back(component.clone());
        false
    }

    /// First hand-off window of a vacating component, entered once its
    /// prepare gate opens
    ///
    /// If nothing has claimed the slot yet, the head of the source's waiting
    /// line becomes the successor and gets its prepare grant; with no waiter,
    /// the component joins the source's vacated set instead.
    pub fn begin_vacate(&mut self, component: &ComponentId, source: &DeviceId) -> Vec<Grant> {
        let mut grants = Vec::new();

        let has_successor = self
            .components
            .get(component)
            .is_some_and(|s| s.successor.is_some());
        if has_successor {
            return grants;
        }

        if let Some(device) = self.devices.get_mut(source) {
            match device.incoming.pop_front() {
                Some(next) => {
                    grants.push(Grant::Prepare(next.clone()));
                    if let Some(state) = self.components.get_mut(component) {
                        state.successor = Some(next);
                    }
                }
                None => {
                    device.vacated.insert(component.clone());
                }
            }
        }

        grants
    }

    /// Second hand-off window, entered after the prepare callback returns
    ///
    /// The slot either passes to the successor (its perform gate opens) or is
    /// genuinely freed. Leaving the vacated set is idempotent: a claimant may
    /// have removed the component already.
    pub fn finish_vacate(&mut self, component: &ComponentId, source: &DeviceId) -> Vec<Grant> {
        let mut grants = Vec::new();

        if let Some(device) = self.devices.get_mut(source) {
            device.vacated.remove(component);
            let successor = self
                .components
                .get(component)
                .and_then(|s| s.successor.clone());
            match successor {
                Some(next) => grants.push(Grant::Perform(next)),
                None => device.used = device.used.saturating_sub(1),
            }
        }

        grants
    }

    /// Commit the end of a transfer
    ///
    /// With a destination the component's location moves there and its
    /// transfer fields clear; without one the record leaves the system.
    /// Destination slot counts were already settled at reservation time.
    pub fn complete(&mut self, component: &ComponentId, destination: Option<&DeviceId>) {
        match destination {
            Some(device) => {
                if let Some(state) = self.components.get_mut(component) {
                    state.location = Some(device.clone());
                    state.successor = None;
                    state.in_flight = false;
                }
            }
            None => {
                self.components.remove(component);
            }
        }
    }

    // === Inspection ===

    pub fn location_of(&self, component: &ComponentId) -> Option<&DeviceId> {
        self.components.get(component)?.location.as_ref()
    }

    pub fn is_in_flight(&self, component: &ComponentId) -> bool {
        self.components
            .get(component)
            .is_some_and(|s| s.in_flight)
    }

    pub fn device(&self, device: &DeviceId) -> Option<&DeviceState> {
        self.devices.get(device)
    }

    pub(super) fn incoming(&self, device: &DeviceId) -> impl Iterator<Item = &ComponentId> {
        self.devices
            .get(device)
            .map(|d| d.incoming.iter())
            .into_iter()
            .flatten()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
