// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cycle detection over the live wait-for graph
//!
//! Devices are nodes. From device `v` the search follows each component
//! waiting in `v`'s line to the device that component currently occupies: a
//! closed chain of such edges is a set of transfers that can all proceed by
//! exchanging slots, with no net capacity change.

use super::scheduler::Scheduler;
use crate::grant::Grant;
use crate::id::{ComponentId, DeviceId};
use std::collections::HashSet;

/// A component on a detected cycle, paired with the device it waits to enter
pub(super) type Member = (ComponentId, DeviceId);

/// Depth-first search for a cycle, seeded at the source device of a move
/// that just joined a waiting line
///
/// Returns the cycle members in traversal order, or `None`. Queues are not
/// modified; [`resolve`] does that.
pub(super) fn find(sched: &Scheduler, seed: &DeviceId) -> Option<Vec<Member>> {
    let mut on_path = HashSet::new();
    let mut path: Vec<Member> = Vec::new();
    let revisited = search(sched, seed, &mut on_path, &mut path)?;

    // The cycle is the traversed suffix from the revisited device onward.
    let start = path
        .iter()
        .position(|(_, waits_for)| *waits_for == revisited)?;
    Some(path.split_off(start))
}

fn search(
    sched: &Scheduler,
    device: &DeviceId,
    on_path: &mut HashSet<DeviceId>,
    path: &mut Vec<Member>,
) -> Option<DeviceId> {
    on_path.insert(device.clone());

    for waiting in sched.incoming(device) {
        // Components entering from outside the system occupy no slot and
        // cannot be part of an exchange.
        let Some(location) = sched.location_of(waiting) else {
            continue;
        };

        path.push((waiting.clone(), device.clone()));
        if on_path.contains(location) {
            return Some(location.clone());
        }
        if let Some(found) = search(sched, location, on_path, path) {
            return Some(found);
        }
        path.pop();
    }

    on_path.remove(device);
    None
}

/// Release a detected cycle: every member leaves its waiting line, becomes
/// its predecessor's successor, and gets its prepare grant
///
/// Each member vacates the slot the next member will consume, so no `used`
/// count changes anywhere on the cycle.
pub(super) fn resolve(sched: &mut Scheduler, members: &[Member]) -> Vec<Grant> {
    let mut grants = Vec::with_capacity(members.len());

    for (component, waits_for) in members {
        if let Some(device) = sched.devices.get_mut(waits_for) {
            device.unqueue(component);
        }
    }

    for (index, (component, _)) in members.iter().enumerate() {
        let (next, _) = &members[(index + 1) % members.len()];
        if let Some(state) = sched.components.get_mut(component) {
            state.successor = Some(next.clone());
        }
        grants.push(Grant::Prepare(component.clone()));
    }

    grants
}

#[cfg(test)]
#[path = "cycle_tests.rs"]
mod tests;
