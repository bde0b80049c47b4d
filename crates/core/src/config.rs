// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! System configuration: device capacities and initial component placement

use crate::id::{ComponentId, DeviceId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for a relocation system
///
/// Declares every device with its slot capacity, and where each pre-existing
/// component initially resides. Validated by [`Scheduler::from_config`]:
/// capacities must be positive, placements must name declared devices, and no
/// device may start over capacity.
///
/// [`Scheduler::from_config`]: crate::sched::Scheduler::from_config
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Slot capacity per device
    pub devices: HashMap<DeviceId, u32>,
    /// Initial device for each pre-placed component
    pub placement: HashMap<ComponentId, DeviceId>,
}

impl SystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, id: impl Into<String>, capacity: u32) -> Self {
        self.devices.insert(DeviceId::new(id), capacity);
        self
    }

    pub fn with_component(mut self, id: impl Into<String>, device: impl Into<String>) -> Self {
        self.placement
            .insert(ComponentId::new(id), DeviceId::new(device));
        self
    }
}
