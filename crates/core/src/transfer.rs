// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer requests and their shapes

use crate::id::{ComponentId, DeviceId};
use serde::{Deserialize, Serialize};

/// A request to relocate one component
///
/// At least one endpoint must be present: no source means the component is
/// being introduced into the system, no destination means it is being removed
/// from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub component: ComponentId,
    pub source: Option<DeviceId>,
    pub destination: Option<DeviceId>,
}

/// The three kinds of transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferShape {
    /// No source: the component enters the system
    Introduce,
    /// No destination: the component leaves the system
    Remove,
    /// Both endpoints: the component moves between devices
    Relocate,
}

impl TransferRequest {
    /// Move a component from one device to another
    pub fn relocate(
        component: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            component: ComponentId::new(component),
            source: Some(DeviceId::new(source)),
            destination: Some(DeviceId::new(destination)),
        }
    }

    /// Bring a new component into the system
    pub fn introduce(component: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            component: ComponentId::new(component),
            source: None,
            destination: Some(DeviceId::new(destination)),
        }
    }

    /// Remove a component from the system
    pub fn remove(component: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            component: ComponentId::new(component),
            source: Some(DeviceId::new(source)),
            destination: None,
        }
    }

    /// Classify the request; `None` when both endpoints are absent
    pub fn shape(&self) -> Option<TransferShape> {
        match (&self.source, &self.destination) {
            (None, None) => None,
            (None, Some(_)) => Some(TransferShape::Introduce),
            (Some(_), None) => Some(TransferShape::Remove),
            (Some(_), Some(_)) => Some(TransferShape::Relocate),
        }
    }
}
