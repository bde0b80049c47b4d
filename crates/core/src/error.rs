// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for transfer validation and system construction

use crate::id::{ComponentId, DeviceId};
use thiserror::Error;

/// Errors raised by transfer validation, before any state is mutated
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer for {0} names neither a source nor a destination")]
    MissingEndpoints(ComponentId),
    #[error("device not found: {0}")]
    UnknownDevice(DeviceId),
    #[error("component {component} is not on device {device}")]
    UnknownComponent {
        component: ComponentId,
        device: DeviceId,
    },
    #[error("component {component} already resides on device {device}")]
    DuplicateComponent {
        component: ComponentId,
        device: DeviceId,
    },
    #[error("component {component} already resides on destination {device}")]
    RedundantTransfer {
        component: ComponentId,
        device: DeviceId,
    },
    #[error("component {0} has a transfer in flight")]
    ComponentBusy(ComponentId),
}

/// Errors raised while building a system from its configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("device {0} must have capacity greater than zero")]
    ZeroCapacity(DeviceId),
    #[error("component {component} placed on undeclared device {device}")]
    UnknownDevice {
        component: ComponentId,
        device: DeviceId,
    },
    #[error("device {device} holds {placed} components but has capacity {capacity}")]
    DeviceOverfull {
        device: DeviceId,
        capacity: u32,
        placed: u32,
    },
}
