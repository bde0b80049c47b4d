//! Shared helpers for the berth specs.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub use berth_engine::{
    ComponentId, DeviceId, FakeAdapter, Journal, SystemConfig, TransferEngine, TransferError,
    TransferRequest,
};
pub use std::sync::Arc;

pub fn engine(config: SystemConfig) -> Arc<TransferEngine> {
    Arc::new(TransferEngine::new(&config).expect("spec configs are valid"))
}

pub fn component(id: &str) -> ComponentId {
    ComponentId::new(id)
}

pub fn device(id: &str) -> DeviceId {
    DeviceId::new(id)
}

/// Run a transfer on a fresh thread with a throwaway adapter.
pub fn spawn_transfer(
    engine: &Arc<TransferEngine>,
    request: TransferRequest,
) -> JoinHandle<Result<(), TransferError>> {
    let engine = Arc::clone(engine);
    thread::spawn(move || engine.execute(&request, &FakeAdapter::new()))
}

/// Run a transfer on a fresh thread, journaling its callbacks under `label`.
pub fn spawn_journaled(
    engine: &Arc<TransferEngine>,
    request: TransferRequest,
    label: &str,
    journal: &Journal,
) -> JoinHandle<Result<(), TransferError>> {
    let engine = Arc::clone(engine);
    let adapter = FakeAdapter::with_journal(label, journal.clone());
    thread::spawn(move || engine.execute(&request, &adapter))
}

/// Poll until the condition holds, or fail the test after two seconds.
pub fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(5));
    }
}

/// A pause long enough for a wrongly-released thread to make progress.
pub fn settle() {
    thread::sleep(Duration::from_millis(50));
}
