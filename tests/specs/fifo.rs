//! FIFO specs
//!
//! Verify that a device's waiting line grants access in call order.

use crate::prelude::*;

#[test]
fn waiting_introductions_enter_in_call_order() {
    let engine = engine(SystemConfig::new().with_device("a", 1));
    let journal = Journal::new();

    let seeded = engine.execute(&TransferRequest::introduce("c0", "a"), &FakeAdapter::new());
    assert_eq!(seeded, Ok(()));

    // Queue c1..c4, each confirmed in line before the next is issued.
    let labels = ["c1", "c2", "c3", "c4"];
    let mut waiting = Vec::new();
    for label in labels {
        let handle = spawn_journaled(
            &engine,
            TransferRequest::introduce(label, "a"),
            label,
            &journal,
        );
        wait_until("introduction to join the waiting line", || {
            engine.is_in_flight(&component(label))
        });
        waiting.push(handle);
    }

    // Each removal hands the slot to the head of the line.
    let occupants = ["c0", "c1", "c2", "c3"];
    for (occupant, handle) in occupants.into_iter().zip(waiting) {
        let removed = engine.execute(
            &TransferRequest::remove(occupant, "a"),
            &FakeAdapter::new(),
        );
        assert_eq!(removed, Ok(()));
        assert_eq!(handle.join().unwrap(), Ok(()));
    }
    assert_eq!(engine.location_of(&component("c4")), Some(device("a")));

    let performed: Vec<String> = journal
        .entries()
        .into_iter()
        .filter(|e| e.ends_with(":perform"))
        .collect();
    assert_eq!(
        performed,
        vec!["c1:perform", "c2:perform", "c3:perform", "c4:perform"]
    );
    assert_eq!(engine.device_used(&device("a")), Some(1));
}
