//! Cycle resolution specs
//!
//! Verify that closed chains of pending moves complete as capacity-neutral
//! exchanges instead of deadlocking.

use crate::prelude::*;

#[test]
fn two_opposed_moves_swap_devices() {
    let engine = engine(
        SystemConfig::new()
            .with_device("a", 1)
            .with_device("b", 1)
            .with_component("x", "a")
            .with_component("y", "b"),
    );

    let first = spawn_transfer(&engine, TransferRequest::relocate("x", "a", "b"));
    let second = spawn_transfer(&engine, TransferRequest::relocate("y", "b", "a"));

    assert_eq!(first.join().unwrap(), Ok(()));
    assert_eq!(second.join().unwrap(), Ok(()));

    assert_eq!(engine.location_of(&component("x")), Some(device("b")));
    assert_eq!(engine.location_of(&component("y")), Some(device("a")));
    assert_eq!(engine.device_used(&device("a")), Some(1));
    assert_eq!(engine.device_used(&device("b")), Some(1));
}

#[test]
fn three_moves_rotate_around_a_ring() {
    let engine = engine(
        SystemConfig::new()
            .with_device("a", 1)
            .with_device("b", 1)
            .with_device("c", 1)
            .with_component("x", "a")
            .with_component("y", "b")
            .with_component("z", "c"),
    );

    let handles = vec![
        spawn_transfer(&engine, TransferRequest::relocate("x", "a", "b")),
        spawn_transfer(&engine, TransferRequest::relocate("y", "b", "c")),
        spawn_transfer(&engine, TransferRequest::relocate("z", "c", "a")),
    ];
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    assert_eq!(engine.location_of(&component("x")), Some(device("b")));
    assert_eq!(engine.location_of(&component("y")), Some(device("c")));
    assert_eq!(engine.location_of(&component("z")), Some(device("a")));
    for id in ["a", "b", "c"] {
        assert_eq!(engine.device_used(&device(id)), Some(1));
    }
}

#[test]
fn exchange_runs_once_the_closing_move_arrives() {
    let engine = engine(
        SystemConfig::new()
            .with_device("a", 1)
            .with_device("b", 1)
            .with_component("x", "a")
            .with_component("y", "b"),
    );

    // y queues first and stays blocked: no cycle exists yet.
    let blocked = spawn_transfer(&engine, TransferRequest::relocate("y", "b", "a"));
    wait_until("y to join the waiting line", || {
        engine.is_in_flight(&component("y"))
    });
    settle();
    assert!(!blocked.is_finished(), "y proceeded without a counterpart");

    // x's request closes the 2-cycle and releases both.
    let closing = spawn_transfer(&engine, TransferRequest::relocate("x", "a", "b"));
    assert_eq!(closing.join().unwrap(), Ok(()));
    assert_eq!(blocked.join().unwrap(), Ok(()));

    assert_eq!(engine.location_of(&component("x")), Some(device("b")));
    assert_eq!(engine.location_of(&component("y")), Some(device("a")));
}

#[test]
fn repeated_swaps_keep_capacity_accounts_stable() {
    let engine = engine(
        SystemConfig::new()
            .with_device("a", 1)
            .with_device("b", 1)
            .with_component("x", "a")
            .with_component("y", "b"),
    );

    for round in 0..4 {
        let (x_to, y_to) = if round % 2 == 0 {
            (("x", "a", "b"), ("y", "b", "a"))
        } else {
            (("x", "b", "a"), ("y", "a", "b"))
        };
        let first = spawn_transfer(
            &engine,
            TransferRequest::relocate(x_to.0, x_to.1, x_to.2),
        );
        let second = spawn_transfer(
            &engine,
            TransferRequest::relocate(y_to.0, y_to.1, y_to.2),
        );
        assert_eq!(first.join().unwrap(), Ok(()));
        assert_eq!(second.join().unwrap(), Ok(()));

        assert_eq!(engine.device_used(&device("a")), Some(1));
        assert_eq!(engine.device_used(&device("b")), Some(1));
    }

    // Four swaps land everything back where it started.
    assert_eq!(engine.location_of(&component("x")), Some(device("a")));
    assert_eq!(engine.location_of(&component("y")), Some(device("b")));
}
