//! Contract: bounded controller watermark behavior.
//!
//! State machine under test: `Ready --write leaves buffered >= high-->
//! Paused --low event--> Ready`. Write while paused is an error, not a
//! transition.

use std::sync::Arc;
use std::time::Duration;

use bolt_flow_core::mem::MemoryChannel;
use bolt_flow_core::{BoundedFlowController, FlowError, OutboundDataChannel};

fn harness(low: usize, high: usize) -> (Arc<MemoryChannel>, BoundedFlowController<MemoryChannel>) {
    let channel = Arc::new(MemoryChannel::new());
    let controller = BoundedFlowController::with_watermarks(Arc::clone(&channel), low, high);
    (channel, controller)
}

// ─── Ready path ────────────────────────────────────────────────────────

#[test]
fn writes_below_high_water_mark_always_succeed() {
    let (channel, controller) = harness(2, 100);
    for message in [&b"m1"[..], b"m2", b"m3", b"m4"] {
        controller
            .write(message)
            .expect("below the high water mark every write must succeed");
        assert!(controller.is_ready(), "readiness must stay resolved");
    }
    assert_eq!(channel.sent_count(), 4);
}

#[tokio::test]
async fn ready_resolves_without_any_event_while_below_watermark() {
    let (_channel, controller) = harness(2, 100);
    controller.write(b"small").unwrap();
    tokio::time::timeout(Duration::from_millis(100), controller.ready())
        .await
        .expect("ready() must not require a low event while below the watermark");
}

// ─── Pause transition ──────────────────────────────────────────────────

#[test]
fn crossing_high_water_mark_pauses_immediately() {
    let (channel, controller) = harness(2, 10);
    controller.write(b"twelve bytes").unwrap();
    assert_eq!(channel.sent_count(), 1, "the crossing write itself succeeds");
    assert!(!controller.is_ready(), "readiness must be withdrawn at once");
}

#[test]
fn write_before_low_event_fails_with_not_ready() {
    let (channel, controller) = harness(2, 10);
    controller.write(b"twelve bytes").unwrap();

    let err = controller.write(b"rejected").unwrap_err();
    assert!(
        matches!(err, FlowError::NotReady),
        "write while paused must fail NotReady, got: {err}"
    );
    assert_eq!(
        channel.sent_count(),
        1,
        "a refused write must never reach the channel"
    );
}

// ─── Resume transition ─────────────────────────────────────────────────

#[test]
fn single_low_event_resumes() {
    let (channel, controller) = harness(2, 10);
    controller.write(b"twelve bytes").unwrap();
    assert!(!controller.is_ready());

    channel.drain_to(1);
    assert!(controller.is_ready(), "low event while paused must resume");
}

#[test]
fn duplicate_low_event_is_absorbed() {
    let (channel, controller) = harness(2, 10);
    controller.write(b"twelve bytes").unwrap();

    channel.drain_to(1);
    assert!(controller.is_ready());

    // Channels may re-fire; while ready this must be a silent no-op.
    channel.fire_buffered_amount_low();
    channel.fire_buffered_amount_low();
    assert!(controller.is_ready());
    controller.write(b"next").unwrap();
}

#[test]
fn full_saturate_drain_write_cycle() {
    // High = 10, low = 2. A 12-byte write saturates
    // (bufferedAmount 12); the channel later reports 1 and fires the
    // event; a 3-byte write then succeeds.
    let (channel, controller) = harness(2, 10);

    controller.write(b"twelve bytes").unwrap();
    assert_eq!(channel.buffered_amount(), 12);
    assert!(!controller.is_ready());

    channel.drain_to(1);
    assert!(controller.is_ready());

    controller.write(b"abc").unwrap();
    assert_eq!(
        channel.sent(),
        vec![b"twelve bytes".to_vec(), b"abc".to_vec()]
    );
}

#[tokio::test]
async fn ready_wakes_on_low_event() {
    let (channel, controller) = harness(2, 10);
    controller.write(b"twelve bytes").unwrap();

    let pended = tokio::time::timeout(Duration::from_millis(20), controller.ready()).await;
    assert!(pended.is_err(), "ready() must pend while paused");

    channel.drain_to(0);
    tokio::time::timeout(Duration::from_millis(100), controller.ready())
        .await
        .expect("ready() must resolve after the low event");
    controller.write(b"after resume").unwrap();
}

// ─── Transport failure ─────────────────────────────────────────────────

#[test]
fn transport_failure_propagates_and_leaves_state_alone() {
    let (channel, controller) = harness(2, 10);
    channel.fail_sends_with("channel closed");

    let err = controller.write(b"payload").unwrap_err();
    assert!(matches!(err, FlowError::Transport(_)));
    assert_eq!(err.to_string(), "Transport error: channel closed");
    assert!(
        controller.is_ready(),
        "a failed send buffered nothing; readiness must be unchanged"
    );
}

// ─── Construction ──────────────────────────────────────────────────────

#[test]
fn construction_wires_the_low_threshold() {
    let (channel, controller) = harness(2, 10);
    assert_eq!(channel.buffered_amount_low_threshold(), 2);
    assert_eq!(controller.low_water_mark(), 2);
    assert_eq!(controller.high_water_mark(), 10);
}

#[test]
fn default_construction_uses_canonical_watermarks() {
    let channel = Arc::new(MemoryChannel::new());
    let controller = BoundedFlowController::new(Arc::clone(&channel));
    assert_eq!(
        controller.low_water_mark(),
        bolt_flow_core::DEFAULT_LOW_WATER_MARK
    );
    assert_eq!(
        controller.high_water_mark(),
        bolt_flow_core::DEFAULT_HIGH_WATER_MARK
    );
    assert_eq!(
        channel.buffered_amount_low_threshold(),
        bolt_flow_core::DEFAULT_LOW_WATER_MARK
    );
}
