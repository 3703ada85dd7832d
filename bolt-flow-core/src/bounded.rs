//! Bounded flow controller — rejecting variant.
//!
//! Wraps one outbound DataChannel and enforces the wait-before-write
//! protocol: a write that leaves the channel's buffered amount at/above
//! the high water mark pauses the controller, and the channel's
//! buffered-amount-low event (wired to the low water mark at
//! construction) resumes it.
//!
//! # Parity
//! TS equivalent: `BoundedFlowController` in `bolt-transport-web`.
//! Same state machine, same watermark semantics; the TS readiness
//! promise becomes the async [`ready`](BoundedFlowController::ready)
//! method here.

use std::sync::Arc;

use crate::constants::{DEFAULT_HIGH_WATER_MARK, DEFAULT_LOW_WATER_MARK};
use crate::errors::FlowError;
use crate::signal::ReadySignal;
use crate::transport::OutboundDataChannel;

/// Flow controller that refuses writes while the channel is saturated.
///
/// # Contract
///
/// - **Initial state**: ready.
/// - **Pause**: a successful `write` that observes
///   `buffered_amount() >= high_water_mark` transitions to paused.
/// - **Resume**: the channel's buffered-amount-low event transitions
///   back to ready; duplicate or spurious events are no-ops.
/// - **Protocol**: callers await [`ready`](Self::ready) before *every*
///   [`write`](Self::write); a write while paused is refused with
///   [`FlowError::NotReady`].
/// - **Ordering**: one send per call, executed immediately when
///   permitted. No ordering guarantee beyond that — serialization
///   across writers is the unbounded controller's job.
pub struct BoundedFlowController<C: OutboundDataChannel> {
    channel: Arc<C>,
    signal: ReadySignal,
    low_water_mark: usize,
    high_water_mark: usize,
}

impl<C: OutboundDataChannel> BoundedFlowController<C> {
    /// Wrap `channel` with the default watermarks
    /// ([`DEFAULT_LOW_WATER_MARK`], [`DEFAULT_HIGH_WATER_MARK`]).
    pub fn new(channel: Arc<C>) -> Self {
        Self::with_watermarks(channel, DEFAULT_LOW_WATER_MARK, DEFAULT_HIGH_WATER_MARK)
    }

    /// Wrap `channel` with explicit watermarks (bytes).
    ///
    /// Configures the channel's buffered-amount-low threshold to
    /// `low_water_mark` and registers the resume handler.
    ///
    /// Callers MUST keep `low_water_mark < high_water_mark`. The
    /// contract is not validated here: a reversed band risks permanent
    /// pause (low never reached) or pause/resume thrash, and is a
    /// caller bug.
    pub fn with_watermarks(channel: Arc<C>, low_water_mark: usize, high_water_mark: usize) -> Self {
        let signal = ReadySignal::new_ready();

        channel.set_buffered_amount_low_threshold(low_water_mark);
        let resume = signal.clone();
        channel.on_buffered_amount_low(Box::new(move || {
            if resume.resume() {
                tracing::trace!("buffered amount low, resuming writes");
            }
        }));

        Self {
            channel,
            signal,
            low_water_mark,
            high_water_mark,
        }
    }

    /// Wait until the controller is ready to accept a write.
    ///
    /// Completes immediately while ready. The wait is tied to the
    /// current pause epoch — await again after every `write` instead of
    /// holding the future across writes.
    pub async fn ready(&self) {
        self.signal.ready().await;
    }

    /// Current readiness, without waiting.
    pub fn is_ready(&self) -> bool {
        self.signal.is_ready()
    }

    /// Send one message through the channel.
    ///
    /// # Errors
    /// - [`FlowError::NotReady`] if called while paused — the caller
    ///   skipped the [`ready`](Self::ready) wait. Fatal to the calling
    ///   code path; never retried here.
    /// - [`FlowError::Transport`] if the channel refuses the send;
    ///   propagated unchanged.
    pub fn write(&self, payload: &[u8]) -> Result<(), FlowError> {
        if !self.signal.is_ready() {
            return Err(FlowError::NotReady);
        }

        self.channel.send(payload)?;

        let buffered = self.channel.buffered_amount();
        if buffered >= self.high_water_mark && self.signal.pause() {
            tracing::debug!(
                buffered,
                high_water_mark = self.high_water_mark,
                "send budget exhausted, pausing writes"
            );
        }
        Ok(())
    }

    /// Low water mark configured at construction (bytes).
    pub fn low_water_mark(&self) -> usize {
        self.low_water_mark
    }

    /// High water mark configured at construction (bytes).
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }
}
