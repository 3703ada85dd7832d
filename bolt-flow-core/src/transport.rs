//! Outbound DataChannel contract consumed by the flow controllers.
//!
//! Mirrors the browser `RTCDataChannel` surface the TS transport
//! (`bolt-transport-web / WebRTCService`) drives: `send`,
//! `bufferedAmount`, `bufferedAmountLowThreshold`, and the
//! `bufferedamountlow` event. The controllers never see connection
//! setup, ICE, or encryption — the channel handle is an opaque
//! collaborator owned by the caller.

use crate::errors::TransportError;

/// Handler invoked when the channel's buffered amount drains to/below
/// the configured low threshold.
pub type LowBufferCallback = Box<dyn Fn() + Send + Sync>;

/// Send side of an ordered, message-oriented DataChannel.
///
/// Implementations report `buffered_amount` as the number of bytes
/// accepted by `send` but not yet handed to the network. The
/// buffered-amount-low event fires whenever that count transitions
/// to/at/below the threshold set via
/// [`set_buffered_amount_low_threshold`](OutboundDataChannel::set_buffered_amount_low_threshold).
/// Fire frequency and exact timing are channel-defined; the event may
/// fire spuriously or more than once per transition, so handlers must
/// be idempotent.
pub trait OutboundDataChannel: Send + Sync {
    /// Queue one message on the channel.
    ///
    /// # Errors
    /// Returns [`TransportError`] if the channel refuses the send
    /// (closed, torn down, over an internal limit).
    fn send(&self, payload: &[u8]) -> Result<(), TransportError>;

    /// Bytes currently queued inside the channel for delivery.
    fn buffered_amount(&self) -> usize;

    /// Set the threshold at/below which the buffered-amount-low event
    /// fires.
    fn set_buffered_amount_low_threshold(&self, threshold: usize);

    /// Register the buffered-amount-low handler, replacing any
    /// previously registered one.
    ///
    /// The handler is invoked asynchronously, outside any `send` call
    /// stack, and may run on any thread.
    fn on_buffered_amount_low(&self, callback: LowBufferCallback);
}
