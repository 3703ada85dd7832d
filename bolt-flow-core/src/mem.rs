//! In-memory DataChannel stand-in for tests.
//!
//! Records every accepted payload, tracks a scripted buffered amount,
//! and fires the buffered-amount-low event on demand so tests control
//! exactly when the channel "drains". MUST NOT be used in production
//! code — there is no network behind it.

use std::sync::{Arc, Mutex};

use crate::errors::TransportError;
use crate::transport::{LowBufferCallback, OutboundDataChannel};

/// Scripted in-memory channel implementing [`OutboundDataChannel`].
#[derive(Default)]
pub struct MemoryChannel {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    sent: Vec<Vec<u8>>,
    buffered_amount: usize,
    low_threshold: usize,
    on_low: Option<Arc<dyn Fn() + Send + Sync>>,
    send_failure: Option<String>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every payload accepted so far, in send order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    /// Number of payloads accepted so far.
    pub fn sent_count(&self) -> usize {
        self.lock().sent.len()
    }

    /// The threshold most recently configured on this channel.
    pub fn buffered_amount_low_threshold(&self) -> usize {
        self.lock().low_threshold
    }

    /// Script the channel draining down to `remaining` buffered bytes,
    /// firing the buffered-amount-low event if the threshold is reached.
    pub fn drain_to(&self, remaining: usize) {
        let callback = {
            let mut inner = self.lock();
            inner.buffered_amount = remaining;
            (remaining <= inner.low_threshold)
                .then(|| inner.on_low.clone())
                .flatten()
        };
        // Invoke outside the lock: the handler flips controller state
        // and must be free to observe this channel.
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Fire the buffered-amount-low event regardless of the buffered
    /// amount — models spurious or duplicate channel events.
    pub fn fire_buffered_amount_low(&self) {
        let callback = self.lock().on_low.clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Make every subsequent `send` fail with the given message.
    pub fn fail_sends_with(&self, message: &str) {
        self.lock().send_failure = Some(message.to_string());
    }

    /// Let subsequent `send` calls succeed again.
    pub fn clear_send_failure(&self) {
        self.lock().send_failure = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("MemoryChannel lock poisoned")
    }
}

impl OutboundDataChannel for MemoryChannel {
    fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        let mut inner = self.lock();
        if let Some(message) = &inner.send_failure {
            return Err(TransportError(message.clone()));
        }
        inner.buffered_amount += payload.len();
        inner.sent.push(payload.to_vec());
        Ok(())
    }

    fn buffered_amount(&self) -> usize {
        self.lock().buffered_amount
    }

    fn set_buffered_amount_low_threshold(&self, threshold: usize) {
        self.lock().low_threshold = threshold;
    }

    fn on_buffered_amount_low(&self, callback: LowBufferCallback) {
        self.lock().on_low = Some(Arc::from(callback));
    }
}
