//! Readiness signal — the pause/resume cell behind the controllers.
//!
//! The TS transport models readiness as a replaceable one-shot promise:
//! a fresh pending promise on every ready→paused transition, resolved
//! once on paused→ready, with resolution guarded so duplicate
//! `bufferedamountlow` events are absorbed. Rust re-expresses that as a
//! single watch cell: `resume` is idempotent by construction, and each
//! `ready().await` observes the current pause epoch — the equivalent of
//! re-fetching the promise before every write.

use std::sync::Arc;

use tokio::sync::watch;

/// Idempotent ready/paused cell shared between a controller and the
/// channel's buffered-amount-low callback.
#[derive(Clone)]
pub(crate) struct ReadySignal {
    cell: Arc<watch::Sender<bool>>,
}

impl ReadySignal {
    /// New signal in the ready state.
    pub(crate) fn new_ready() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { cell: Arc::new(tx) }
    }

    pub(crate) fn is_ready(&self) -> bool {
        *self.cell.borrow()
    }

    /// Enter the paused state. Returns `true` if this call performed
    /// the ready→paused transition, `false` if already paused.
    pub(crate) fn pause(&self) -> bool {
        self.cell.send_replace(false)
    }

    /// Enter the ready state, waking every waiter. Returns `true` if
    /// this call performed the paused→ready transition, `false` if
    /// already ready (duplicate or spurious event — a no-op).
    pub(crate) fn resume(&self) -> bool {
        !self.cell.send_replace(true)
    }

    /// Wait until the signal is in the ready state.
    ///
    /// Completes immediately when already ready. The returned future is
    /// tied to the pause epoch current at await time; callers must call
    /// again after every write rather than caching it.
    pub(crate) async fn ready(&self) {
        let mut rx = self.cell.subscribe();
        while !*rx.borrow_and_update() {
            // The sender lives at least as long as `self`; a closed
            // channel here means the signal is being torn down, which
            // we treat as a wake rather than an error.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}
