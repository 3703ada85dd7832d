//! Unbounded flow controller — queuing variant.
//!
//! Accepts writes unconditionally and drains them to the channel in
//! strict submission order as capacity frees up. Built by composition
//! over [`BoundedFlowController`]: a single worker task owns the
//! bounded controller, awaits readiness before each delegated write,
//! and attempts exactly one queued write at a time. The TS promise
//! chain becomes the queue plus that single-flight worker; the ordering
//! guarantee is the same.
//!
//! Unsent messages accumulate in application space instead of the
//! channel's own buffer — the intentional trade. No cap is applied
//! here; callers wanting one can gate on
//! [`pending_writes`](UnboundedFlowController::pending_writes).
//!
//! # Parity
//! TS equivalent: `UnboundedFlowController` in `bolt-transport-web`
//! (there a subclass; composition here — it only needs `ready`/`write`).

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::{mpsc, oneshot};

use crate::bounded::BoundedFlowController;
use crate::constants::{DEFAULT_HIGH_WATER_MARK, DEFAULT_LOW_WATER_MARK};
use crate::errors::{FlowError, TransportError};
use crate::transport::OutboundDataChannel;

struct QueuedWrite {
    payload: Vec<u8>,
    done: oneshot::Sender<Result<(), TransportError>>,
}

/// Flow controller whose `write` never fails and never blocks.
///
/// # Contract
///
/// - **Ordering**: payloads reach the channel's `send` in exactly the
///   order `write` was called — no reordering, no parallel dispatch.
/// - **Single-flight**: a queued write is attempted only after every
///   previously submitted write has completed, readiness wait included.
/// - **Failure isolation**: a `TransportError` resolves that write's
///   [`WriteReceipt`] and nothing else; the queue keeps accepting and
///   draining subsequent writes.
/// - **No withdrawal**: once queued, a write cannot be cancelled.
///   Dropping the controller closes the queue; already-queued writes
///   still drain before the worker exits.
pub struct UnboundedFlowController<C: OutboundDataChannel + 'static> {
    bounded: Arc<BoundedFlowController<C>>,
    queue: mpsc::UnboundedSender<QueuedWrite>,
    pending: Arc<AtomicUsize>,
}

impl<C: OutboundDataChannel + 'static> UnboundedFlowController<C> {
    /// Wrap `channel` with the default watermarks
    /// ([`DEFAULT_LOW_WATER_MARK`], [`DEFAULT_HIGH_WATER_MARK`]).
    ///
    /// Must be called inside a Tokio runtime: the drain worker is
    /// spawned onto it.
    pub fn new(channel: Arc<C>) -> Self {
        Self::with_watermarks(channel, DEFAULT_LOW_WATER_MARK, DEFAULT_HIGH_WATER_MARK)
    }

    /// Wrap `channel` with explicit watermarks (bytes). See
    /// [`BoundedFlowController::with_watermarks`] for the watermark
    /// contract.
    pub fn with_watermarks(channel: Arc<C>, low_water_mark: usize, high_water_mark: usize) -> Self {
        let bounded = Arc::new(BoundedFlowController::with_watermarks(
            channel,
            low_water_mark,
            high_water_mark,
        ));
        let (queue, rx) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));

        tokio::spawn(drain_queue(Arc::clone(&bounded), rx, Arc::clone(&pending)));

        Self {
            bounded,
            queue,
            pending,
        }
    }

    /// Queue one message for delivery. Returns immediately; never fails.
    ///
    /// The returned [`WriteReceipt`] resolves once this message's send
    /// has been attempted: `Ok(())` on success, `Err(TransportError)`
    /// if the channel refused it. Dropping the receipt is allowed —
    /// the write stays queued and is still attempted.
    pub fn write(&self, payload: Vec<u8>) -> WriteReceipt {
        let (done, receipt) = oneshot::channel();
        self.pending.fetch_add(1, Ordering::SeqCst);
        let queued = QueuedWrite { payload, done };
        if let Err(mpsc::error::SendError(rejected)) = self.queue.send(queued) {
            // The worker outlives this handle unless its runtime was
            // torn down; surface that as a transport-level failure.
            self.pending.fetch_sub(1, Ordering::SeqCst);
            let _ = rejected
                .done
                .send(Err(TransportError("flow worker stopped".into())));
        }
        WriteReceipt { done: receipt }
    }

    /// Writes accepted but not yet completed by the drain worker.
    pub fn pending_writes(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Current readiness of the underlying bounded controller.
    ///
    /// Purely informational — `write` accepts regardless.
    pub fn is_ready(&self) -> bool {
        self.bounded.is_ready()
    }
}

/// Single drain worker: strict FIFO, one in-flight write at a time.
async fn drain_queue<C: OutboundDataChannel>(
    bounded: Arc<BoundedFlowController<C>>,
    mut rx: mpsc::UnboundedReceiver<QueuedWrite>,
    pending: Arc<AtomicUsize>,
) {
    while let Some(write) = rx.recv().await {
        bounded.ready().await;
        let outcome = bounded.write(&write.payload).map_err(|err| match err {
            FlowError::Transport(transport) => transport,
            // Unreachable in practice: this worker is the only writer
            // and has just observed readiness, and nothing else can
            // pause the controller between that wait and the write.
            FlowError::NotReady => TransportError("write refused while paused".into()),
        });
        pending.fetch_sub(1, Ordering::SeqCst);

        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "queued write failed");
        }
        // Receipt may have been dropped (fire-and-forget caller).
        let _ = write.done.send(outcome);
    }
    tracing::trace!("write queue closed, flow worker exiting");
}

/// Completion future for one queued write.
///
/// Resolves when the write has been attempted against the channel.
/// Dropping it detaches from the outcome without cancelling the write.
#[derive(Debug)]
pub struct WriteReceipt {
    done: oneshot::Receiver<Result<(), TransportError>>,
}

impl Future for WriteReceipt {
    type Output = Result<(), TransportError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.done).poll(cx).map(|outcome| match outcome {
            Ok(result) => result,
            // Worker gone without reporting: runtime shutdown.
            Err(_) => Err(TransportError("flow worker stopped".into())),
        })
    }
}
