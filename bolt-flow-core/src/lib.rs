//! Bolt Flow Core — send-side DataChannel flow control.
//!
//! This crate is the canonical Rust core for the transport send path
//! (RUSTIFY-BROWSER-CORE-1 RB5). The TypeScript transport
//! (`bolt-transport-web / WebRTCService`) MUST exhibit identical
//! pause/resume and ordering behavior for identical channel event
//! sequences, verified by the contract tests in `tests/contracts/`.
//!
//! A DataChannel's internal send buffer grows without bound if the
//! application submits faster than the network drains. This crate
//! bounds that growth with watermark backpressure: the
//! [`BoundedFlowController`] refuses writes while the channel is
//! saturated, and the [`UnboundedFlowController`] queues writes in
//! application space and drains them in strict submission order.
//!
//! # Module Map
//!
//! | Module | TS Equivalent | Status |
//! |--------|---------------|--------|
//! | [`constants`] | `flow-control.ts` constants | Complete |
//! | [`errors`] | `errors.ts` (transport surface) | Complete |
//! | [`transport`] | `RTCDataChannel` (browser API) | Complete |
//! | [`bounded`] | `BoundedFlowController` | Complete |
//! | [`unbounded`] | `UnboundedFlowController` | Complete |
//! | [`mem`] | N/A (test support) | Complete |
//!
//! # Deliberate trades
//!
//! A permanently saturated channel (low water mark never reached)
//! leaves the bounded controller paused indefinitely and the unbounded
//! queue growing without bound. Neither timeouts nor caps are applied
//! here; both belong to higher layers.

/// Flow-control constants — values shared with TypeScript SDK.
pub mod constants;

/// Error types for flow-control operations.
pub mod errors;

/// Outbound DataChannel contract consumed by the controllers.
pub mod transport;

/// Rejecting controller — refuses writes while saturated.
pub mod bounded;

/// Queuing controller — accepts unlimited writes, drains FIFO.
pub mod unbounded;

/// In-memory channel for tests (MUST NOT be used in production).
pub mod mem;

mod signal;

pub use bounded::BoundedFlowController;
pub use constants::{DEFAULT_HIGH_WATER_MARK, DEFAULT_LOW_WATER_MARK};
pub use errors::{FlowError, TransportError};
pub use transport::{LowBufferCallback, OutboundDataChannel};
pub use unbounded::{UnboundedFlowController, WriteReceipt};
