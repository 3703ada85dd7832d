//! Error types for bolt-flow-core.
//!
//! Maps to the TS error surface of `bolt-transport-web`: send failures
//! surface the DataChannel's own error, writes while paused surface a
//! contract-violation error. Rust uses two types instead of exception
//! subclassing: [`TransportError`] for channel failures, [`FlowError`]
//! for the controller surface.
//!
//! ## Parity gate (RB5)
//! Display formats must remain stable for interop diagnostics:
//! `"{Category} error: {message}"`.

/// Failure reported by the underlying DataChannel on `send`.
///
/// Carried unchanged through the flow controllers — never retried,
/// never swallowed. Retry policy, if any, belongs to a higher layer.
#[derive(Debug, thiserror::Error)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Unified error type for the bounded flow-control surface.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// `write` was called while the controller is paused.
    ///
    /// This is a wait-before-write contract violation by the caller,
    /// not a transient condition: fix the caller to await `ready()`
    /// before every write.
    #[error("Flow error: write attempted while paused")]
    NotReady,

    /// The underlying channel refused or failed the send.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
