//! Flow-control constants — canonical values shared with TypeScript SDK.
//!
//! Every constant here MUST exactly match the value in
//! `ts/bolt-transport-web/src/flow-control.ts`. Drift is detected by
//! `scripts/verify-constants.sh` in CI.

/// Default low water mark for the outbound DataChannel buffer (bytes).
///
/// When `bufferedAmount` drains to/below this value the channel fires
/// its buffered-amount-low event and paused writes resume. 256 KiB.
pub const DEFAULT_LOW_WATER_MARK: usize = 262_144;

/// Default high water mark for the outbound DataChannel buffer (bytes).
///
/// A write that leaves `bufferedAmount` at/above this value pauses
/// further writes until the low water mark is reached. 1 MiB.
pub const DEFAULT_HIGH_WATER_MARK: usize = 1_048_576;
