//! Shared type aliases for timestamps and token counts.
//!
//! All time values in this crate are wall-clock milliseconds since the
//! Unix epoch, and all token counts are unsigned integers. The aliases
//! exist so signatures say which of the two a bare `u64` means.

/// Wall-clock timestamp or duration, in milliseconds.
pub type Millis = u64;

/// A count of admission tokens.
pub type Tokens = u64;

/// Milliseconds in one minute, the unit sustained rates are expressed in.
pub const MILLIS_PER_MINUTE: Millis = 60_000;
