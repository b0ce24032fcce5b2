//! Wall-clock access for the convenience entry points.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::Millis;

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// A clock set before the epoch reads as 0; the buckets treat a
/// backward-moving clock as zero elapsed time, so this never needs to
/// fail.
pub(crate) fn now_millis() -> Millis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as Millis)
        .unwrap_or(0)
}
