//! Route configuration entries.
//!
//! A registry is built from an ordered list of [`RouteConfig`] values.
//! Where the list comes from (a literal, a file, the environment) is the
//! host application's concern; this crate only defines the entry shape
//! and, in [`RouteRegistry::from_json`](crate::RouteRegistry::from_json),
//! accepts the JSON array form directly:
//!
//! ```json
//! [
//!   {"route": "GET slowCall", "capacity": 100, "sustainedRatePerMinute": 30},
//!   {"route": "GET fastCall", "capacity": 2000, "sustainedRatePerMinute": 2000}
//! ]
//! ```

use serde::Deserialize;

use crate::types::Tokens;

/// One route's admission budget: burst capacity plus steady-state rate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    /// Route identifier, e.g. `"GET slowCall"`. Must be unique within a
    /// registry.
    pub route: String,
    /// Maximum tokens the bucket holds; also its initial fill.
    pub capacity: Tokens,
    /// Steady-state replenishment, in tokens per minute. Must be between
    /// 1 and 60000 so one token maps to a whole number of milliseconds.
    pub sustained_rate_per_minute: u64,
}

impl RouteConfig {
    /// Creates an entry from its parts.
    pub fn new(route: impl Into<String>, capacity: Tokens, sustained_rate_per_minute: u64) -> Self {
        RouteConfig {
            route: route.into(),
            capacity,
            sustained_rate_per_minute,
        }
    }
}
