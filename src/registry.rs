//! Route-to-bucket registry and the admission entry points.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::bucket::RouteBucket;
use crate::clock;
use crate::config::RouteConfig;
use crate::decision::{Decision, DecisionKind};
use crate::error::{ConfigError, TakeError};
use crate::types::{Millis, MILLIS_PER_MINUTE};

/// An owned set of independently rate-limited routes.
///
/// Built once at startup from an ordered list of [`RouteConfig`] entries;
/// the route set is fixed for the registry's lifetime. Lookups never
/// lock (only the per-bucket counters are guarded), so traffic on one
/// route never contends with another.
///
/// Registries are plain owned values: hosts and tests can hold several
/// side by side without interference.
///
/// # Example
///
/// ```rust
/// use route_guard_core::{RouteConfig, RouteRegistry};
///
/// let registry = RouteRegistry::new(vec![
///     RouteConfig::new("GET slowCall", 100, 30),
///     RouteConfig::new("GET fastCall", 2000, 2000),
/// ])?;
///
/// let decision = registry.take("GET fastCall")?;
/// assert!(decision.is_accepted());
/// assert_eq!(decision.remaining, 1999);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteRegistry {
    buckets: HashMap<String, RouteBucket>,
}

impl RouteRegistry {
    /// Builds a registry with one bucket per entry, anchored to the
    /// current wall clock.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when an entry has zero capacity, a rate outside
    /// `1..=60000` per minute, or repeats a route identifier. An invalid
    /// registry is unusable by design: the process should fail startup
    /// rather than serve with it.
    pub fn new(entries: impl IntoIterator<Item = RouteConfig>) -> Result<Self, ConfigError> {
        Self::new_at(entries, clock::now_millis())
    }

    /// Builds a registry with every bucket anchored to an explicit
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new`](RouteRegistry::new).
    pub fn new_at(
        entries: impl IntoIterator<Item = RouteConfig>,
        now: Millis,
    ) -> Result<Self, ConfigError> {
        let mut buckets = HashMap::new();
        for entry in entries {
            if entry.capacity == 0 {
                return Err(ConfigError::InvalidCapacity { route: entry.route });
            }
            if entry.sustained_rate_per_minute == 0
                || entry.sustained_rate_per_minute > MILLIS_PER_MINUTE
            {
                return Err(ConfigError::InvalidRate { route: entry.route });
            }
            if buckets.contains_key(&entry.route) {
                return Err(ConfigError::DuplicateRoute { route: entry.route });
            }
            let bucket = RouteBucket::new_at(entry.capacity, entry.sustained_rate_per_minute, now);
            buckets.insert(entry.route, bucket);
        }
        Ok(RouteRegistry { buckets })
    }

    /// Builds a registry from a JSON array of route descriptors, anchored
    /// to the current wall clock.
    ///
    /// Expected shape:
    /// `[{"route": "...", "capacity": N, "sustainedRatePerMinute": N}, ...]`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Malformed`] when the JSON does not parse, plus the
    /// validation errors of [`new`](RouteRegistry::new).
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        Self::from_json_at(src, clock::now_millis())
    }

    /// JSON variant of [`new_at`](RouteRegistry::new_at).
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_json`](RouteRegistry::from_json).
    pub fn from_json_at(src: &str, now: Millis) -> Result<Self, ConfigError> {
        let entries: Vec<RouteConfig> =
            serde_json::from_str(src).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        Self::new_at(entries, now)
    }

    /// Decides whether a request on `route` is admitted, reading the wall
    /// clock. See [`take_at`](RouteRegistry::take_at).
    ///
    /// # Errors
    ///
    /// [`TakeError::UnknownRoute`] when `route` has no configured bucket.
    pub fn take(&self, route: &str) -> Result<Decision, TakeError> {
        self.take_at(route, clock::now_millis())
    }

    /// Decides whether a request on `route` is admitted as of `now`.
    ///
    /// Refills the route's bucket for the elapsed time, then consumes one
    /// token. Exactly one bucket is touched; an unknown route touches
    /// none.
    ///
    /// # Errors
    ///
    /// [`TakeError::UnknownRoute`] when `route` has no configured bucket.
    /// The request is malformed from the limiter's point of view and maps
    /// to a client-error response at the HTTP boundary.
    pub fn take_at(&self, route: &str, now: Millis) -> Result<Decision, TakeError> {
        let bucket = self.buckets.get(route).ok_or_else(|| {
            warn!(route, "admission check for unknown route");
            TakeError::UnknownRoute {
                route: route.to_owned(),
            }
        })?;

        bucket.refill_at(now);
        let outcome = bucket.take();

        let decision = if outcome.granted {
            Decision {
                result: DecisionKind::Accept,
                remaining: outcome.remaining,
            }
        } else {
            Decision {
                result: DecisionKind::Reject,
                remaining: 0,
            }
        };
        debug!(route, result = ?decision.result, remaining = decision.remaining, "admission decision");
        Ok(decision)
    }

    /// Refills every bucket for the elapsed time, reading the wall clock.
    ///
    /// For hosts that prefer a periodic sweep over refill-on-take. Safe
    /// to combine with [`take`](RouteRegistry::take): refill is
    /// idempotent at a given instant, so redundant calls are no-ops.
    pub fn refill_all(&self) {
        self.refill_all_at(clock::now_millis());
    }

    /// Refills every bucket as of `now`.
    pub fn refill_all_at(&self, now: Millis) {
        for bucket in self.buckets.values() {
            bucket.refill_at(now);
        }
    }

    /// The bucket serving `route`, if configured. Read-only access for
    /// observability; admission goes through [`take`](RouteRegistry::take).
    pub fn bucket(&self, route: &str) -> Option<&RouteBucket> {
        self.buckets.get(route)
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no routes are configured.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterates over the configured route identifiers, in no particular
    /// order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}
