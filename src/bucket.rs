//! Token bucket for a single route.

use parking_lot::Mutex;
use tracing::trace;

use crate::clock;
use crate::types::{Millis, Tokens, MILLIS_PER_MINUTE};

/// One route's admission budget.
///
/// The bucket starts full at `capacity` tokens and accrues one token per
/// `refill_interval` milliseconds of elapsed wall-clock time, never
/// exceeding `capacity`. Requests consume one token each via [`take`];
/// an empty bucket rejects without going negative.
///
/// # Algorithm Behavior
///
/// - The bucket starts full with `capacity` tokens
/// - [`refill_at`] adds one token per elapsed refill interval, capped at
///   capacity
/// - The refill timestamp only advances when tokens are actually added,
///   so partial progress toward the next token is kept across calls that
///   arrive faster than the refill interval
/// - [`take`] removes exactly one token, or reports a rejection when the
///   bucket is empty
///
/// # Example
///
/// ```rust
/// use route_guard_core::RouteBucket;
///
/// // Capacity 2, sustained 2000 tokens/minute (one token per 30 ms)
/// let bucket = RouteBucket::new_at(2, 2000, 0);
///
/// assert!(bucket.take().granted);
/// assert!(bucket.take().granted);
/// assert!(!bucket.take().granted); // empty, rejected
///
/// // 60 ms later, two intervals have passed
/// bucket.refill_at(60);
/// assert_eq!(bucket.available(), 2);
/// ```
///
/// [`refill_at`]: RouteBucket::refill_at
/// [`take`]: RouteBucket::take
#[derive(Debug)]
pub struct RouteBucket {
    /// Maximum and initial token count.
    capacity: Tokens,
    /// Milliseconds required to accrue one token.
    refill_interval: Millis,
    /// Interval-aligned epoch the bucket's timeline is anchored to,
    /// fixed at creation.
    window_origin: Millis,
    /// Mutable counters, guarded together so a refill and a take can
    /// never interleave mid-update.
    state: Mutex<BucketState>,
}

/// Counters guarded by the bucket's mutex.
#[derive(Debug)]
struct BucketState {
    /// Currently available tokens, always in `0..=capacity`.
    count: Tokens,
    /// Interval-aligned time tokens were last added (or the bucket was
    /// last seen full).
    last_refill: Millis,
}

/// Result of a single [`RouteBucket::take`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeOutcome {
    /// Whether a token was consumed.
    pub granted: bool,
    /// Tokens left after the call. Always 0 on a denial.
    pub remaining: Tokens,
}

impl RouteBucket {
    /// Creates a bucket anchored to the current wall clock.
    ///
    /// `sustained_rate_per_minute` is converted to a per-token refill
    /// interval of `60000 / rate` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or the rate is outside `1..=60000`.
    /// [`RouteRegistry`](crate::RouteRegistry) validates entries before
    /// constructing buckets and surfaces these as
    /// [`ConfigError`](crate::ConfigError) instead.
    pub fn new(capacity: Tokens, sustained_rate_per_minute: u64) -> Self {
        Self::new_at(capacity, sustained_rate_per_minute, clock::now_millis())
    }

    /// Creates a bucket anchored to an explicit timestamp.
    ///
    /// # Panics
    ///
    /// Same conditions as [`new`](RouteBucket::new).
    pub fn new_at(capacity: Tokens, sustained_rate_per_minute: u64, now: Millis) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        assert!(
            sustained_rate_per_minute > 0,
            "sustained rate must be greater than 0"
        );
        assert!(
            sustained_rate_per_minute <= MILLIS_PER_MINUTE,
            "sustained rate must not exceed one token per millisecond"
        );

        let refill_interval = MILLIS_PER_MINUTE / sustained_rate_per_minute;
        let window_origin = now - now % refill_interval;
        RouteBucket {
            capacity,
            refill_interval,
            window_origin,
            state: Mutex::new(BucketState {
                count: capacity, // bucket starts full
                last_refill: window_origin,
            }),
        }
    }

    /// Restores tokens accrued since the last refill, reading the wall
    /// clock. See [`refill_at`](RouteBucket::refill_at).
    pub fn refill(&self) {
        self.refill_at(clock::now_millis());
    }

    /// Restores tokens accrued as of `now`.
    ///
    /// Adds one token per whole refill interval elapsed since the last
    /// applied refill, capped at capacity. When no whole interval has
    /// elapsed the refill timestamp is left untouched, so the partial
    /// interval still counts toward the next token, so polling faster
    /// than the refill interval loses nothing. A full bucket only realigns its
    /// timestamp to the current interval boundary.
    ///
    /// Calling redundantly is safe: a second call at the same `now`
    /// computes a zero increment and changes nothing. A `now` earlier
    /// than the last applied refill reads as zero elapsed time. Never
    /// fails.
    pub fn refill_at(&self, now: Millis) {
        let mut state = self.state.lock();

        if state.count == self.capacity {
            // Nothing to add; keep the window anchored to the present so
            // the next drain doesn't back-date its elapsed time.
            state.last_refill = now - now % self.refill_interval;
            return;
        }

        let elapsed = now.saturating_sub(state.last_refill);
        let increment = (elapsed / self.refill_interval).min(self.capacity - state.count);

        if increment > 0 {
            state.last_refill = now - now % self.refill_interval;
            state.count += increment;
            trace!(
                now,
                elapsed,
                increment,
                count = state.count,
                "refilled route bucket"
            );
        }
    }

    /// Consumes one token if any is available.
    ///
    /// Returns `granted: true` with the post-decrement count, or
    /// `granted: false` with `remaining: 0` when the bucket is empty.
    /// The count never goes below zero.
    pub fn take(&self) -> TakeOutcome {
        let mut state = self.state.lock();

        if state.count == 0 {
            TakeOutcome {
                granted: false,
                remaining: 0,
            }
        } else {
            state.count -= 1;
            TakeOutcome {
                granted: true,
                remaining: state.count,
            }
        }
    }

    /// Currently available tokens, without triggering a refill.
    pub fn available(&self) -> Tokens {
        self.state.lock().count
    }

    /// Maximum (and initial) token count.
    pub fn capacity(&self) -> Tokens {
        self.capacity
    }

    /// Milliseconds required to accrue one token.
    pub fn refill_interval(&self) -> Millis {
        self.refill_interval
    }

    /// The interval-aligned epoch fixed at creation.
    pub fn window_origin(&self) -> Millis {
        self.window_origin
    }

    /// The interval-aligned time tokens were last added, or the bucket
    /// was last observed full.
    pub fn last_refill(&self) -> Millis {
        self.state.lock().last_refill
    }
}
