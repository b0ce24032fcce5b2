//! Per-route admission control built on token bucket budgets.
//!
//! Each configured route owns an independent token bucket: requests
//! consume tokens, and tokens are restored over wall-clock time at the
//! route's sustained rate, up to its burst capacity. A
//! [`RouteRegistry`] maps route identifiers to their buckets and turns
//! each check into an accept/reject [`Decision`].
//!
//! # Quick Start
//!
//! ```rust
//! use route_guard_core::{RouteConfig, RouteRegistry};
//!
//! let registry = RouteRegistry::new(vec![
//!     // 100-token burst, refilling 30 tokens per minute
//!     RouteConfig::new("GET slowCall", 100, 30),
//! ])?;
//!
//! match registry.take("GET slowCall") {
//!     Ok(decision) if decision.is_accepted() => {
//!         println!("admitted, {} tokens left", decision.remaining)
//!     }
//!     Ok(_) => println!("throttled"),
//!     Err(e) => println!("bad request: {e}"),
//! }
//! # Ok::<(), route_guard_core::ConfigError>(())
//! ```
//!
//! # Core Concepts
//!
//! ## Time Representation
//! All timestamps are wall-clock milliseconds since the Unix epoch
//! ([`Millis`]). Every operation that needs the current time comes in
//! two forms: a convenience wrapper that reads the system clock
//! ([`RouteRegistry::take`]) and an `_at` variant taking an explicit
//! timestamp ([`RouteRegistry::take_at`]) for hosts with their own time
//! source and for deterministic tests.
//!
//! ## Refill Strategies
//! Tokens are restored lazily by [`RouteRegistry::take`] before every
//! decision, so no background task is required. Hosts that want a
//! scheduled sweep instead (or in addition) can call
//! [`RouteRegistry::refill_all`] on a timer; refill is idempotent at a
//! given instant, so the two strategies combine safely.
//!
//! ## Error Handling
//! Configuration problems ([`ConfigError`]) surface once, at registry
//! construction, and should fail startup. At request time the only
//! failure is [`TakeError::UnknownRoute`] for an unconfigured route;
//! a throttled request is not an error but a [`Decision`] with
//! [`DecisionKind::Reject`].
//!
//! # Thread Safety
//!
//! A registry is meant to be shared across however many threads or tasks
//! serve requests. The route map is immutable after construction and
//! each bucket guards its own counters with its own mutex, so lookups
//! are lock-free and traffic on different routes never contends. Lock
//! hold times are a few arithmetic operations; the locks block rather
//! than fail.

pub mod bucket;
pub mod config;
pub mod decision;
pub mod error;
pub mod registry;
pub mod types;

mod clock;

pub use bucket::{RouteBucket, TakeOutcome};
pub use config::RouteConfig;
pub use decision::{Decision, DecisionKind};
pub use error::{ConfigError, TakeError};
pub use registry::RouteRegistry;
pub use types::{Millis, Tokens, MILLIS_PER_MINUTE};
