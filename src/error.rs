//! Error types for registry construction and per-request admission.
//!
//! The two enums split by call path: [`ConfigError`] is raised once at
//! startup and is fatal (the process must not serve with an invalid
//! registry), while [`TakeError`] is raised per request and is
//! recoverable (the caller maps it to a client-error response).

use thiserror::Error;

/// Rejected route configuration, detected while building a registry.
///
/// Every variant names the offending route so startup logs can point at
/// the exact config entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `capacity` was zero. A bucket that can never hold a token admits
    /// nothing, which is a misconfiguration rather than a policy.
    #[error("route {route:?}: capacity must be greater than zero")]
    InvalidCapacity {
        /// The route identifier from the rejected entry.
        route: String,
    },

    /// `sustainedRatePerMinute` was zero or too large to express on a
    /// millisecond timeline (above 60000 per minute).
    #[error("route {route:?}: sustained rate must be between 1 and 60000 per minute")]
    InvalidRate {
        /// The route identifier from the rejected entry.
        route: String,
    },

    /// The same route identifier appeared in more than one entry.
    #[error("route {route:?} is configured more than once")]
    DuplicateRoute {
        /// The repeated route identifier.
        route: String,
    },

    /// The JSON route list could not be parsed at all.
    #[error("malformed route configuration: {0}")]
    Malformed(String),
}

/// Per-request admission failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TakeError {
    /// The requested route has no configured bucket. The request is
    /// malformed from the limiter's point of view; no bucket state is
    /// touched.
    #[error("unknown route {route:?}")]
    UnknownRoute {
        /// The route identifier that failed to resolve.
        route: String,
    },
}
