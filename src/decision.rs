//! Admission decisions returned by [`RouteRegistry::take`](crate::RouteRegistry::take).

use serde::Serialize;

use crate::types::Tokens;

/// Whether a request was admitted.
///
/// Serializes as the lowercase strings `"accept"` / `"reject"`, which is
/// the wire vocabulary HTTP-facing callers put in their responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    /// The bucket had a token; the request may proceed.
    Accept,
    /// The bucket was empty; the request should be throttled.
    Reject,
}

/// The outcome of one admission check against one route's bucket.
///
/// Serializes to the shape callers put on the wire:
///
/// ```
/// use route_guard_core::{Decision, DecisionKind};
///
/// let decision = Decision { result: DecisionKind::Accept, remaining: 7 };
/// let body = serde_json::to_string(&decision).unwrap();
/// assert_eq!(body, r#"{"result":"accept","remaining":7}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Accept or reject.
    pub result: DecisionKind,
    /// Tokens left in the route's bucket after this decision. Always 0
    /// on a rejection.
    pub remaining: Tokens,
}

impl Decision {
    /// True when the request was admitted.
    pub fn is_accepted(&self) -> bool {
        self.result == DecisionKind::Accept
    }
}
