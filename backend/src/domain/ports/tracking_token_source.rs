//! Port supplying fresh tracking tokens.

use crate::domain::TrackingToken;

/// Source of new tracking tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TrackingTokenSource: Send + Sync {
    /// Produce a token that has not been handed out before with
    /// overwhelming probability.
    fn next_token(&self) -> TrackingToken;
}

/// Tokens drawn from operating-system randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngTokenSource;

impl TrackingTokenSource for OsRngTokenSource {
    fn next_token(&self) -> TrackingToken {
        TrackingToken::generate()
    }
}
