//! Tracking tokens handed to customers.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// Number of random bytes behind a generated token.
pub const TRACKING_TOKEN_BYTES: usize = 16;

/// Opaque bearer token that grants read access to one repair request.
///
/// Generated tokens are 32 lowercase hexadecimal characters. Tokens parsed
/// from a URL are only required to be non-blank; a malformed token simply
/// never matches a stored record.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingToken(String);

/// Error returned for a blank tracking token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tracking token must not be blank")]
pub struct EmptyTrackingToken;

impl TrackingToken {
    /// Draw a fresh token from operating-system randomness.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TRACKING_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Accept a token received from a client.
    ///
    /// Whitespace-only input is rejected. Anything else is kept exactly as
    /// received, so a padded token never matches a stored one.
    ///
    /// # Examples
    /// ```
    /// use techfix::domain::TrackingToken;
    ///
    /// assert!(TrackingToken::parse("  ").is_err());
    /// let token = TrackingToken::parse(" abc123 ").unwrap();
    /// assert_eq!(token.as_str(), " abc123 ");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, EmptyTrackingToken> {
        if raw.trim().is_empty() {
            return Err(EmptyTrackingToken);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TrackingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens are bearer secrets; keep them out of debug logs.
impl fmt::Debug for TrackingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TrackingToken(..)")
    }
}
