//! Driving port for admin sign-in.
//!
//! Inbound adapters authenticate credentials and resolve the signed-in
//! identity through this port without touching the account store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AdminIdentity, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the signed-in identity.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error>;

    /// Identity for a session's account id, if the account still exists.
    async fn identity(&self, account_id: &Uuid) -> Result<Option<AdminIdentity>, Error>;
}
