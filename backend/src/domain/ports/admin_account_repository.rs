//! Port for admin account storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::AdminAccount;

use super::define_port_error;

define_port_error! {
    /// Errors raised by admin account repository adapters.
    pub enum AdminAccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "admin account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "admin account repository query failed: {message}",
    }
}

/// Port for reading and provisioning admin accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAccountRepository: Send + Sync {
    /// Find an account by normalised email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError>;

    /// Find an account by id.
    async fn find_by_id(&self, id: &Uuid)
    -> Result<Option<AdminAccount>, AdminAccountRepositoryError>;

    /// Insert the account, or replace the hash and admin flag of the account
    /// with the same email.
    async fn upsert(&self, account: &AdminAccount) -> Result<(), AdminAccountRepositoryError>;
}
