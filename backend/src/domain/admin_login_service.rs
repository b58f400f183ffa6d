//! Admin sign-in backed by the admin account repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{AdminAccountRepository, AdminAccountRepositoryError, LoginService};
use crate::domain::{AdminAccount, AdminIdentity, AdminPasswordHash, Error, LoginCredentials};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_repository_error(error: AdminAccountRepositoryError) -> Error {
    match error {
        AdminAccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("admin account repository unavailable: {message}"))
        }
        AdminAccountRepositoryError::Query { message } => {
            Error::internal(format!("admin account repository error: {message}"))
        }
    }
}

/// Login service verifying Argon2id hashes stored with each account.
#[derive(Clone)]
pub struct AdminLoginService<R> {
    accounts: Arc<R>,
}

impl<R> AdminLoginService<R> {
    pub fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }
}

impl<R> AdminLoginService<R>
where
    R: AdminAccountRepository,
{
    /// Create or refresh the configured admin account.
    ///
    /// The account keeps its id across restarts so existing sessions stay
    /// valid; the hash and admin flag are replaced.
    pub async fn ensure_admin(
        &self,
        email: &str,
        password_hash: AdminPasswordHash,
    ) -> Result<AdminIdentity, Error> {
        let email = crate::domain::normalise_email(email);
        if email.is_empty() {
            return Err(Error::invalid_request("admin email must not be empty"));
        }
        let existing = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?;
        let id = existing.as_ref().map_or_else(Uuid::new_v4, AdminAccount::id);
        let account = AdminAccount::new(id, &email, password_hash, true);
        self.accounts
            .upsert(&account)
            .await
            .map_err(map_repository_error)?;
        info!(admin_id = %id, "admin account provisioned");
        Ok(account.identity())
    }
}

#[async_trait]
impl<R> LoginService for AdminLoginService<R>
where
    R: AdminAccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        let account = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let hash = account.password_hash().clone();
        let password = Zeroizing::new(credentials.password().to_owned());
        // Argon2 is CPU-bound; keep it off the request worker.
        let verified = tokio::task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(|err| {
                warn!(admin_id = %account.id(), error = %err, "stored password hash unusable");
                Error::internal("password verification failed")
            })?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.identity())
    }

    async fn identity(&self, account_id: &Uuid) -> Result<Option<AdminIdentity>, Error> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await
            .map_err(map_repository_error)?;
        Ok(account.as_ref().map(AdminAccount::identity))
    }
}
