//! Admin accounts and the identity exposed to the dashboard.

use serde::Serialize;
use uuid::Uuid;

use super::{AdminPasswordHash, normalise_email};

/// Stored account allowed to sign in to the dashboard.
///
/// Signing in does not by itself grant access; `is_admin` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    id: Uuid,
    email: String,
    password_hash: AdminPasswordHash,
    is_admin: bool,
}

impl AdminAccount {
    /// Build an account; the email is normalised.
    pub fn new(id: Uuid, email: &str, password_hash: AdminPasswordHash, is_admin: bool) -> Self {
        Self {
            id,
            email: normalise_email(email),
            password_hash,
            is_admin,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    #[must_use]
    pub fn password_hash(&self) -> &AdminPasswordHash {
        &self.password_hash
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Identity safe to hand to clients.
    #[must_use]
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.id,
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Signed-in user as reported by `/admin/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}
