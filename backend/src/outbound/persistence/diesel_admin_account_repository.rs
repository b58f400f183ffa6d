//! PostgreSQL-backed `AdminAccountRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AdminAccountRepository, AdminAccountRepositoryError};
use crate::domain::{AdminAccount, AdminPasswordHash};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AdminAccountRow, NewAdminAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::admin_accounts;

/// Diesel-backed implementation of the admin account repository port.
#[derive(Clone)]
pub struct DieselAdminAccountRepository {
    pool: DbPool,
}

impl DieselAdminAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdminAccountRepositoryError {
    map_basic_pool_error(error, AdminAccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AdminAccountRepositoryError {
    map_basic_diesel_error(
        error,
        AdminAccountRepositoryError::query,
        AdminAccountRepositoryError::connection,
    )
}

fn row_to_account(row: AdminAccountRow) -> Result<AdminAccount, AdminAccountRepositoryError> {
    let hash = AdminPasswordHash::parse(row.password_hash)
        .map_err(|err| AdminAccountRepositoryError::query(err.to_string()))?;
    Ok(AdminAccount::new(row.id, &row.email, hash, row.is_admin))
}

#[async_trait]
impl AdminAccountRepository for DieselAdminAccountRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = admin_accounts::table
            .filter(admin_accounts::email.eq(email))
            .select(AdminAccountRow::as_select())
            .first::<AdminAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = admin_accounts::table
            .filter(admin_accounts::id.eq(id))
            .select(AdminAccountRow::as_select())
            .first::<AdminAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn upsert(&self, account: &AdminAccount) -> Result<(), AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAdminAccountRow {
            id: account.id(),
            email: account.email(),
            password_hash: account.password_hash().as_str(),
            is_admin: account.is_admin(),
        };

        diesel::insert_into(admin_accounts::table)
            .values(&row)
            .on_conflict(admin_accounts::email)
            .do_update()
            .set((
                admin_accounts::password_hash.eq(excluded(admin_accounts::password_hash)),
                admin_accounts::is_admin.eq(excluded(admin_accounts::is_admin)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
