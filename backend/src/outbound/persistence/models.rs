//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{admin_accounts, repair_requests};

/// Row struct for reading from the repair_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = repair_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RepairRequestRow {
    pub id: Uuid,
    pub name: String,
    pub device_type: String,
    pub problem: String,
    pub contact_method: String,
    pub contact: String,
    pub status: String,
    pub notes: Option<String>,
    pub tracking_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new repair requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = repair_requests)]
pub(crate) struct NewRepairRequestRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub device_type: &'a str,
    pub problem: &'a str,
    pub contact_method: &'a str,
    pub contact: &'a str,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub tracking_token: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the admin_accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminAccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Insertable struct for admin accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_accounts)]
pub(crate) struct NewAdminAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_admin: bool,
}
