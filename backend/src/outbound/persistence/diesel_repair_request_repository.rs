//! PostgreSQL-backed `RepairRequestRepository` implementation using Diesel ORM.
//!
//! Rows are rebuilt into domain requests through `RepairRequest::from_draft`;
//! unknown status or contact method strings surface as query errors. Admin
//! mutations write one column plus `updated_at`, and status changes only
//! land while the row still holds the status they were checked against.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RepairRequestRepository, RepairRequestRepositoryError};
use crate::domain::{
    ContactMethod, DeviceType, RepairRequest, RepairRequestDraft, RepairStatus, TrackingToken,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRepairRequestRow, RepairRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::repair_requests;

const TRACKING_TOKEN_CONSTRAINT: &str = "repair_requests_tracking_token_key";

/// Diesel-backed implementation of the repair request repository port.
#[derive(Clone)]
pub struct DieselRepairRequestRepository {
    pool: DbPool,
}

impl DieselRepairRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RepairRequestRepositoryError {
    map_basic_pool_error(error, RepairRequestRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> RepairRequestRepositoryError {
    map_basic_diesel_error(
        error,
        RepairRequestRepositoryError::query,
        RepairRequestRepositoryError::connection,
    )
}

fn map_insert_error(error: DieselError) -> RepairRequestRepositoryError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(TRACKING_TOKEN_CONSTRAINT) =>
        {
            RepairRequestRepositoryError::duplicate_token()
        }
        _ => map_diesel_error(error),
    }
}

fn row_to_repair_request(
    row: RepairRequestRow,
) -> Result<RepairRequest, RepairRequestRepositoryError> {
    let status = row
        .status
        .parse::<RepairStatus>()
        .map_err(|err| RepairRequestRepositoryError::query(err.to_string()))?;
    let contact_method = row
        .contact_method
        .parse::<ContactMethod>()
        .map_err(|err| RepairRequestRepositoryError::query(err.to_string()))?;
    let tracking_token = TrackingToken::parse(&row.tracking_token)
        .map_err(|err| RepairRequestRepositoryError::query(err.to_string()))?;

    Ok(RepairRequest::from_draft(RepairRequestDraft {
        id: row.id,
        name: row.name,
        device_type: DeviceType::from_stored(row.device_type),
        problem: row.problem,
        contact_method,
        contact: row.contact,
        status,
        notes: row.notes,
        tracking_token,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl RepairRequestRepository for DieselRepairRequestRepository {
    async fn insert(&self, request: &RepairRequest) -> Result<(), RepairRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewRepairRequestRow {
            id: request.id(),
            name: request.name(),
            device_type: request.device_type().as_str(),
            problem: request.problem(),
            contact_method: request.contact_method().as_str(),
            contact: request.contact(),
            status: request.status().as_str(),
            notes: request.notes(),
            tracking_token: request.tracking_token().as_str(),
            created_at: request.created_at(),
            updated_at: request.updated_at(),
        };

        diesel::insert_into(repair_requests::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_insert_error)
    }

    async fn find_by_token(
        &self,
        token: &TrackingToken,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = repair_requests::table
            .filter(repair_requests::tracking_token.eq(token.as_str()))
            .select(RepairRequestRow::as_select())
            .first::<RepairRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_repair_request).transpose()
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = repair_requests::table
            .filter(repair_requests::id.eq(id))
            .select(RepairRequestRow::as_select())
            .first::<RepairRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_repair_request).transpose()
    }

    async fn list_all(&self) -> Result<Vec<RepairRequest>, RepairRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RepairRequestRow> = repair_requests::table
            .order((repair_requests::created_at.desc(), repair_requests::id.desc()))
            .select(RepairRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_repair_request).collect()
    }

    async fn update_status(
        &self,
        id: &Uuid,
        from: RepairStatus,
        to: RepairStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            repair_requests::table
                .filter(repair_requests::id.eq(id))
                .filter(repair_requests::status.eq(from.as_str())),
        )
        .set((
            repair_requests::status.eq(to.as_str()),
            repair_requests::updated_at.eq(updated_at),
        ))
        .returning(RepairRequestRow::as_returning())
        .get_result::<RepairRequestRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_repair_request).transpose()
    }

    async fn update_notes(
        &self,
        id: &Uuid,
        notes: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(repair_requests::table.filter(repair_requests::id.eq(id)))
            .set((
                repair_requests::notes.eq(notes),
                repair_requests::updated_at.eq(updated_at),
            ))
            .returning(RepairRequestRow::as_returning())
            .get_result::<RepairRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_repair_request).transpose()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn row(status: &str, contact_method: &str) -> RepairRequestRow {
        let now = Utc::now();
        RepairRequestRow {
            id: Uuid::new_v4(),
            name: "John Doe".to_owned(),
            device_type: "laptop".to_owned(),
            problem: "Screen flickers".to_owned(),
            contact_method: contact_method.to_owned(),
            contact: "+31612345678".to_owned(),
            status: status.to_owned(),
            notes: None,
            tracking_token: "0123456789abcdef0123456789abcdef".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn converts_valid_rows() {
        let request = row_to_repair_request(row("in-progress", "whatsapp")).expect("valid row");
        assert_eq!(request.status(), RepairStatus::InProgress);
        assert_eq!(request.contact_method(), ContactMethod::Whatsapp);
    }

    #[rstest]
    #[case("done", "email")]
    #[case("pending", "sms")]
    fn rejects_rows_with_unknown_enums(#[case] status: &str, #[case] contact_method: &str) {
        let err = row_to_repair_request(row(status, contact_method)).expect_err("invalid row");
        assert!(matches!(err, RepairRequestRepositoryError::Query { .. }));
    }

    #[rstest]
    fn maps_not_found_to_query_error() {
        let err = map_insert_error(DieselError::NotFound);
        assert!(matches!(err, RepairRequestRepositoryError::Query { .. }));
    }
}
