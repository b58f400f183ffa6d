//! Port for repair request persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{RepairRequest, RepairStatus, TrackingToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by repair request repository adapters.
    pub enum RepairRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "repair request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "repair request repository query failed: {message}",
        /// Another record already holds the tracking token.
        DuplicateToken =>
            "tracking token already assigned to another repair request",
    }
}

/// Port for storing and reading repair requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairRequestRepository: Send + Sync {
    /// Insert a new request. Fails with `DuplicateToken` when the tracking
    /// token is already taken.
    async fn insert(&self, request: &RepairRequest) -> Result<(), RepairRequestRepositoryError>;

    /// Look up a request by its tracking token.
    async fn find_by_token(
        &self,
        token: &TrackingToken,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError>;

    /// Look up a request by id.
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError>;

    /// Every stored request, in no guaranteed order.
    async fn list_all(&self) -> Result<Vec<RepairRequest>, RepairRequestRepositoryError>;

    /// Move the request from `from` to `to` and set `updated_at`.
    ///
    /// The write only applies while the stored status still equals `from`;
    /// no other column is touched. Returns the stored request after the
    /// write, or `None` when the id is unknown or the status has moved on.
    async fn update_status(
        &self,
        id: &Uuid,
        from: RepairStatus,
        to: RepairStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError>;

    /// Replace `notes` (clearing them on `None`) and set `updated_at`,
    /// leaving every other column alone. Returns `None` for an unknown id.
    async fn update_notes(
        &self,
        id: &Uuid,
        notes: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRepairRequestRepository;

#[async_trait]
impl RepairRequestRepository for FixtureRepairRequestRepository {
    async fn insert(&self, _request: &RepairRequest) -> Result<(), RepairRequestRepositoryError> {
        Ok(())
    }

    async fn find_by_token(
        &self,
        _token: &TrackingToken,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(
        &self,
        _id: &Uuid,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<RepairRequest>, RepairRequestRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_status(
        &self,
        _id: &Uuid,
        _from: RepairStatus,
        _to: RepairStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        Ok(None)
    }

    async fn update_notes(
        &self,
        _id: &Uuid,
        _notes: Option<String>,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        Ok(None)
    }
}
