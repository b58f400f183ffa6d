//! Driving port for repair request mutations.
//!
//! Customers submit requests; admins move them through the lifecycle and
//! keep private notes. Every mutation returns the stored state after the
//! write so callers never have to patch a local copy themselves.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Error, RepairRequest, RepairRequestSubmission, RepairStatus, TrackingToken,
};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedRepairRequest {
    pub id: Uuid,
    pub tracking_token: TrackingToken,
    pub tracking_url: String,
    pub status: RepairStatus,
}

/// Request to move a repair request to a new status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRepairStatusRequest {
    pub id: Uuid,
    pub status: RepairStatus,
}

/// Request to replace the admin notes of a repair request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRepairNotesRequest {
    pub id: Uuid,
    pub notes: String,
}

/// Driving port for repair request write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairRequestCommand: Send + Sync {
    /// Validate a submission and store it as a new pending request.
    ///
    /// Exactly one record is created on success; nothing is created on
    /// failure.
    async fn submit(
        &self,
        submission: RepairRequestSubmission,
    ) -> Result<SubmittedRepairRequest, Error>;

    /// Apply a status change allowed by the transition table.
    ///
    /// Asking for the current status succeeds without writing.
    async fn update_status(&self, request: UpdateRepairStatusRequest)
    -> Result<RepairRequest, Error>;

    /// Replace the notes; blank input clears them.
    async fn update_notes(&self, request: UpdateRepairNotesRequest) -> Result<RepairRequest, Error>;
}
