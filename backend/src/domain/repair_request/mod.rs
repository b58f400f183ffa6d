//! Repair request aggregate.
//!
//! A repair request is created by a customer submission, read publicly
//! through its tracking token, and moved through its lifecycle by an admin.
//! Records are never deleted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

mod contact;
mod status;
mod submission;
mod token;

pub use contact::{ContactMethod, ParseContactMethodError};
pub use status::{ParseRepairStatusError, RepairStatus, StatusChange, StatusTransitionError};
pub use submission::{
    CONTACT_MAX_CHARS, DEVICE_TYPE_MAX_CHARS, DeviceType, GENERAL_DEVICE_TYPE, NAME_MAX_CHARS,
    NOTES_MAX_CHARS, PROBLEM_MAX_CHARS, RepairRequestSubmission, SubmissionField,
    SubmissionValidationError, ValidatedSubmission, normalise_notes,
};
pub use token::{EmptyTrackingToken, TRACKING_TOKEN_BYTES, TrackingToken};

/// Field bundle used to build or rehydrate a [`RepairRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRequestDraft {
    pub id: Uuid,
    pub name: String,
    pub device_type: DeviceType,
    pub problem: String,
    pub contact_method: ContactMethod,
    pub contact: String,
    pub status: RepairStatus,
    pub notes: Option<String>,
    pub tracking_token: TrackingToken,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted repair request.
///
/// ## Invariants
/// - `id` and `tracking_token` never change once assigned.
/// - `updated_at` is never earlier than `created_at`.
/// - `notes` is either `None` or a trimmed, non-empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRequest {
    id: Uuid,
    name: String,
    device_type: DeviceType,
    problem: String,
    contact_method: ContactMethod,
    contact: String,
    status: RepairStatus,
    notes: Option<String>,
    tracking_token: TrackingToken,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RepairRequest {
    /// Create a pending request from a validated submission.
    #[must_use]
    pub fn submitted(
        submission: ValidatedSubmission,
        tracking_token: TrackingToken,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: submission.name,
            device_type: submission.device_type,
            problem: submission.problem,
            contact_method: submission.contact_method,
            contact: submission.contact,
            status: RepairStatus::Pending,
            notes: None,
            tracking_token,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a request from stored fields.
    ///
    /// Blank notes collapse to `None` and an `updated_at` earlier than
    /// `created_at` is clamped so the invariants hold for legacy rows.
    #[must_use]
    pub fn from_draft(draft: RepairRequestDraft) -> Self {
        let notes = draft
            .notes
            .map(|notes| notes.trim().to_owned())
            .filter(|notes| !notes.is_empty());
        Self {
            id: draft.id,
            name: draft.name,
            device_type: draft.device_type,
            problem: draft.problem,
            contact_method: draft.contact_method,
            contact: draft.contact,
            status: draft.status,
            notes,
            tracking_token: draft.tracking_token,
            created_at: draft.created_at,
            updated_at: draft.updated_at.max(draft.created_at),
        }
    }

    /// Same request carrying a different tracking token.
    ///
    /// Used when a freshly generated token collided before the first write.
    #[must_use]
    pub fn with_tracking_token(mut self, tracking_token: TrackingToken) -> Self {
        self.tracking_token = tracking_token;
        self
    }

    /// Move the request to `target` if the transition table allows it.
    ///
    /// A request that already has `target` is left untouched, including its
    /// `updated_at`.
    pub fn change_status(
        &mut self,
        target: RepairStatus,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, StatusTransitionError> {
        let from = self.status;
        if !from.can_transition_to(target) {
            return Err(StatusTransitionError { from, to: target });
        }
        if from == target {
            return Ok(StatusChange::Unchanged);
        }
        self.status = target;
        self.touch(now);
        Ok(StatusChange::Changed { from })
    }

    /// Replace the admin notes and advance `updated_at`.
    pub fn replace_notes(&mut self, notes: Option<String>, now: DateTime<Utc>) {
        self.notes = notes;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn device_type(&self) -> &DeviceType {
        &self.device_type
    }

    #[must_use]
    pub fn problem(&self) -> &str {
        self.problem.as_str()
    }

    #[must_use]
    pub fn contact_method(&self) -> ContactMethod {
        self.contact_method
    }

    #[must_use]
    pub fn contact(&self) -> &str {
        self.contact.as_str()
    }

    #[must_use]
    pub fn status(&self) -> RepairStatus {
        self.status
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn tracking_token(&self) -> &TrackingToken {
        &self.tracking_token
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Link the admin follows to contact the customer.
    #[must_use]
    pub fn contact_link(&self) -> String {
        self.contact_method.contact_link(&self.contact)
    }
}
