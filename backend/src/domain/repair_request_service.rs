//! Repair request domain services.
//!
//! The command service handles submissions and admin mutations; the query
//! service serves public tracking lookups and the admin overview.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    RepairRequestCommand, RepairRequestRepository, RepairRequestRepositoryError,
    RepairRequestReviewQuery, SubmittedRepairRequest, TrackingQuery, TrackingTokenSource,
    UpdateRepairNotesRequest, UpdateRepairStatusRequest,
};
use crate::domain::{
    Error, RepairRequest, RepairRequestOverview, RepairRequestSubmission, ReviewedRepairRequest,
    SiteProfile, StatusChange, StatusSummary, StatusTransitionError, SubmissionValidationError,
    TrackingToken, TrackingView, ValidatedSubmission, normalise_notes, sort_newest_first,
};

/// Attempts at inserting a submission before token collisions become fatal.
pub const MAX_TOKEN_ATTEMPTS: usize = 3;

const INVALID_TRACKING_LINK: &str = "Invalid tracking link";
const TRACKING_LOAD_FAILED: &str = "Failed to load repair status";
const TRACKING_NOT_FOUND: &str = "Repair request not found";
const HOME_URL: &str = "/";

fn map_repository_error(error: RepairRequestRepositoryError) -> Error {
    match error {
        RepairRequestRepositoryError::Connection { message } => Error::service_unavailable(
            format!("repair request repository unavailable: {message}"),
        ),
        RepairRequestRepositoryError::Query { message } => {
            Error::internal(format!("repair request repository error: {message}"))
        }
        RepairRequestRepositoryError::DuplicateToken => {
            Error::internal("could not allocate a unique tracking token")
        }
    }
}

fn map_validation_error(error: SubmissionValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field().as_str(),
        "code": error.code(),
    }))
}

fn not_found(id: uuid::Uuid) -> Error {
    Error::not_found(format!("repair request {id} not found"))
}

fn transition_conflict(id: uuid::Uuid, rejected: StatusTransitionError) -> Error {
    warn!(
        repair_request_id = %id,
        from = %rejected.from,
        to = %rejected.to,
        "status transition rejected"
    );
    Error::conflict(rejected.to_string()).with_details(json!({
        "from": rejected.from.as_str(),
        "to": rejected.to.as_str(),
    }))
}

/// Service implementing the repair request command port.
#[derive(Clone)]
pub struct RepairRequestCommandService<R> {
    repo: Arc<R>,
    tokens: Arc<dyn TrackingTokenSource>,
    clock: Arc<dyn Clock>,
    site: SiteProfile,
}

impl<R> RepairRequestCommandService<R> {
    /// Create a command service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use techfix::domain::SiteProfile;
    /// use techfix::domain::ports::{FixtureRepairRequestRepository, OsRngTokenSource};
    /// use techfix::domain::RepairRequestCommandService;
    ///
    /// let _service = RepairRequestCommandService::new(
    ///     Arc::new(FixtureRepairRequestRepository),
    ///     Arc::new(OsRngTokenSource),
    ///     Arc::new(DefaultClock),
    ///     SiteProfile::default(),
    /// );
    /// ```
    pub fn new(
        repo: Arc<R>,
        tokens: Arc<dyn TrackingTokenSource>,
        clock: Arc<dyn Clock>,
        site: SiteProfile,
    ) -> Self {
        Self {
            repo,
            tokens,
            clock,
            site,
        }
    }
}

impl<R> RepairRequestCommandService<R>
where
    R: RepairRequestRepository,
{
    async fn load(&self, id: uuid::Uuid) -> Result<RepairRequest, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn insert_with_fresh_tokens(
        &self,
        mut request: RepairRequest,
    ) -> Result<RepairRequest, Error> {
        let mut attempt = 1;
        loop {
            match self.repo.insert(&request).await {
                Ok(()) => return Ok(request),
                Err(RepairRequestRepositoryError::DuplicateToken)
                    if attempt < MAX_TOKEN_ATTEMPTS =>
                {
                    warn!(attempt, "tracking token collision; drawing a new token");
                    request = request.with_tracking_token(self.tokens.next_token());
                    attempt += 1;
                }
                Err(err) => return Err(map_repository_error(err)),
            }
        }
    }
}

#[async_trait]
impl<R> RepairRequestCommand for RepairRequestCommandService<R>
where
    R: RepairRequestRepository,
{
    async fn submit(
        &self,
        submission: RepairRequestSubmission,
    ) -> Result<SubmittedRepairRequest, Error> {
        let validated = ValidatedSubmission::try_from(submission).map_err(map_validation_error)?;
        let draft = RepairRequest::submitted(validated, self.tokens.next_token(), self.clock.utc());
        let stored = self.insert_with_fresh_tokens(draft).await?;

        info!(repair_request_id = %stored.id(), "repair request submitted");
        Ok(SubmittedRepairRequest {
            id: stored.id(),
            tracking_url: self.site.tracking_url(stored.tracking_token()),
            tracking_token: stored.tracking_token().clone(),
            status: stored.status(),
        })
    }

    async fn update_status(
        &self,
        request: UpdateRepairStatusRequest,
    ) -> Result<RepairRequest, Error> {
        let UpdateRepairStatusRequest { id, status: target } = request;
        let current = self.load(id).await?;
        let mut changed = current.clone();
        let change = changed
            .change_status(target, self.clock.utc())
            .map_err(|rejected| transition_conflict(id, rejected))?;
        let StatusChange::Changed { from } = change else {
            return Ok(current);
        };

        let written = self
            .repo
            .update_status(&id, from, target, changed.updated_at())
            .await
            .map_err(map_repository_error)?;
        if let Some(stored) = written {
            info!(
                repair_request_id = %id,
                from = %from,
                to = %target,
                "repair request status changed"
            );
            return Ok(stored);
        }

        // The status moved between the read and the write.
        let latest = self.load(id).await?;
        if latest.status() == target {
            return Ok(latest);
        }
        Err(transition_conflict(
            id,
            StatusTransitionError {
                from: latest.status(),
                to: target,
            },
        ))
    }

    async fn update_notes(
        &self,
        request: UpdateRepairNotesRequest,
    ) -> Result<RepairRequest, Error> {
        let notes = normalise_notes(&request.notes).map_err(map_validation_error)?;
        let stored = self
            .repo
            .update_notes(&request.id, notes, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(request.id))?;
        info!(repair_request_id = %stored.id(), "repair request notes updated");
        Ok(stored)
    }
}

/// Service implementing the tracking and review query ports.
#[derive(Clone)]
pub struct RepairRequestQueryService<R> {
    repo: Arc<R>,
    site: SiteProfile,
}

impl<R> RepairRequestQueryService<R> {
    /// Create a query service.
    pub fn new(repo: Arc<R>, site: SiteProfile) -> Self {
        Self { repo, site }
    }
}

#[async_trait]
impl<R> TrackingQuery for RepairRequestQueryService<R>
where
    R: RepairRequestRepository,
{
    async fn track(&self, raw_token: &str) -> Result<TrackingView, Error> {
        let token = TrackingToken::parse(raw_token)
            .map_err(|_| Error::invalid_request(INVALID_TRACKING_LINK))?;

        let found = self
            .repo
            .find_by_token(&token)
            .await
            .map_err(|err| match err {
                RepairRequestRepositoryError::Connection { .. } => {
                    Error::service_unavailable(TRACKING_LOAD_FAILED)
                }
                _ => Error::internal(TRACKING_LOAD_FAILED),
            })?;

        found
            .as_ref()
            .map(TrackingView::from)
            .ok_or_else(|| {
                Error::not_found(TRACKING_NOT_FOUND).with_details(json!({ "homeUrl": HOME_URL }))
            })
    }
}

#[async_trait]
impl<R> RepairRequestReviewQuery for RepairRequestQueryService<R>
where
    R: RepairRequestRepository,
{
    async fn overview(&self) -> Result<RepairRequestOverview, Error> {
        let mut requests = self.repo.list_all().await.map_err(map_repository_error)?;
        sort_newest_first(&mut requests);

        let summary = StatusSummary::tally(&requests);
        let requests = requests
            .into_iter()
            .map(|request| ReviewedRepairRequest {
                tracking_url: self.site.tracking_url(request.tracking_token()),
                contact_link: request.contact_link(),
                request,
            })
            .collect();

        Ok(RepairRequestOverview { requests, summary })
    }
}

#[cfg(test)]
#[path = "repair_request_service_tests.rs"]
mod tests;
