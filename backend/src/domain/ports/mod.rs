//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_account_repository;
mod login_service;
mod repair_request_command;
mod repair_request_query;
mod repair_request_repository;
mod tracking_token_source;

#[cfg(test)]
pub use admin_account_repository::MockAdminAccountRepository;
pub use admin_account_repository::{AdminAccountRepository, AdminAccountRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use repair_request_command::MockRepairRequestCommand;
pub use repair_request_command::{
    RepairRequestCommand, SubmittedRepairRequest, UpdateRepairNotesRequest,
    UpdateRepairStatusRequest,
};
#[cfg(test)]
pub use repair_request_query::{MockRepairRequestReviewQuery, MockTrackingQuery};
pub use repair_request_query::{RepairRequestReviewQuery, TrackingQuery};
#[cfg(test)]
pub use repair_request_repository::MockRepairRequestRepository;
pub use repair_request_repository::{
    FixtureRepairRequestRepository, RepairRequestRepository, RepairRequestRepositoryError,
};
#[cfg(test)]
pub use tracking_token_source::MockTrackingTokenSource;
pub use tracking_token_source::{OsRngTokenSource, TrackingTokenSource};
