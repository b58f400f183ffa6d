//! Domain primitives, lifecycle rules and services.
//!
//! Types here are framework free: no Actix, no Diesel. Inbound adapters
//! translate requests into these types and outbound adapters implement the
//! driven ports in [`ports`].
//!
//! Public surface:
//! - [`RepairRequest`] with its [`RepairStatus`] transition table.
//! - [`TrackingView`] for token holders and [`RepairRequestOverview`] for
//!   admins.
//! - [`SiteProfile`] and the fixed service catalogue.
//! - [`Error`] / [`ErrorCode`] shared by every adapter.

pub mod admin;
pub mod admin_login_service;
pub mod auth;
pub mod catalogue;
pub mod dashboard;
pub mod error;
pub mod ports;
pub mod repair_request;
pub mod repair_request_service;
pub mod trace_id;
pub mod tracking;

pub use self::admin::{AdminAccount, AdminIdentity};
pub use self::admin_login_service::AdminLoginService;
pub use self::auth::{
    AdminPasswordHash, LoginCredentials, LoginValidationError, PasswordHashError, normalise_email,
};
pub use self::catalogue::{
    CategoryFilter, DEFAULT_BRAND_NAME, DeviceTypeOption, RESPONSE_TIME_HOURS, SERVICE_AREA,
    ServiceCategory, ServiceOffering, SiteProfile, UnknownServiceCategory, device_type_options,
    services_matching,
};
pub use self::dashboard::{
    RepairRequestOverview, ReviewedRepairRequest, StatusSummary, sort_newest_first,
};
pub use self::error::{Error, ErrorCode};
pub use self::repair_request::{
    ContactMethod, DeviceType, EmptyTrackingToken, ParseContactMethodError,
    ParseRepairStatusError, RepairRequest, RepairRequestDraft, RepairRequestSubmission,
    RepairStatus, StatusChange, StatusTransitionError, SubmissionField,
    SubmissionValidationError, TrackingToken, ValidatedSubmission, normalise_notes,
};
pub use self::repair_request_service::{
    MAX_TOKEN_ATTEMPTS, RepairRequestCommandService, RepairRequestQueryService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tracking::{DeviceIcon, StatusPresentation, TrackedRepair, TrackingView};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use techfix::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
