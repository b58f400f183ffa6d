//! Admin dashboard handlers.
//!
//! ```text
//! POST  /api/v1/admin/login {"email":"owner@techfix.nl","password":"..."}
//! POST  /api/v1/admin/logout
//! GET   /api/v1/admin/me
//! GET   /api/v1/admin/repair-requests
//! PATCH /api/v1/admin/repair-requests/{id}/status {"status":"in-progress"}
//! PUT   /api/v1/admin/repair-requests/{id}/notes {"notes":"Waiting for parts"}
//! ```
//!
//! Everything except login and logout requires a session whose account
//! carries the admin flag.

use actix_web::{HttpResponse, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{UpdateRepairNotesRequest, UpdateRepairStatusRequest};
use crate::domain::{
    AdminIdentity, ContactMethod, Error, LoginCredentials, LoginValidationError, RepairRequest,
    RepairStatus, ReviewedRepairRequest, StatusSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_login_validation_error, parse_status, parse_uuid,
};

pub(crate) const LOGOUT_PATH: &str = "/api/v1/admin/logout";
const NOT_AN_ADMIN: &str =
    "You don't have admin privileges. Contact the site owner to get access.";

/// Login request body for `POST /api/v1/admin/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "owner@techfix.nl")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Signed-in account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentityBody {
    pub id: Uuid,
    #[schema(example = "owner@techfix.nl")]
    pub email: String,
    pub is_admin: bool,
}

impl From<AdminIdentity> for AdminIdentityBody {
    fn from(value: AdminIdentity) -> Self {
        Self {
            id: value.id,
            email: value.email,
            is_admin: value.is_admin,
        }
    }
}

/// Full stored record as the dashboard shows it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminRepairRequestBody {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "laptop")]
    pub device_type: String,
    pub problem: String,
    #[schema(value_type = String, example = "whatsapp")]
    pub contact_method: ContactMethod,
    pub contact: String,
    #[schema(value_type = String, example = "pending")]
    pub status: RepairStatus,
    pub notes: Option<String>,
    pub tracking_token: String,
    pub tracking_url: String,
    /// `https://wa.me/...` or `mailto:` link for reaching the customer.
    #[schema(example = "https://wa.me/31612345678")]
    pub contact_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminRepairRequestBody {
    fn from_record(request: &RepairRequest, tracking_url: String) -> Self {
        Self {
            id: request.id(),
            name: request.name().to_owned(),
            device_type: request.device_type().as_str().to_owned(),
            problem: request.problem().to_owned(),
            contact_method: request.contact_method(),
            contact: request.contact().to_owned(),
            status: request.status(),
            notes: request.notes().map(str::to_owned),
            tracking_token: request.tracking_token().as_str().to_owned(),
            tracking_url,
            contact_link: request.contact_link(),
            created_at: request.created_at(),
            updated_at: request.updated_at(),
        }
    }
}

impl From<ReviewedRepairRequest> for AdminRepairRequestBody {
    fn from(value: ReviewedRepairRequest) -> Self {
        Self::from_record(&value.request, value.tracking_url)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummaryBody {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl From<StatusSummary> for StatusSummaryBody {
    fn from(value: StatusSummary) -> Self {
        Self {
            total: value.total,
            pending: value.pending,
            in_progress: value.in_progress,
            completed: value.completed,
        }
    }
}

/// Dashboard list, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RepairRequestListBody {
    pub requests: Vec<AdminRepairRequestBody>,
    pub summary: StatusSummaryBody,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusBody {
    #[schema(example = "in-progress")]
    pub status: String,
}

/// Blank notes clear the field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateNotesBody {
    #[schema(example = "Waiting for replacement screen")]
    pub notes: String,
}

/// Resolve the session to an admin identity.
///
/// A session whose account vanished is cleared and treated as signed out.
async fn require_admin(state: &HttpState, session: &SessionContext) -> ApiResult<AdminIdentity> {
    let account_id = session.require_admin_id()?;
    let Some(identity) = state.login.identity(&account_id).await? else {
        session.sign_out();
        return Err(Error::unauthorized("login required"));
    };
    if !identity.is_admin {
        return Err(Error::forbidden(NOT_AN_ADMIN).with_details(json!({ "signOut": LOGOUT_PATH })));
    }
    Ok(identity)
}

fn repair_id(raw: &str) -> ApiResult<Uuid> {
    parse_uuid(raw, FieldName::new("id"))
}

fn stored_record(state: &HttpState, request: &RepairRequest) -> AdminRepairRequestBody {
    let tracking_url = state.site.tracking_url(request.tracking_token());
    AdminRepairRequestBody::from_record(request, tracking_url)
}

/// Sign in and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AdminIdentityBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Account store unreachable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/admin/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let identity = state.login.authenticate(&credentials).await?;
    session.persist_admin(&identity.id)?;
    info!(admin_id = %identity.id, is_admin = identity.is_admin, "signed in");
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(AdminIdentityBody::from(identity)))
}

/// End the session. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/admin/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["admin"],
    operation_id = "adminLogout",
    security([])
)]
#[post("/admin/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Who is signed in.
#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Signed-in account", body = AdminIdentityBody),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "currentAdmin",
    security(("SessionCookie" = []))
)]
#[get("/admin/me")]
pub async fn current_admin(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let account_id = session.require_admin_id()?;
    let Some(identity) = state.login.identity(&account_id).await? else {
        session.sign_out();
        return Err(Error::unauthorized("login required"));
    };
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(AdminIdentityBody::from(identity)))
}

/// Every repair request with dashboard counters.
#[utoipa::path(
    get,
    path = "/api/v1/admin/repair-requests",
    responses(
        (status = 200, description = "All requests, newest first", body = RepairRequestListBody),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 503, description = "Store unreachable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listRepairRequests",
    security(("SessionCookie" = []))
)]
#[get("/admin/repair-requests")]
pub async fn list_repair_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let overview = state.review.overview().await?;
    let body = RepairRequestListBody {
        requests: overview.requests.into_iter().map(Into::into).collect(),
        summary: overview.summary.into(),
    };
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

/// Move a repair request to another status.
#[utoipa::path(
    patch,
    path = "/api/v1/admin/repair-requests/{id}/status",
    params(("id" = Uuid, Path, description = "Repair request id")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Stored record", body = AdminRepairRequestBody),
        (status = 400, description = "Invalid id or status", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown repair request", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema),
        (status = 503, description = "Store unreachable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateRepairStatus",
    security(("SessionCookie" = []))
)]
#[patch("/admin/repair-requests/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<HttpResponse> {
    let admin = require_admin(&state, &session).await?;
    let id = repair_id(&path)?;
    let status = parse_status(&payload.status)?;
    let updated = state
        .repair_requests
        .update_status(UpdateRepairStatusRequest { id, status })
        .await?;
    info!(admin_id = %admin.id, repair_id = %id, status = status.as_str(), "status updated");
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(stored_record(&state, &updated)))
}

/// Replace the internal notes on a repair request.
#[utoipa::path(
    put,
    path = "/api/v1/admin/repair-requests/{id}/notes",
    params(("id" = Uuid, Path, description = "Repair request id")),
    request_body = UpdateNotesBody,
    responses(
        (status = 200, description = "Stored record", body = AdminRepairRequestBody),
        (status = 400, description = "Invalid id or notes", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown repair request", body = ErrorSchema),
        (status = 503, description = "Store unreachable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateRepairNotes",
    security(("SessionCookie" = []))
)]
#[put("/admin/repair-requests/{id}/notes")]
pub async fn update_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateNotesBody>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = repair_id(&path)?;
    let updated = state
        .repair_requests
        .update_notes(UpdateRepairNotesRequest {
            id,
            notes: payload.into_inner().notes,
        })
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(stored_record(&state, &updated)))
}
