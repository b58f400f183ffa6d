//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every public and admin endpoint together with the
//! schema mirrors from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives. Admin operations are secured by the
//! session cookie scheme added by [`SecurityAddon`].
//!
//! Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::admin::{
    AdminIdentityBody, AdminRepairRequestBody, LoginRequest, RepairRequestListBody,
    StatusSummaryBody, UpdateNotesBody, UpdateStatusBody,
};
use crate::inbound::http::repair_requests::{SubmitRepairRequestBody, SubmittedRepairRequestBody};
use crate::inbound::http::schemas::{
    ContactMethodSchema, ErrorCodeSchema, ErrorSchema, RepairStatusSchema,
};
use crate::inbound::http::site::{
    ContactMethodOptionBody, DeviceTypeOptionBody, ServiceOfferingBody, SiteProfileBody,
};
use crate::inbound::http::tracking::{StatusPresentationBody, TrackedRepairBody, TrackingResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/admin/login.",
            ))),
        );
    }
}

/// OpenAPI document for the repair desk.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TechFix repair desk API",
        description = "Repair request intake, public status tracking and the admin dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::repair_requests::submit_repair_request,
        crate::inbound::http::tracking::track_repair_request,
        crate::inbound::http::site::site_profile,
        crate::inbound::http::site::list_services,
        crate::inbound::http::admin::login,
        crate::inbound::http::admin::logout,
        crate::inbound::http::admin::current_admin,
        crate::inbound::http::admin::list_repair_requests,
        crate::inbound::http::admin::update_status,
        crate::inbound::http::admin::update_notes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RepairStatusSchema,
        ContactMethodSchema,
        SubmitRepairRequestBody,
        SubmittedRepairRequestBody,
        TrackingResponse,
        TrackedRepairBody,
        StatusPresentationBody,
        SiteProfileBody,
        DeviceTypeOptionBody,
        ContactMethodOptionBody,
        ServiceOfferingBody,
        LoginRequest,
        AdminIdentityBody,
        AdminRepairRequestBody,
        RepairRequestListBody,
        StatusSummaryBody,
        UpdateStatusBody,
        UpdateNotesBody,
    )),
    tags(
        (name = "repair-requests", description = "Submitting repair requests"),
        (name = "tracking", description = "Public status lookup by tracking token"),
        (name = "site", description = "Branding and the service catalogue"),
        (name = "admin", description = "Session-authenticated dashboard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
