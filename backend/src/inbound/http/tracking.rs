//! Public tracking lookup.
//!
//! ```text
//! GET /api/v1/track/9f86d081884c7d659a2feaa0c55ad015
//! ```
//!
//! Anyone holding the token may read the projection; responses are marked
//! `no-store` so shared devices do not cache them.

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{RepairStatus, StatusPresentation, TrackingView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Fields visible to a token holder.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackedRepairBody {
    pub id: Uuid,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "laptop")]
    pub device_type: String,
    pub problem: String,
    #[schema(value_type = String, example = "in-progress")]
    pub status: RepairStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How the tracking page renders the status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPresentationBody {
    #[schema(example = "refresh-cw")]
    pub icon: String,
    #[schema(example = "blue")]
    pub color: String,
    #[schema(example = "In Progress")]
    pub label: String,
    #[schema(example = "Great news! Your device is currently being repaired.")]
    pub description: String,
}

impl From<StatusPresentation> for StatusPresentationBody {
    fn from(value: StatusPresentation) -> Self {
        Self {
            icon: value.icon.to_owned(),
            color: value.color.to_owned(),
            label: value.label.to_owned(),
            description: value.description.to_owned(),
        }
    }
}

/// Tracking page payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub repair: TrackedRepairBody,
    pub presentation: StatusPresentationBody,
    #[schema(example = "monitor")]
    pub device_icon: String,
}

impl From<TrackingView> for TrackingResponse {
    fn from(view: TrackingView) -> Self {
        let TrackingView {
            repair,
            presentation,
            device_icon,
        } = view;
        Self {
            repair: TrackedRepairBody {
                id: repair.id,
                name: repair.name,
                device_type: repair.device_type.as_str().to_owned(),
                problem: repair.problem,
                status: repair.status,
                created_at: repair.created_at,
                updated_at: repair.updated_at,
            },
            presentation: presentation.into(),
            device_icon: device_icon.as_str().to_owned(),
        }
    }
}

async fn respond(state: &HttpState, raw_token: &str) -> ApiResult<HttpResponse> {
    let view = state.tracking.track(raw_token).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(TrackingResponse::from(view)))
}

/// Look up a repair request by its tracking token.
#[utoipa::path(
    get,
    path = "/api/v1/track/{token}",
    params(("token" = String, Path, description = "Tracking token from the shared link")),
    responses(
        (status = 200, description = "Current status", body = TrackingResponse),
        (status = 400, description = "Blank token", body = ErrorSchema),
        (status = 404, description = "No request with this token", body = ErrorSchema),
        (status = 503, description = "Store unreachable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "trackRepairRequest",
    security([])
)]
#[get("/track/{token}")]
pub async fn track_repair_request(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    respond(&state, &path.into_inner()).await
}

/// A tracking link with the token cut off.
#[get("/track/")]
pub async fn track_without_token(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    respond(&state, "").await
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        RepairRequestCommand, RepairRequestRepository, UpdateRepairStatusRequest,
    };
    use crate::domain::{RepairRequestSubmission, TrackingToken};
    use crate::test_support::TestBackend;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    async fn seeded() -> TestBackend {
        let backend = TestBackend::with_tokens([TOKEN]);
        backend
            .http_state()
            .repair_requests
            .submit(RepairRequestSubmission {
                name: "John Doe".to_owned(),
                device_type: Some("laptop".to_owned()),
                service_category: None,
                problem: "Screen flickers".to_owned(),
                contact_method: "whatsapp".to_owned(),
                contact: "+31 6 1234 5678".to_owned(),
            })
            .await
            .expect("seed request");
        backend
    }

    async fn get(backend: &TestBackend, uri: &str) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend.http_state()))
                .service(track_repair_request)
                .service(track_without_token),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn known_token_shows_public_fields_only() {
        let backend = seeded().await;

        let res = get(&backend, &format!("/track/{TOKEN}")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["repair"]["name"], "John Doe");
        assert_eq!(body["repair"]["status"], "pending");
        assert_eq!(body["presentation"]["label"], "Pending Review");
        assert_eq!(body["deviceIcon"], "monitor");
        assert!(body["repair"].get("contact").is_none());
        assert!(body["repair"].get("notes").is_none());
        assert!(body["repair"].get("trackingToken").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn completed_request_explains_pickup() {
        let backend = seeded().await;
        let token = TrackingToken::parse(TOKEN).expect("token");
        let id = backend
            .repairs
            .find_by_token(&token)
            .await
            .expect("lookup")
            .expect("stored")
            .id();
        backend
            .http_state()
            .repair_requests
            .update_status(UpdateRepairStatusRequest {
                id,
                status: RepairStatus::Completed,
            })
            .await
            .expect("complete");

        let res = get(&backend, &format!("/track/{TOKEN}")).await;
        let body: TrackingResponse = test::read_body_json(res).await;

        assert_eq!(body.presentation.label, "Completed");
        assert_eq!(
            body.presentation.description,
            "Your repair has been completed! We'll contact you for pickup/delivery."
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_token_links_home() {
        let backend = seeded().await;

        let res = get(&backend, "/track/ffffffffffffffffffffffffffffffff").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Repair request not found");
        assert_eq!(body["details"]["homeUrl"], "/");
    }

    #[rstest]
    #[case("/track/%20{TOKEN}")]
    #[case("/track/{TOKEN}%20")]
    #[actix_web::test]
    async fn padded_token_does_not_match(#[case] template: &str) {
        let backend = seeded().await;

        let res = get(&backend, &template.replace("{TOKEN}", TOKEN)).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("/track/")]
    #[case("/track/%20%20")]
    #[actix_web::test]
    async fn blank_token_is_rejected_without_lookup(#[case] uri: &str) {
        let backend = seeded().await;
        let lookups_before = backend.repairs.token_lookup_count();

        let res = get(&backend, uri).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid tracking link");
        assert_eq!(backend.repairs.token_lookup_count(), lookups_before);
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_is_reported_as_load_failure() {
        let backend = seeded().await;
        backend.repairs.set_unavailable(true);

        let res = get(&backend, &format!("/track/{TOKEN}")).await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Failed to load repair status");
    }
}
