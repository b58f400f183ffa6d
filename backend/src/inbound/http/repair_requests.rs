//! Public repair request submission.
//!
//! ```text
//! POST /api/v1/repair-requests
//! {"name":"John Doe","deviceType":"laptop","problem":"Screen flickers",
//!  "contactMethod":"whatsapp","contact":"+31 6 1234 5678"}
//! ```

use actix_web::{HttpResponse, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::SubmittedRepairRequest;
use crate::domain::{RepairRequestSubmission, RepairStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Submission form body.
///
/// Missing strings are treated as empty so the domain reports which field
/// is wrong.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitRepairRequestBody {
    #[schema(example = "John Doe")]
    pub name: String,
    /// Device picked in the form; wins over `serviceCategory`.
    #[schema(example = "laptop")]
    pub device_type: Option<String>,
    /// Category preselected from the services page.
    #[schema(example = "computers")]
    pub service_category: Option<String>,
    #[schema(example = "Screen flickers after boot")]
    pub problem: String,
    #[schema(example = "whatsapp")]
    pub contact_method: String,
    #[schema(example = "+31 6 1234 5678")]
    pub contact: String,
}

impl From<SubmitRepairRequestBody> for RepairRequestSubmission {
    fn from(body: SubmitRepairRequestBody) -> Self {
        Self {
            name: body.name,
            device_type: body.device_type,
            service_category: body.service_category,
            problem: body.problem,
            contact_method: body.contact_method,
            contact: body.contact,
        }
    }
}

/// Returned once the request is stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRepairRequestBody {
    pub id: Uuid,
    /// Secret needed to open the tracking page.
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015")]
    pub tracking_token: String,
    #[schema(example = "https://techfix.nl/track/9f86d081884c7d659a2feaa0c55ad015")]
    pub tracking_url: String,
    #[schema(value_type = String, example = "pending")]
    pub status: RepairStatus,
}

impl From<SubmittedRepairRequest> for SubmittedRepairRequestBody {
    fn from(value: SubmittedRepairRequest) -> Self {
        Self {
            id: value.id,
            tracking_token: value.tracking_token.as_str().to_owned(),
            tracking_url: value.tracking_url,
            status: value.status,
        }
    }
}

/// Submit a repair request and receive its tracking link.
#[utoipa::path(
    post,
    path = "/api/v1/repair-requests",
    request_body = SubmitRepairRequestBody,
    responses(
        (status = 201, description = "Request stored", body = SubmittedRepairRequestBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Store unreachable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["repair-requests"],
    operation_id = "submitRepairRequest",
    security([])
)]
#[post("/repair-requests")]
pub async fn submit_repair_request(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitRepairRequestBody>,
) -> ApiResult<HttpResponse> {
    let submitted = state
        .repair_requests
        .submit(payload.into_inner().into())
        .await?;
    let location = format!("/api/v1/track/{}", submitted.tracking_token);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(SubmittedRepairRequestBody::from(submitted)))
}
