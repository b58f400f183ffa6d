//! Site profile and service catalogue for the marketing pages.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    RESPONSE_TIME_HOURS, SERVICE_AREA, ServiceOffering, device_type_options, services_matching,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_category;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeviceTypeOptionBody {
    #[schema(example = "Desktop PC")]
    pub label: String,
    #[schema(example = "desktop pc")]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactMethodOptionBody {
    #[schema(example = "whatsapp")]
    pub value: String,
    #[schema(example = "WhatsApp")]
    pub label: String,
}

/// Branding and form options.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteProfileBody {
    #[schema(example = "TechFix NL")]
    pub brand_name: String,
    #[schema(example = "The Netherlands")]
    pub service_area: String,
    #[schema(example = 24)]
    pub response_time_hours: u32,
    pub device_types: Vec<DeviceTypeOptionBody>,
    pub contact_methods: Vec<ContactMethodOptionBody>,
}

/// One catalogue entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceOfferingBody {
    #[schema(example = "os-install")]
    pub id: String,
    #[schema(example = "computers")]
    pub category: String,
    #[schema(example = "OS Installation")]
    pub title: String,
    pub problems: Vec<String>,
    #[schema(example = "From €49")]
    pub price: String,
}

impl From<ServiceOffering> for ServiceOfferingBody {
    fn from(value: ServiceOffering) -> Self {
        Self {
            id: value.id.to_owned(),
            category: value.category.slug().to_owned(),
            title: value.title.to_owned(),
            problems: value.problems.iter().map(|p| (*p).to_owned()).collect(),
            price: value.price.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServicesQuery {
    /// `all`, `computers`, `mobile-phones`, `home-electronics` or `network-gear`.
    pub category: Option<String>,
}

/// Branding plus the choices offered by the submission form.
#[utoipa::path(
    get,
    path = "/api/v1/site",
    responses((status = 200, description = "Site profile", body = SiteProfileBody)),
    tags = ["site"],
    operation_id = "siteProfile",
    security([])
)]
#[get("/site")]
pub async fn site_profile(state: web::Data<HttpState>) -> web::Json<SiteProfileBody> {
    let site = &state.site;
    web::Json(SiteProfileBody {
        brand_name: site.brand_name().to_owned(),
        service_area: SERVICE_AREA.to_owned(),
        response_time_hours: RESPONSE_TIME_HOURS,
        device_types: device_type_options()
            .into_iter()
            .map(|option| DeviceTypeOptionBody {
                label: option.label.to_owned(),
                value: option.value,
            })
            .collect(),
        contact_methods: site
            .contact_methods()
            .iter()
            .map(|method| ContactMethodOptionBody {
                value: method.as_str().to_owned(),
                label: method.label().to_owned(),
            })
            .collect(),
    })
}

/// Service catalogue, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/v1/services",
    params(ServicesQuery),
    responses(
        (status = 200, description = "Matching services", body = [ServiceOfferingBody]),
        (status = 400, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["site"],
    operation_id = "listServices",
    security([])
)]
#[get("/services")]
pub async fn list_services(
    query: web::Query<ServicesQuery>,
) -> ApiResult<web::Json<Vec<ServiceOfferingBody>>> {
    let filter = parse_category(query.category.as_deref())?;
    Ok(web::Json(
        services_matching(filter)
            .into_iter()
            .map(ServiceOfferingBody::from)
            .collect(),
    ))
}
