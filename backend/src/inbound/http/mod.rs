//! HTTP inbound adapter exposing the REST API.
//!
//! ```text
//! POST  /api/v1/repair-requests
//! GET   /api/v1/track/{token}
//! GET   /api/v1/site
//! GET   /api/v1/services?category=<slug>
//! POST  /api/v1/admin/login
//! POST  /api/v1/admin/logout
//! GET   /api/v1/admin/me
//! GET   /api/v1/admin/repair-requests
//! PATCH /api/v1/admin/repair-requests/{id}/status
//! PUT   /api/v1/admin/repair-requests/{id}/notes
//! ```

pub mod admin;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod repair_requests;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod site;
pub mod state;
pub mod tracking;
pub mod validation;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// JSON extractor settings: malformed bodies become `invalid_request`
/// errors in the standard payload shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            Error::invalid_request(format!("malformed JSON body: {err}")).into()
        })
}

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller wraps the enclosing scope with the session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(repair_requests::submit_repair_request)
        .service(tracking::track_repair_request)
        .service(tracking::track_without_token)
        .service(site::site_profile)
        .service(site::list_services)
        .service(admin::login)
        .service(admin::logout)
        .service(admin::current_admin)
        .service(admin::list_repair_requests)
        .service(admin::update_status)
        .service(admin::update_notes);
}
