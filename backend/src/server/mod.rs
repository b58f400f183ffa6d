//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use techfix::Trace;
#[cfg(debug_assertions)]
use techfix::doc::ApiDoc;
use techfix::inbound::http::configure_api;
use techfix::inbound::http::health::{HealthState, live, ready};
use techfix::inbound::http::session_config::SessionSettings;
use techfix::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use config::AdminBootstrap;
use state_builders::build_http_state;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix HTTP server.
///
/// Wires the adapters selected by `config`, provisions the bootstrap admin
/// when one is configured, binds the listener and marks the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when admin provisioning, binding the socket
/// or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    admin: Option<AdminBootstrap<'_>>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config, admin).await?);
    let ServerConfig {
        session,
        bind_addr,
        site: _,
        db_pool: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use rstest::rstest;
    use techfix::domain::TRACE_ID_HEADER;
    use techfix::test_support::TestBackend;

    use super::*;

    fn deps(backend: &TestBackend) -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(backend.http_state()),
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn api_routes_are_mounted_under_v1() {
        let backend = TestBackend::default();
        let app = test::init_service(build_app(deps(&backend))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/site").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_login_sets_hardened_cookie() {
        let backend = TestBackend::default();
        backend.add_account("owner@techfix.nl", "correct horse", true).await;
        let app = test::init_service(build_app(deps(&backend))).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/login")
            .set_json(serde_json::json!({
                "email": "owner@techfix.nl",
                "password": "correct horse"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert!(res.headers().contains_key(header::CACHE_CONTROL));
    }

    #[rstest]
    #[actix_web::test]
    async fn health_probes_sit_outside_the_api_scope() {
        let backend = TestBackend::default();
        let dependencies = deps(&backend);
        dependencies.health_state.mark_ready();
        let app = test::init_service(build_app(dependencies)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
