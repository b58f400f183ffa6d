//! Admin session helpers.
//!
//! Handlers see a [`SessionContext`] instead of the raw Actix session so the
//! cookie layout (a single account id) stays in one place.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::domain::Error;

pub(crate) const ADMIN_ID_KEY: &str = "admin_id";

/// Session wrapper exposing admin sign-in state.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the signed-in account and rotate the session identifier.
    pub fn persist_admin(&self, account_id: &Uuid) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_ID_KEY, account_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Account id stored in the cookie, if any.
    ///
    /// A value that no longer parses is treated as signed out.
    pub fn admin_id(&self) -> Result<Option<Uuid>, Error> {
        let raw = self
            .0
            .get::<String>(ADMIN_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Uuid::parse_str(&value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "discarding malformed admin id in session cookie");
                None
            }
        }))
    }

    /// Signed-in account id or `401 login required`.
    pub fn require_admin_id(&self) -> Result<Uuid, Error> {
        self.admin_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Forget everything and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::test_support::{session_cookie, test_session_middleware};

    const ACCOUNT_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn sign_in(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = Uuid::parse_str(ACCOUNT_ID).expect("fixture id");
        session.persist_admin(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_admin_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn sign_out(session: SessionContext) -> HttpResponse {
        session.sign_out();
        HttpResponse::NoContent().finish()
    }

    async fn tamper(session: Session) -> HttpResponse {
        session
            .insert(ADMIN_ID_KEY, "not-a-uuid")
            .expect("insert raw value");
        HttpResponse::Ok().finish()
    }

    async fn call(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        cookie: Option<Cookie<'static>>,
    ) -> actix_web::dev::ServiceResponse {
        let mut req = test::TestRequest::get().uri(uri);
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }
        test::call_service(app, req.to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_id_survives_the_round_trip() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/sign-in", web::get().to(sign_in))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let res = call(&app, "/sign-in", None).await;
        let cookie = session_cookie(&res).expect("session cookie");
        let res = call(&app, "/me", Some(cookie)).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, ACCOUNT_ID);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    #[actix_web::test]
    async fn anonymous_or_tampered_sessions_are_unauthorised(#[case] tampered: bool) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/tamper", web::get().to(tamper))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let cookie = if tampered {
            session_cookie(&call(&app, "/tamper", None).await)
        } else {
            None
        };
        let res = call(&app, "/me", cookie).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_out_expires_the_cookie() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/sign-in", web::get().to(sign_in))
                .route("/sign-out", web::get().to(sign_out)),
        )
        .await;

        let cookie = session_cookie(&call(&app, "/sign-in", None).await).expect("cookie");
        let res = call(&app, "/sign-out", Some(cookie)).await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let removal = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie");
        assert_eq!(removal.value(), "");
    }
}
