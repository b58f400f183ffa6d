//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`);
//! only compiled for tests or with the `test-support` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    AdminAccountRepository, RepairRequestCommand, SubmittedRepairRequest, TrackingTokenSource,
};
use crate::domain::{
    AdminAccount, AdminIdentity, AdminLoginService, AdminPasswordHash, RepairRequestCommandService,
    RepairRequestQueryService, RepairRequestSubmission, SiteProfile, TrackingToken,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryAdminAccountRepository, InMemoryRepairRequestRepository};

/// Fixed instant used as "now" by deterministic tests.
#[must_use]
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("valid fixture timestamp"),
    }
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Default for MutableClock {
    fn default() -> Self {
        Self::new(fixture_timestamp())
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Token source replaying a fixed script, then falling back to random
/// tokens.
#[derive(Default)]
pub struct ScriptedTokenSource(Mutex<VecDeque<TrackingToken>>);

impl ScriptedTokenSource {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let script = tokens
            .into_iter()
            .map(|raw| match TrackingToken::parse(raw.as_ref()) {
                Ok(token) => token,
                Err(err) => panic!("scripted token: {err}"),
            })
            .collect();
        Self(Mutex::new(script))
    }
}

impl TrackingTokenSource for ScriptedTokenSource {
    fn next_token(&self) -> TrackingToken {
        let next = match self.0.lock() {
            Ok(mut script) => script.pop_front(),
            Err(_) => panic!("token script mutex"),
        };
        next.unwrap_or_else(TrackingToken::generate)
    }
}

/// Argon2id hash of `password` with a random salt.
#[must_use]
pub fn hash_password(password: &str) -> AdminPasswordHash {
    let salt = SaltString::generate(&mut OsRng);
    let phc = match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(err) => panic!("hash test password: {err}"),
    };
    match AdminPasswordHash::parse(phc) {
        Ok(hash) => hash,
        Err(err) => panic!("freshly hashed password must parse: {err}"),
    }
}

/// Cookie session middleware with a throwaway key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Public origin used by [`TestBackend`].
pub const TEST_ORIGIN: &str = "https://techfix.test";

/// Fully wired in-memory backend with a controllable clock and token script.
pub struct TestBackend {
    pub repairs: Arc<InMemoryRepairRequestRepository>,
    pub accounts: Arc<InMemoryAdminAccountRepository>,
    pub clock: Arc<MutableClock>,
    pub tokens: Arc<ScriptedTokenSource>,
    pub site: SiteProfile,
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::with_tokens(std::iter::empty::<&str>())
    }
}

impl TestBackend {
    /// Backend whose first tracking tokens come from `tokens`.
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            repairs: Arc::new(InMemoryRepairRequestRepository::new()),
            accounts: Arc::new(InMemoryAdminAccountRepository::new()),
            clock: Arc::new(MutableClock::default()),
            tokens: Arc::new(ScriptedTokenSource::new(tokens)),
            site: SiteProfile::new("TechFix NL", TEST_ORIGIN),
        }
    }

    /// HTTP state backed by the in-memory adapters.
    pub fn http_state(&self) -> HttpState {
        let queries = Arc::new(RepairRequestQueryService::new(
            self.repairs.clone(),
            self.site.clone(),
        ));
        HttpState::new(
            HttpStatePorts {
                repair_requests: Arc::new(RepairRequestCommandService::new(
                    self.repairs.clone(),
                    self.tokens.clone(),
                    self.clock.clone(),
                    self.site.clone(),
                )),
                tracking: queries.clone(),
                review: queries,
                login: Arc::new(AdminLoginService::new(self.accounts.clone())),
            },
            self.site.clone(),
        )
    }

    /// Store an account with the given password and admin flag.
    pub async fn add_account(&self, email: &str, password: &str, is_admin: bool) -> AdminIdentity {
        let account = AdminAccount::new(Uuid::new_v4(), email, hash_password(password), is_admin);
        if let Err(err) = self.accounts.upsert(&account).await {
            panic!("store test account: {err}");
        }
        match self.accounts.find_by_email(account.email()).await {
            Ok(Some(stored)) => stored.identity(),
            other => panic!("stored test account missing: {other:?}"),
        }
    }

    /// Submit a laptop repair for `name` through the command service.
    pub async fn submit_sample(&self, name: &str) -> SubmittedRepairRequest {
        let submission = RepairRequestSubmission {
            name: name.to_owned(),
            device_type: Some("laptop".to_owned()),
            service_category: None,
            problem: "Screen flickers".to_owned(),
            contact_method: "whatsapp".to_owned(),
            contact: "+31 6 1234 5678".to_owned(),
        };
        match self.http_state().repair_requests.submit(submission).await {
            Ok(submitted) => submitted,
            Err(err) => panic!("submit sample request: {err}"),
        }
    }
}
