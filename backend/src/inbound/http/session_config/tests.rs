//! Session configuration validation in both build modes.

use std::collections::HashMap;
use std::io::Write;

use actix_session::Session;
use actix_web::{App, HttpResponse, test as actix_test, web};
use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

struct ReleaseEnv {
    key: NamedTempFile,
    vars: HashMap<&'static str, String>,
}

impl ReleaseEnv {
    fn with(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn without(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn load(&self, mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
        session_settings_from_env(&env_from(self.vars.clone()), mode)
    }
}

#[fixture]
fn release_env() -> ReleaseEnv {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let vars = HashMap::from([
        (KEY_FILE_ENV, key.path().display().to_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseEnv { key, vars }
}

#[rstest]
fn explicit_release_settings_are_accepted(release_env: ReleaseEnv) {
    let settings = release_env.load(BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.fingerprint().len(), 16);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(release_env: ReleaseEnv, #[case] name: &'static str) {
    let err = release_env
        .without(name)
        .load(BuildMode::Release)
        .err()
        .expect("missing toggle rejected");
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_malformed_toggles(
    release_env: ReleaseEnv,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = release_env
        .with(name, value)
        .load(BuildMode::Release)
        .err()
        .expect("malformed toggle rejected");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: bad, .. } if bad == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_env: ReleaseEnv) {
    let err = release_env
        .with(ALLOW_EPHEMERAL_ENV, "yes")
        .load(BuildMode::Release)
        .err()
        .expect("ephemeral rejected");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys(release_env: ReleaseEnv) {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let err = release_env
        .with(KEY_FILE_ENV, &short.path().display().to_string())
        .load(BuildMode::Release)
        .err()
        .expect("short key rejected");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key(release_env: ReleaseEnv) {
    let missing = release_env.key.path().with_extension("missing");
    let err = release_env
        .with(KEY_FILE_ENV, &missing.display().to_string())
        .load(BuildMode::Release)
        .err()
        .expect("missing key rejected");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(release_env: ReleaseEnv) {
    let err = release_env
        .with(COOKIE_SECURE_ENV, "0")
        .with(SAMESITE_ENV, "None")
        .load(BuildMode::Release)
        .err()
        .expect("insecure SameSite=None rejected");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn debug_falls_back_to_lenient_defaults() {
    let vars = HashMap::from([(KEY_FILE_ENV, "/nonexistent/techfix-session-key".to_owned())]);
    let settings =
        session_settings_from_env(&env_from(vars), BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_malformed_values(release_env: ReleaseEnv) {
    let settings = release_env
        .with(SAMESITE_ENV, "unexpected")
        .with(COOKIE_SECURE_ENV, "perhaps")
        .load(BuildMode::Debug)
        .expect("debug falls back");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("1", Some(true))]
#[case(" Yes ", Some(true))]
#[case("n", Some(false))]
#[case("FALSE", Some(false))]
#[case("2", None)]
fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
#[actix_web::test]
async fn middleware_issues_an_http_only_session_cookie(release_env: ReleaseEnv) {
    let settings = release_env
        .with(COOKIE_SECURE_ENV, "0")
        .with(SAMESITE_ENV, "Lax")
        .load(BuildMode::Release)
        .expect("valid settings");
    let app = actix_test::init_service(App::new().wrap(settings.middleware()).route(
        "/",
        web::get().to(|session: Session| async move {
            session.insert("seen", true).expect("session insert");
            HttpResponse::Ok().finish()
        }),
    ))
    .await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie");

    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.max_age(), Some(Duration::hours(SESSION_TTL_HOURS)));
}
