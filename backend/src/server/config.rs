//! Application settings and the HTTP server configuration object.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use techfix::domain::{DEFAULT_BRAND_NAME, SiteProfile};
use techfix::inbound::http::session_config::SessionSettings;
use techfix::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:8080";

/// Start-up settings from CLI flags, `TECHFIX_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TECHFIX")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Origin used to build tracking links, e.g. `https://techfix.nl`.
    pub public_origin: Option<String>,
    /// Brand shown on the site.
    pub brand_name: Option<String>,
    /// Email of the admin account provisioned at start-up.
    pub admin_email: Option<String>,
    /// Argon2id PHC string for that account.
    pub admin_password_hash: Option<String>,
}

/// Credentials for the start-up admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminBootstrap<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the address does not parse.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_ref())
    }

    /// Branding and link origin for the HTTP layer.
    pub fn site_profile(&self) -> SiteProfile {
        SiteProfile::new(
            non_blank(self.brand_name.as_ref()).unwrap_or(DEFAULT_BRAND_NAME),
            non_blank(self.public_origin.as_ref()).unwrap_or(DEFAULT_PUBLIC_ORIGIN),
        )
    }

    /// Admin account to provision, when both halves are configured.
    pub fn admin_bootstrap(&self) -> Option<AdminBootstrap<'_>> {
        match (
            non_blank(self.admin_email.as_ref()),
            non_blank(self.admin_password_hash.as_ref()),
        ) {
            (Some(email), Some(password_hash)) => Some(AdminBootstrap {
                email,
                password_hash,
            }),
            _ => None,
        }
    }
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) site: SiteProfile,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, site: SiteProfile) -> Self {
        Self {
            session,
            bind_addr,
            site,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    ///
    /// Without one the server runs on the in-memory adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
