//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use techfix::domain::ports::{AdminAccountRepository, OsRngTokenSource, RepairRequestRepository};
use techfix::domain::{
    AdminLoginService, AdminPasswordHash, RepairRequestCommandService, RepairRequestQueryService,
    SiteProfile,
};
use techfix::inbound::http::state::{HttpState, HttpStatePorts};
use techfix::outbound::memory::{InMemoryAdminAccountRepository, InMemoryRepairRequestRepository};
use techfix::outbound::persistence::{DieselAdminAccountRepository, DieselRepairRequestRepository};

use super::ServerConfig;
use super::config::AdminBootstrap;

/// Build the HTTP state, provisioning the bootstrap admin first.
///
/// Uses the Diesel adapters when a pool is configured and in-memory
/// adapters otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the bootstrap admin cannot be stored or
/// its password hash does not parse.
pub(crate) async fn build_http_state(
    config: &ServerConfig,
    admin: Option<AdminBootstrap<'_>>,
) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            wire(
                Arc::new(DieselRepairRequestRepository::new(pool.clone())),
                Arc::new(DieselAdminAccountRepository::new(pool.clone())),
                config.site.clone(),
                admin,
            )
            .await
        }
        None => {
            warn!("no database configured; repair requests are kept in memory and lost on restart");
            wire(
                Arc::new(InMemoryRepairRequestRepository::new()),
                Arc::new(InMemoryAdminAccountRepository::new()),
                config.site.clone(),
                admin,
            )
            .await
        }
    }
}

async fn wire<R, A>(
    repairs: Arc<R>,
    accounts: Arc<A>,
    site: SiteProfile,
    admin: Option<AdminBootstrap<'_>>,
) -> std::io::Result<HttpState>
where
    R: RepairRequestRepository + 'static,
    A: AdminAccountRepository + 'static,
{
    let login = Arc::new(AdminLoginService::new(accounts));
    match admin {
        Some(bootstrap) => provision_admin(&login, bootstrap).await?,
        None => info!("no bootstrap admin configured"),
    }

    let queries = Arc::new(RepairRequestQueryService::new(repairs.clone(), site.clone()));
    let commands = Arc::new(RepairRequestCommandService::new(
        repairs,
        Arc::new(OsRngTokenSource),
        Arc::new(DefaultClock),
        site.clone(),
    ));
    Ok(HttpState::new(
        HttpStatePorts {
            repair_requests: commands,
            tracking: queries.clone(),
            review: queries,
            login,
        },
        site,
    ))
}

async fn provision_admin<A>(
    login: &AdminLoginService<A>,
    bootstrap: AdminBootstrap<'_>,
) -> std::io::Result<()>
where
    A: AdminAccountRepository,
{
    let hash = AdminPasswordHash::parse(bootstrap.password_hash).map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid admin password hash: {err}"),
        )
    })?;
    login
        .ensure_admin(bootstrap.email, hash)
        .await
        .map(|_| ())
        .map_err(|err| std::io::Error::other(format!("provision admin account: {err}")))
}
