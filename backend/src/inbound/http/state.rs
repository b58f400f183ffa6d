//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with in-memory adapters or mocks.

use std::sync::Arc;

use crate::domain::SiteProfile;
use crate::domain::ports::{
    LoginService, RepairRequestCommand, RepairRequestReviewQuery, TrackingQuery,
};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub repair_requests: Arc<dyn RepairRequestCommand>,
    pub tracking: Arc<dyn TrackingQuery>,
    pub review: Arc<dyn RepairRequestReviewQuery>,
    pub login: Arc<dyn LoginService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub repair_requests: Arc<dyn RepairRequestCommand>,
    pub tracking: Arc<dyn TrackingQuery>,
    pub review: Arc<dyn RepairRequestReviewQuery>,
    pub login: Arc<dyn LoginService>,
    pub site: SiteProfile,
}

impl HttpState {
    /// Assemble state from ports and the site profile.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use techfix::domain::ports::OsRngTokenSource;
    /// use techfix::domain::{
    ///     AdminLoginService, RepairRequestCommandService, RepairRequestQueryService, SiteProfile,
    /// };
    /// use techfix::inbound::http::state::{HttpState, HttpStatePorts};
    /// use techfix::outbound::memory::{
    ///     InMemoryAdminAccountRepository, InMemoryRepairRequestRepository,
    /// };
    ///
    /// let site = SiteProfile::default();
    /// let repairs = Arc::new(InMemoryRepairRequestRepository::new());
    /// let queries = Arc::new(RepairRequestQueryService::new(repairs.clone(), site.clone()));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         repair_requests: Arc::new(RepairRequestCommandService::new(
    ///             repairs,
    ///             Arc::new(OsRngTokenSource),
    ///             Arc::new(DefaultClock),
    ///             site.clone(),
    ///         )),
    ///         tracking: queries.clone(),
    ///         review: queries,
    ///         login: Arc::new(AdminLoginService::new(Arc::new(
    ///             InMemoryAdminAccountRepository::new(),
    ///         ))),
    ///     },
    ///     site,
    /// );
    /// assert_eq!(state.site.brand_name(), "TechFix NL");
    /// ```
    pub fn new(ports: HttpStatePorts, site: SiteProfile) -> Self {
        let HttpStatePorts {
            repair_requests,
            tracking,
            review,
            login,
        } = ports;
        Self {
            repair_requests,
            tracking,
            review,
            login,
            site,
        }
    }
}
