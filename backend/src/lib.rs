//! TechFix repair desk backend.
//!
//! Customers submit repair requests and follow them through a tracking
//! link; the shop owner reviews and updates them from an admin session.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
