//! Cache-control policies shared by handlers.

/// Responses carrying personal data must never be stored.
pub const NO_STORE: &str = "no-store";

/// Admin responses may be kept privately but must be revalidated.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for public tracking responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}

/// Header tuple for admin responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
