//! Inbound adapters translating external requests into domain calls.
//!
//! Only HTTP is exposed; framework details stay inside [`http`].

pub mod http;
