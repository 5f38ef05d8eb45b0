//! Request handler module
//!
//! Dispatches dev server requests through the plugin before the host fallback.

pub mod router;

pub use router::handle_request;
