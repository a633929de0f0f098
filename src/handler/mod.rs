//! Request handler module
//!
//! Entry point hyper calls for each request; the proxy logic itself lives in `crate::proxy`.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
