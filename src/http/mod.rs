//! HTTP protocol layer module
//!
//! Response builders shared by the proxy handler and the connection router.

pub mod response;

// Re-export commonly used builders
pub use response::{build_json_response, build_preflight_response};
