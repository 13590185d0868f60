//! REST gateway fronting a Puppet/OpenVox CA.
//!
//! Translates a small set of REST endpoints into calls against the CA's own
//! API via [`voxgate_ca`]. The gateway itself holds no state beyond the
//! constructed CA client.

pub mod app;
pub mod handlers;
pub mod response;

pub use app::{build_router, AppState};
