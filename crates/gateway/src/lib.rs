//! Remote Project Gateway.
//!
//! Typed request/response wrapper around the dashboard backend's REST
//! endpoints. One method is one network round trip: no batching, no
//! caching, no state kept between calls. Status codes are not
//! interpreted here; callers decide what a rejection means.

pub mod api;
pub mod config;
pub mod gateway;
pub mod session;

pub use api::{GatewayError, ProjectApi};
pub use config::{ClientConfig, ConfigError};
pub use gateway::ProjectGateway;
pub use session::Session;
