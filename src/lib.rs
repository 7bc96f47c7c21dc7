//! Scholar search relay library.
//!
//! Exposes the `/search` application for embedding (e.g. under test)
//! without binding a socket; the `scholar-relay` binary binds and serves it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
