//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → search.rs (validate q, call upstream)
//!     → response.rs (map RelayError to status + JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod search;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{ErrorBody, RelayError};
pub use server::HttpServer;
