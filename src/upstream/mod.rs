//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! /search handler
//!     → client.rs (build URL, single GET)
//!     → upstream API
//!     → JSON body, or RelayError classified by failure kind
//! ```

pub mod client;

pub use client::UpstreamClient;
