//! HTTP server for the products resource
//!
//! `ServerBuilder` assembles the REST router (products routes, health
//! routes, trace layer) and serves it with graceful shutdown.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::ProductAppState;
