//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends raw requests, `gateway` applies the refresh/eviction
//! policy to every response, `api` and `session` are the typed auth calls
//! and handlers built on top, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod gateway;
pub mod session;
pub mod transport;
pub mod types;
