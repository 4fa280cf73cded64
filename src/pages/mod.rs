//! Routed pages.

pub mod dashboard;
pub mod signin;
pub mod unauthorized;
