//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Only the auth session is process-wide; page data stays local to the
//! pages that fetch it.

pub mod auth;
