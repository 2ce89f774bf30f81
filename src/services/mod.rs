//! Business-logic services kept out of the command layer.
//!
//! Modules:
//! - dashboard: role-specific appointment loading and status changes

pub mod dashboard;
