//! Terminal client for a legal-services marketplace backend: lawyer
//! directory, appointment booking, a public legal info hub, and AI-assisted
//! document review via the Gemini API.
//!
//! The binary in `main.rs` wires these modules to a clap command surface;
//! everything else is plain library code so the flows stay testable.

pub mod analysis;
pub mod api;
pub mod availability;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod nav;
pub mod render;
pub mod services;
pub mod session;
pub mod shell;
pub mod state;
pub mod storage;
pub mod types;
pub mod util;
