//! CLI command definitions and handlers
//!
//! This module organizes the CLI into logical submodules:
//! - [`commands`] - Command and subcommand enum definitions
//! - [`cloudflare`] / [`draas`] - Per-service command handlers
//! - [`handlers`] - Configuration, completion and global option handling
//! - [`batch`] - Per-id execution for multi-id commands

mod batch;
mod cloudflare;
mod commands;
mod draas;
mod handlers;

pub use batch::{apply_each, fetch_each};
pub use cloudflare::handle_cloudflare;
pub use commands::*;
pub use draas::{compute_resource_provider, handle_draas, hardware_plan_provider};
pub use handlers::*;
