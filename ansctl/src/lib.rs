//! ANS CLI Library
//!
//! This library provides the core functionality of the `ansctl` tool.
//!
//! # Public API
//!
//! The primary public API is [`client::AnsClient`], which implements the
//! service traits from `ans-core` over HTTP. Configuration types are available
//! via [`config::CliConfig`] and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use ans_core::{DraasService, ParameterList};
//! use ansctl::client::AnsClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = AnsClient::new("https://api.ukfast.io", "my-api-key", 30)?;
//! let solutions = client.get_solutions(&ParameterList::new()).await?;
//! println!("{} solutions", solutions.len());
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the ANS APIs.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

/// Generic record formatter used by every command.
pub mod format;

#[cfg(test)]
pub mod test_utils;
