//! ANS Core Library
//!
//! Shared records, request types and service contracts for the ANS hosting
//! APIs. The CLI depends on this crate for everything it sends and renders.

pub mod api;
pub mod cloudflare;
pub mod draas;
pub mod error;
pub mod fields;
pub mod params;
pub mod service;

// Re-export commonly used types
pub use error::*;
pub use fields::{Field, FieldSet, FieldValue, Fields};
pub use params::{Filter, FilterOperator, ParameterList, Sorting};
pub use service::{CloudflareService, DraasService};
