//! # LeadLens Common Library
//!
//! Shared code for the LeadLens analytics service:
//! - Error taxonomy
//! - Configuration loading (sources, alias table, route scopes)
//! - Evaluation payload repair and field extraction
//! - Multi-source database access with provenance tagging
//! - Seller identity unification and visibility filtering
//! - Statistical aggregation

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod ids;
pub mod payload;
pub mod scope;
pub mod stats;

pub use error::{Error, Result};
