//! Evaluation payload handling
//!
//! The `calificacion` blob attached to each lead is produced by an
//! upstream evaluator and is not guaranteed to be valid JSON. Two
//! strategies are used, depending on how much of the payload a caller
//! needs:
//! - `repair` normalizes the known malformations so the text can be
//!   strictly parsed (single-record detail view).
//! - `extract` pulls the two scored fields with targeted pattern
//!   searches and works even on payloads repair cannot fully fix
//!   (list/aggregate views).

pub mod extract;
pub mod repair;

pub use extract::{extract, ExtractedFields};
pub use repair::repair;
