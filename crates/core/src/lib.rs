//! Domain logic for the missing-asset tracker.
//!
//! Pure computation (normalization, duplicate resolution, range selection,
//! title matching) plus the gateway traits the bulk operations drive. No
//! database dependencies live here.

pub mod chat;
pub mod duplicates;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod range_edit;
pub mod session;
pub mod summary;
pub mod text_match;
pub mod types;
