//! Row types as stored in PostgreSQL.
//!
//! Each row converts into its `assetboard_core::models` counterpart.

pub mod asset;
pub mod brand;
pub mod designer;
pub mod provider;
