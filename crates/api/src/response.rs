//! Shared response envelope types for API handlers.
//!
//! Admin API responses use a `{ "data": ... }` envelope. The public read API
//! has its own shapes in [`crate::handlers::public`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A bulk operation summary together with its human-readable message.
#[derive(Debug, Serialize)]
pub struct SummaryResponse<T: Serialize> {
    pub message: String,
    #[serde(flatten)]
    pub summary: T,
}
