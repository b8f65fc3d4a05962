//! Common types used across the service

use serde::{Deserialize, Serialize};

/// Location used when a request does not name one
pub const DEFAULT_LOCATION: &str = "New Delhi, India";

/// Success envelope wrapping every POST response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
