//! Shared types and models for the Soil Advisor service
//!
//! This crate contains the request-scoped DTOs, the model-reply parsing
//! boundary and the soil metric sanity checks used by the backend and the
//! browser module (via WASM).

pub mod models;
pub mod reply;
pub mod types;
pub mod validation;

pub use models::*;
pub use reply::*;
pub use types::*;
pub use validation::*;
