//! HTTP handlers for the Soil Advisor API

mod analysis;
mod health;
mod recommendation;

pub use analysis::*;
pub use health::*;
pub use recommendation::*;
