//! Domain models for the Soil Advisor service

mod recommendation;
mod report;
mod soil;
mod weather;

pub use recommendation::*;
pub use report::*;
pub use soil::*;
pub use weather::*;
