//! Business logic services for the Soil Advisor service

pub mod analysis;
pub mod pdf;
pub mod recommendation;
pub mod soil_extraction;

pub use analysis::AnalysisService;
pub use recommendation::RecommendationService;
pub use soil_extraction::SoilExtractionService;
