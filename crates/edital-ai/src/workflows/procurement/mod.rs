pub mod analysis;

pub use analysis::{BidAnalysis, BidAnalyzer};
