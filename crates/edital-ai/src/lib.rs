//! Viability scoring and strategic recommendations for public-procurement
//! notices ("editais"), matched against a bidding company's profile.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
