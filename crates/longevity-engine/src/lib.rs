pub mod config;
pub mod error;
pub mod narrative;
pub mod scoring;
pub mod telemetry;
