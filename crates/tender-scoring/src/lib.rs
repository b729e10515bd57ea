pub mod assessment;
pub mod config;
pub mod error;
pub mod taxonomy;
pub mod telemetry;
