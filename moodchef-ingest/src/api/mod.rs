//! HTTP trigger for the ingest pipeline

pub mod health;
pub mod run;

pub use health::health_routes;
pub use run::run_routes;
