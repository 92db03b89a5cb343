pub mod classifier;
pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod server;
pub mod session;
pub mod telemetry;
