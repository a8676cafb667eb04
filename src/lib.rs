pub mod config;
pub mod domain;
pub mod entity;
pub mod infrastructure;
pub mod telemetry;
pub mod usecase;
