//! Common utilities, types, and configurations shared across Scry crates.
//!
//! This crate contains the base building blocks for the Scry client, including:
//! - **Configuration**: Strongly typed application configuration (`config`).
//! - **Wire Model**: Request/response contracts for the exploration service (`models`).
//! - **Telemetry**: Tracing initialization (`telemetry`).
//! - **Logging**: Contextual warning collection (`warnings`).
pub mod config;
pub mod models;
pub mod telemetry;
pub mod warnings;
