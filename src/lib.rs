//! # logdoctor
//!
//! HTTP triage service for Render build failures.
//!
//! Fetches build logs from the Render API, runs a table-driven keyword
//! heuristic over them, and suggests remediations. Optional allow-list
//! auth, OpenTelemetry observability.

pub mod auth;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod render;
pub mod server;
pub mod telemetry;
