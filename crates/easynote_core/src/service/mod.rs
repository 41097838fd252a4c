//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate tree and store calls into use-case level APIs.
//! - Keep UI layers decoupled from model and persistence details.

pub mod notebook_service;
