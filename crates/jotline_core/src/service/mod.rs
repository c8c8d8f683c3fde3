//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate line store calls and the action log into use-case APIs.
//! - Keep the command layer decoupled from storage details.

pub mod note_service;
