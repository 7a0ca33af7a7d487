//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls behind the form-layer gates.
//! - Keep FFI/CLI layers decoupled from storage details.

pub mod medley_service;
pub mod scenting_service;
