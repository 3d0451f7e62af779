//! Use-case services over the client repository.
//!
//! # Responsibility
//! - Keep callers decoupled from storage details.
//! - Emit audit-style log events for client mutations.

pub mod client_service;
