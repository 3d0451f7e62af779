//! Domain model for the client store.
//!
//! # Invariants
//! - Every persisted client is identified by a store-assigned `ClientId`.
//! - Deletion is a hard delete; identifiers are never reused.

pub mod client;
