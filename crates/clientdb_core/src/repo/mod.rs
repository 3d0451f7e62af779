//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the client data access contract.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Repository APIs return a semantic `NotFound` distinct from store
//!   transport errors.

pub mod client_repo;
