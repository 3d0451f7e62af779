//! Client domain model.
//!
//! # Invariants
//! - `id` is assigned by the store on insertion and never changes afterwards.
//! - `birthday` is opaque text (observed `YYYYMMDD`); it is never parsed.

use serde::{Deserialize, Serialize};

/// Store-assigned client identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ClientId = i64;

/// Marker for a client that has not been persisted yet.
pub const UNASSIGNED_CLIENT_ID: ClientId = 0;

/// One row of the `clients` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    /// Full name.
    pub fio: String,
    pub login: String,
    pub birthday: String,
    pub email: String,
}

impl Client {
    /// Creates a not-yet-persisted client.
    pub fn new(
        fio: impl Into<String>,
        login: impl Into<String>,
        birthday: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_CLIENT_ID,
            fio: fio.into(),
            login: login.into(),
            birthday: birthday.into(),
            email: email.into(),
        }
    }

    /// Returns a copy carrying the given store identifier.
    pub fn with_id(mut self, id: ClientId) -> Self {
        self.id = id;
        self
    }

    /// Returns whether the store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_CLIENT_ID
    }
}
