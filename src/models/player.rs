//! Player identity and membership.

use crate::models::scope::Scope;
use serde::{Deserialize, Serialize};

/// Unique identifier for a player, handed out by the store's player sequence.
pub type PlayerId = u64;

/// A registered player. Immutable once created; names need not be unique.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Registration of a player into a tournament scope (at most one per pair).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub player_id: PlayerId,
    pub scope: Scope,
}
