//! Tournament scope: the isolation boundary for players, matches and standings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen tournament identifier.
pub type TournamentId = String;

/// Either the undivided global pool or one named tournament.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    Tournament(TournamentId),
}

impl Scope {
    /// `None` (or a blank id) means the global pool.
    pub fn from_id(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Scope::Tournament(id.to_string()),
            _ => Scope::Global,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Tournament(id) => write!(f, "tournament '{}'", id),
        }
    }
}
