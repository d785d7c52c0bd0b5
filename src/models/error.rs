//! Errors surfaced by tournament operations.

use crate::models::player::PlayerId;
use crate::models::scope::Scope;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// The player has no standings entry (or does not exist) in the scope.
    UnknownPlayer { player_id: PlayerId, scope: Scope },
    /// The player is already registered in the scope.
    DuplicateRegistration { player_id: PlayerId, scope: Scope },
    /// Winner and loser are the same player.
    SelfMatch(PlayerId),
    /// Pairing needs an even field; the count is the number of ranked players.
    OddPlayerCount(usize),
    /// Player names must not be blank.
    EmptyPlayerName,
    /// A roster row could not be used (1-based line number).
    InvalidRoster { line: u64, reason: String },
    /// Writing an export (e.g. standings CSV) failed.
    ExportFailed(String),
    /// The persistent store failed; not recoverable locally.
    StoreUnavailable(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::UnknownPlayer { player_id, scope } => {
                write!(f, "Player {} is not registered in {}", player_id, scope)
            }
            TournamentError::DuplicateRegistration { player_id, scope } => {
                write!(f, "Player {} is already registered in {}", player_id, scope)
            }
            TournamentError::SelfMatch(id) => write!(f, "Player {} cannot play against themselves", id),
            TournamentError::OddPlayerCount(n) => {
                write!(f, "Cannot pair an odd number of players ({})", n)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::InvalidRoster { line, reason } => {
                write!(f, "Invalid roster at line {}: {}", line, reason)
            }
            TournamentError::ExportFailed(reason) => write!(f, "Export failed: {}", reason),
            TournamentError::StoreUnavailable(reason) => write!(f, "Store unavailable: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Result alias used throughout the crate.
pub type TournamentResult<T> = Result<T, TournamentError>;
