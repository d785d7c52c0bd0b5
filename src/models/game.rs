//! Match records and the per-player outcome of a match.

use crate::models::player::PlayerId;
use crate::models::scope::Scope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequence number of a reported match.
pub type MatchNumber = u64;

/// What a single match (or registration) means for one player's standings entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    /// Fresh registration: entry is (re)set to all zeros.
    New,
}

/// A reported match. Append-only; only bulk resets remove it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub number: MatchNumber,
    pub scope: Scope,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    /// None iff the match was a tie.
    pub winner: Option<PlayerId>,
    pub reported_at: DateTime<Utc>,
}

impl Match {
    /// `player_1` beat `player_2`.
    pub fn decisive(number: MatchNumber, scope: Scope, winner: PlayerId, loser: PlayerId) -> Self {
        Self {
            number,
            scope,
            player_1: winner,
            player_2: loser,
            winner: Some(winner),
            reported_at: Utc::now(),
        }
    }

    pub fn tie(number: MatchNumber, scope: Scope, player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            number,
            scope,
            player_1,
            player_2,
            winner: None,
            reported_at: Utc::now(),
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}
