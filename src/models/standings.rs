//! Standings entries, the half-point netscore, and the ranked/paired views.

use crate::models::game::Outcome;
use crate::models::player::PlayerId;
use crate::models::scope::Scope;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MAX_HALF_POINTS: i64 = 2 * u32::MAX as i64;

/// Netscore kept as an integer count of half-points (+2 win, -2 loss, +1 tie).
///
/// Comparisons and tie-breaks stay exact; the decimal form only appears at the
/// serialization boundary.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NetScore(i64);

impl NetScore {
    pub const ZERO: NetScore = NetScore(0);

    pub fn from_half_points(half_points: i64) -> Self {
        Self(half_points)
    }

    /// wins - losses + 0.5 * ties
    pub fn from_record(wins: u32, ties: u32, losses: u32) -> Self {
        Self(2 * i64::from(wins) + i64::from(ties) - 2 * i64::from(losses))
    }

    pub fn half_points(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl fmt::Display for NetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

impl Serialize for NetScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for NetScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let half_points = value * 2.0;
        if half_points.fract() != 0.0 || !half_points.is_finite() {
            return Err(serde::de::Error::custom(format!(
                "netscore {} is not a multiple of 0.5",
                value
            )));
        }
        // Any consistent record fits in +/- 2 * u32::MAX half-points.
        if half_points.abs() > MAX_HALF_POINTS as f64 {
            return Err(serde::de::Error::custom(format!(
                "netscore {} is out of range",
                value
            )));
        }
        Ok(Self(half_points as i64))
    }
}

/// Aggregate record of one player within one scope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub player_id: PlayerId,
    pub scope: Scope,
    pub matches: u32,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    pub netscore: NetScore,
}

impl StandingsEntry {
    /// Entry created at registration: everything zero.
    pub fn zeroed(player_id: PlayerId, scope: Scope) -> Self {
        Self {
            player_id,
            scope,
            matches: 0,
            wins: 0,
            ties: 0,
            losses: 0,
            netscore: NetScore::ZERO,
        }
    }

    /// Apply one outcome. Every field moves together so the invariants hold afterwards.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.matches += 1;
                self.wins += 1;
                self.netscore = NetScore(self.netscore.0 + 2);
            }
            Outcome::Loss => {
                self.matches += 1;
                self.losses += 1;
                self.netscore = NetScore(self.netscore.0 - 2);
            }
            Outcome::Tie => {
                self.matches += 1;
                self.ties += 1;
                self.netscore = NetScore(self.netscore.0 + 1);
            }
            Outcome::New => self.reset(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::zeroed(self.player_id, self.scope.clone());
    }

    /// matches = wins + ties + losses and netscore = wins - losses + 0.5 * ties.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.matches)
            == u64::from(self.wins) + u64::from(self.ties) + u64::from(self.losses)
            && self.netscore == NetScore::from_record(self.wins, self.ties, self.losses)
    }
}

/// One row of the ranked standings view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    pub matches: u32,
    pub netscore: NetScore,
}

/// Two adjacent-ranked players drawn against each other for the next round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub player_1: PlayerId,
    pub name_1: String,
    pub player_2: PlayerId,
    pub name_2: String,
}
