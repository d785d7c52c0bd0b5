//! Data structures for the Swiss tournament: players, scopes, matches, standings.

mod error;
mod game;
mod player;
mod scope;
mod standings;

pub use error::{TournamentError, TournamentResult};
pub use game::{Match, MatchNumber, Outcome};
pub use player::{Membership, Player, PlayerId};
pub use scope::{Scope, TournamentId};
pub use standings::{NetScore, Pairing, Standing, StandingsEntry};
