//! Swiss tournament organizer: library with models, store seam and business logic.

pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use logic::{
    apply_result, count_players, delete_matches, delete_players, enroll_player, is_registered,
    next_round_pairings, ordered_standings, rank_order, read_roster, register_player,
    report_match, resolve_scope, write_standings,
};
pub use models::{
    Match, MatchNumber, Membership, NetScore, Outcome, Pairing, Player, PlayerId, Scope, Standing,
    StandingsEntry, TournamentError, TournamentId, TournamentResult,
};
pub use service::SwissTournament;
pub use store::{MemoryStore, Store, StoreRead, StoreTx};
