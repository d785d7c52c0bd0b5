//! Tournament business logic: scopes, registration, standings, matches, pairings, resets.
//!
//! Every function works inside a store transaction (or read snapshot) handed
//! in by the caller; none of them commit.

mod ledger;
mod pairing;
mod recorder;
mod registry;
mod reset;
mod roster;
mod scope;

pub use ledger::{apply_result, ordered_standings, rank_order};
pub use pairing::next_round_pairings;
pub use recorder::report_match;
pub use registry::{count_players, enroll_player, is_registered, register_player};
pub use reset::{delete_matches, delete_players};
pub use roster::{read_roster, write_standings};
pub use scope::resolve_scope;
