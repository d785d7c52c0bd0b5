//! Persistent store seam.
//!
//! The core logic only talks to these traits. A [`Store`] hands out read
//! snapshots and write transactions; a transaction is published by
//! [`StoreTx::commit`] and rolled back when dropped uncommitted, which is how
//! a match report (one match row plus two standings rows) stays atomic.
//!
//! [`MemoryStore`] is the in-process adapter shipped with the crate.

mod memory;

pub use memory::{MemoryReader, MemoryStore, MemoryTx, Tables};

use crate::models::{
    Match, MatchNumber, Membership, Player, PlayerId, Scope, StandingsEntry, TournamentResult,
};

/// Read access to one consistent view of the store.
pub trait StoreRead {
    fn player(&self, player_id: PlayerId) -> TournamentResult<Option<Player>>;

    /// Total number of player identities, across all scopes.
    fn player_count(&self) -> TournamentResult<usize>;

    /// The global scope always exists.
    fn scope_exists(&self, scope: &Scope) -> TournamentResult<bool>;

    fn is_member(&self, player_id: PlayerId, scope: &Scope) -> TournamentResult<bool>;

    fn member_count(&self, scope: &Scope) -> TournamentResult<usize>;

    fn standing(&self, player_id: PlayerId, scope: &Scope)
        -> TournamentResult<Option<StandingsEntry>>;

    /// Standings entries of one scope, in no particular order.
    fn standings(&self, scope: &Scope) -> TournamentResult<Vec<StandingsEntry>>;

    /// Matches of one scope (all scopes for `None`), ordered by match number.
    fn matches(&self, scope: Option<&Scope>) -> TournamentResult<Vec<Match>>;
}

/// A write transaction. Reads observe the transaction's own staged writes.
pub trait StoreTx: StoreRead {
    fn next_player_id(&mut self) -> TournamentResult<PlayerId>;

    fn next_match_number(&mut self) -> TournamentResult<MatchNumber>;

    /// Restart the player id sequence at 1.
    fn reset_player_sequence(&mut self) -> TournamentResult<()>;

    /// Restart the match number sequence at 1.
    fn reset_match_sequence(&mut self) -> TournamentResult<()>;

    fn insert_player(&mut self, player: Player) -> TournamentResult<()>;

    fn delete_all_players(&mut self) -> TournamentResult<()>;

    /// Returns false when the scope already existed.
    fn insert_scope(&mut self, scope: &Scope) -> TournamentResult<bool>;

    /// Remove one tournament scope (all of them for `None`).
    fn delete_scopes(&mut self, scope: Option<&Scope>) -> TournamentResult<()>;

    fn insert_membership(&mut self, membership: Membership) -> TournamentResult<()>;

    fn delete_memberships(&mut self, scope: Option<&Scope>) -> TournamentResult<()>;

    fn insert_standing(&mut self, entry: StandingsEntry) -> TournamentResult<()>;

    /// Replace an existing entry keyed by (player, scope).
    fn update_standing(&mut self, entry: StandingsEntry) -> TournamentResult<()>;

    /// Zero every entry of the scope (all scopes for `None`) in one step.
    fn zero_standings(&mut self, scope: Option<&Scope>) -> TournamentResult<()>;

    fn delete_standings(&mut self, scope: Option<&Scope>) -> TournamentResult<()>;

    fn insert_match(&mut self, game: Match) -> TournamentResult<()>;

    fn delete_matches(&mut self, scope: Option<&Scope>) -> TournamentResult<()>;

    /// Publish every staged write at once.
    fn commit(self) -> TournamentResult<()>
    where
        Self: Sized;
}

/// Entry point to a persistent store, held for the process lifetime.
pub trait Store: Send + Sync {
    type Reader<'a>: StoreRead
    where
        Self: 'a;
    type Tx<'a>: StoreTx
    where
        Self: 'a;

    /// Consistent read snapshot; never observes a half-applied transaction.
    fn read(&self) -> TournamentResult<Self::Reader<'_>>;

    /// Open a write transaction. Transactions are serialized against each other.
    fn begin(&self) -> TournamentResult<Self::Tx<'_>>;
}
