//! Public API: one store transaction per call.

use crate::logic;
use crate::models::{
    Match, Pairing, Player, PlayerId, Scope, Standing, TournamentError, TournamentResult,
};
use crate::store::{Store, StoreRead, StoreTx};
use std::io;

/// Swiss tournament organizer over an injected [`Store`].
///
/// Scope arguments are tournament ids. For registration, results, standings
/// and pairings `None` means the global pool; for counting and the bulk
/// resets it means "every scope".
#[derive(Debug, Default)]
pub struct SwissTournament<S> {
    store: S,
}

impl<S: Store> SwissTournament<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new player; returns the fresh player id.
    ///
    /// Not idempotent: retrying after a store failure may register twice.
    pub fn register_player(&self, name: &str, scope: Option<&str>) -> TournamentResult<PlayerId> {
        let mut tx = self.store.begin()?;
        let scope = logic::resolve_scope(&mut tx, scope)?;
        let player_id = logic::register_player(&mut tx, name, &scope)?;
        tx.commit()?;
        Ok(player_id)
    }

    /// Register an existing player into another scope.
    pub fn enroll_player(&self, player_id: PlayerId, scope: Option<&str>) -> TournamentResult<()> {
        let mut tx = self.store.begin()?;
        let scope = logic::resolve_scope(&mut tx, scope)?;
        logic::enroll_player(&mut tx, player_id, &scope)?;
        tx.commit()
    }

    /// Register every name of a CSV roster, all or nothing.
    pub fn import_roster<R: io::Read>(
        &self,
        roster: R,
        scope: Option<&str>,
    ) -> TournamentResult<Vec<PlayerId>> {
        let names = logic::read_roster(roster)?;
        let mut tx = self.store.begin()?;
        let scope = logic::resolve_scope(&mut tx, scope)?;
        let ids = names
            .iter()
            .map(|name| logic::register_player(&mut tx, name, &scope))
            .collect::<TournamentResult<Vec<_>>>()?;
        tx.commit()?;
        log::info!("Imported {} player(s) into {}", ids.len(), scope);
        Ok(ids)
    }

    pub fn player(&self, player_id: PlayerId) -> TournamentResult<Player> {
        self.store
            .read()?
            .player(player_id)?
            .ok_or(TournamentError::UnknownPlayer {
                player_id,
                scope: Scope::Global,
            })
    }

    /// Members of the tournament, or every registered player for `None`.
    pub fn count_players(&self, scope: Option<&str>) -> TournamentResult<usize> {
        let scope = scope.map(|id| Scope::from_id(Some(id)));
        logic::count_players(&self.store.read()?, scope.as_ref())
    }

    /// Record a result: `winner` beat `loser`, or they tied when `is_tie`.
    pub fn report_match(
        &self,
        winner: PlayerId,
        loser: PlayerId,
        scope: Option<&str>,
        is_tie: bool,
    ) -> TournamentResult<Match> {
        let scope = Scope::from_id(scope);
        let mut tx = self.store.begin()?;
        let game = logic::report_match(&mut tx, winner, loser, &scope, is_tie)?;
        tx.commit()?;
        Ok(game)
    }

    /// Ranked standings: netscore, then wins, then player id.
    pub fn player_standings(&self, scope: Option<&str>) -> TournamentResult<Vec<Standing>> {
        logic::ordered_standings(&self.store.read()?, &Scope::from_id(scope))
    }

    pub fn swiss_pairings(&self, scope: Option<&str>) -> TournamentResult<Vec<Pairing>> {
        logic::next_round_pairings(&self.store.read()?, &Scope::from_id(scope))
    }

    /// Matches of the tournament (all tournaments for `None`) in reporting order.
    pub fn match_history(&self, scope: Option<&str>) -> TournamentResult<Vec<Match>> {
        let scope = scope.map(|id| Scope::from_id(Some(id)));
        self.store.read()?.matches(scope.as_ref())
    }

    pub fn export_standings<W: io::Write>(&self, scope: Option<&str>, writer: W) -> TournamentResult<()> {
        let standings = self.player_standings(scope)?;
        logic::write_standings(writer, &standings)
    }

    pub fn delete_matches(&self, scope: Option<&str>) -> TournamentResult<()> {
        let scope = scope.map(|id| Scope::from_id(Some(id)));
        let mut tx = self.store.begin()?;
        logic::delete_matches(&mut tx, scope.as_ref())?;
        tx.commit()
    }

    pub fn delete_players(&self, scope: Option<&str>) -> TournamentResult<()> {
        let scope = scope.map(|id| Scope::from_id(Some(id)));
        let mut tx = self.store.begin()?;
        logic::delete_players(&mut tx, scope.as_ref())?;
        tx.commit()
    }
}
