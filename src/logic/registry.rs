//! Player registry: identities, memberships and their opening standings entry.

use crate::logic::ledger::apply_result;
use crate::models::{
    Membership, Outcome, Player, PlayerId, Scope, TournamentError, TournamentResult,
};
use crate::store::{StoreRead, StoreTx};

/// Create a new player with a fresh id and register them into `scope`.
pub fn register_player(
    tx: &mut impl StoreTx,
    name: &str,
    scope: &Scope,
) -> TournamentResult<PlayerId> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyPlayerName);
    }
    let player_id = tx.next_player_id()?;
    tx.insert_player(Player::new(player_id, name))?;
    enroll_player(tx, player_id, scope)?;
    log::info!("Registered player {} ({}) in {}", player_id, name, scope);
    Ok(player_id)
}

/// Register an existing player into `scope` with a zeroed standings entry.
pub fn enroll_player(
    tx: &mut impl StoreTx,
    player_id: PlayerId,
    scope: &Scope,
) -> TournamentResult<()> {
    if tx.player(player_id)?.is_none() {
        return Err(TournamentError::UnknownPlayer {
            player_id,
            scope: scope.clone(),
        });
    }
    if is_registered(&*tx, player_id, scope)? {
        return Err(TournamentError::DuplicateRegistration {
            player_id,
            scope: scope.clone(),
        });
    }
    if !scope.is_global() {
        tx.insert_membership(Membership {
            player_id,
            scope: scope.clone(),
        })?;
    }
    apply_result(tx, player_id, scope, Outcome::New)?;
    Ok(())
}

/// Tournament scopes track membership; the global pool has only standings entries.
pub fn is_registered(
    store: &impl StoreRead,
    player_id: PlayerId,
    scope: &Scope,
) -> TournamentResult<bool> {
    match scope {
        Scope::Global => Ok(store.standing(player_id, scope)?.is_some()),
        Scope::Tournament(_) => store.is_member(player_id, scope),
    }
}

/// Players registered in `scope`, or every player identity for `None`.
pub fn count_players(store: &impl StoreRead, scope: Option<&Scope>) -> TournamentResult<usize> {
    match scope {
        None => store.player_count(),
        Some(scope @ Scope::Global) => Ok(store.standings(scope)?.len()),
        Some(scope) => store.member_count(scope),
    }
}
