//! Bulk resets for administrators: clear results, or clear everything.

use crate::models::{Scope, TournamentResult};
use crate::store::StoreTx;

/// Remove the matches of `scope` (all scopes for `None`) and zero the standings.
///
/// Players and memberships stay. Clearing every scope also restarts match numbering.
pub fn delete_matches(tx: &mut impl StoreTx, scope: Option<&Scope>) -> TournamentResult<()> {
    tx.delete_matches(scope)?;
    tx.zero_standings(scope)?;
    match scope {
        Some(scope) => log::info!("Deleted matches of {}", scope),
        None => {
            tx.reset_match_sequence()?;
            log::info!("Deleted all matches");
        }
    }
    Ok(())
}

/// Remove matches, standings and memberships of `scope`, and the scope itself.
///
/// With `None` every player, scope and sequence is reset as well.
pub fn delete_players(tx: &mut impl StoreTx, scope: Option<&Scope>) -> TournamentResult<()> {
    tx.delete_matches(scope)?;
    tx.delete_standings(scope)?;
    tx.delete_memberships(scope)?;
    tx.delete_scopes(scope)?;
    match scope {
        Some(scope) => log::info!("Deleted players of {}", scope),
        None => {
            tx.delete_all_players()?;
            tx.reset_player_sequence()?;
            tx.reset_match_sequence()?;
            log::info!("Deleted all players");
        }
    }
    Ok(())
}
