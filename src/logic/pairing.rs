//! Pairing engine: adjacent players in the ranked standings meet next round.

use crate::logic::ledger::ordered_standings;
use crate::models::{Pairing, Scope, TournamentError, TournamentResult};
use crate::store::StoreRead;

/// Pair rank 1 with 2, 3 with 4, and so on.
///
/// The ranking is a total order, so unchanged standings always give the same
/// pairings. An odd field is an error; byes are not supported.
pub fn next_round_pairings(store: &impl StoreRead, scope: &Scope) -> TournamentResult<Vec<Pairing>> {
    let standings = ordered_standings(store, scope)?;
    if standings.len() % 2 != 0 {
        log::warn!(
            "Cannot pair {}: {} players registered",
            scope,
            standings.len()
        );
        return Err(TournamentError::OddPlayerCount(standings.len()));
    }

    let pairings: Vec<Pairing> = standings
        .chunks_exact(2)
        .map(|pair| Pairing {
            player_1: pair[0].player_id,
            name_1: pair[0].name.clone(),
            player_2: pair[1].player_id,
            name_2: pair[1].name.clone(),
        })
        .collect();
    log::debug!("Computed {} pairing(s) for {}", pairings.len(), scope);
    Ok(pairings)
}
