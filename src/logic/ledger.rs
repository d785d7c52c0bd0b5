//! Standings ledger: applies match outcomes and produces the ranked view.

use crate::models::{
    Outcome, PlayerId, Scope, Standing, StandingsEntry, TournamentError, TournamentResult,
};
use crate::store::{StoreRead, StoreTx};
use std::cmp::Ordering;

/// Apply one outcome to the (player, scope) entry and return the new entry.
///
/// `Outcome::New` creates the entry (or zeroes an existing one); every other
/// outcome requires the entry to exist. The whole row is written in one update.
pub fn apply_result(
    tx: &mut impl StoreTx,
    player_id: PlayerId,
    scope: &Scope,
    outcome: Outcome,
) -> TournamentResult<StandingsEntry> {
    match tx.standing(player_id, scope)? {
        Some(mut entry) => {
            entry.apply(outcome);
            tx.update_standing(entry.clone())?;
            Ok(entry)
        }
        None if outcome == Outcome::New => {
            let entry = StandingsEntry::zeroed(player_id, scope.clone());
            tx.insert_standing(entry.clone())?;
            Ok(entry)
        }
        None => Err(TournamentError::UnknownPlayer {
            player_id,
            scope: scope.clone(),
        }),
    }
}

/// Netscore descending, then wins descending, then player id ascending.
///
/// Player ids are unique within a scope, so this is a total order.
pub fn rank_order(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    b.netscore
        .cmp(&a.netscore)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Standings of `scope`, ranked by [`rank_order`].
pub fn ordered_standings(store: &impl StoreRead, scope: &Scope) -> TournamentResult<Vec<Standing>> {
    let mut entries = store.standings(scope)?;
    entries.sort_by(rank_order);
    entries
        .into_iter()
        .map(|e| -> TournamentResult<Standing> {
            let player = store
                .player(e.player_id)?
                .ok_or_else(|| TournamentError::UnknownPlayer {
                    player_id: e.player_id,
                    scope: scope.clone(),
                })?;
            Ok(Standing {
                player_id: e.player_id,
                name: player.name,
                wins: e.wins,
                ties: e.ties,
                losses: e.losses,
                matches: e.matches,
                netscore: e.netscore,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NetScore, Player};
    use crate::store::{MemoryStore, Store};

    fn entry(player_id: PlayerId, wins: u32, ties: u32, losses: u32) -> StandingsEntry {
        StandingsEntry {
            player_id,
            scope: Scope::Global,
            matches: wins + ties + losses,
            wins,
            ties,
            losses,
            netscore: NetScore::from_record(wins, ties, losses),
        }
    }

    #[test]
    fn apply_requires_existing_entry() {
        let store = MemoryStore::new();
        let mut tx = store.begin().unwrap();
        assert!(matches!(
            apply_result(&mut tx, 7, &Scope::Global, Outcome::Win),
            Err(TournamentError::UnknownPlayer { player_id: 7, .. })
        ));
        apply_result(&mut tx, 7, &Scope::Global, Outcome::New).unwrap();
        let e = apply_result(&mut tx, 7, &Scope::Global, Outcome::Tie).unwrap();
        assert_eq!((e.matches, e.ties, e.netscore.half_points()), (1, 1, 1));
        assert_eq!(tx.standing(7, &Scope::Global).unwrap(), Some(e));
    }

    #[test]
    fn new_outcome_zeroes_existing_entry() {
        let store = MemoryStore::new();
        let mut tx = store.begin().unwrap();
        apply_result(&mut tx, 1, &Scope::Global, Outcome::New).unwrap();
        apply_result(&mut tx, 1, &Scope::Global, Outcome::Loss).unwrap();
        let e = apply_result(&mut tx, 1, &Scope::Global, Outcome::New).unwrap();
        assert_eq!(e, StandingsEntry::zeroed(1, Scope::Global));
    }

    #[test]
    fn rank_order_breaks_ties_by_wins_then_id() {
        // 2 wins + 2 losses + 2 ties = 1.0, same as 1 win; more wins ranks first.
        let mut entries = vec![
            entry(5, 1, 0, 0),
            entry(3, 2, 2, 2),
            entry(4, 0, 1, 0),
            entry(2, 0, 1, 0),
        ];
        entries.sort_by(rank_order);
        let ids: Vec<PlayerId> = entries.iter().map(|e| e.player_id).collect();
        assert_eq!(ids, vec![3, 5, 2, 4]);
    }

    #[test]
    fn ordered_standings_joins_names() {
        let store = MemoryStore::new();
        let mut tx = store.begin().unwrap();
        for (id, name) in [(1, "Ann"), (2, "Bob")] {
            tx.insert_player(Player::new(id, name)).unwrap();
            apply_result(&mut tx, id, &Scope::Global, Outcome::New).unwrap();
        }
        apply_result(&mut tx, 2, &Scope::Global, Outcome::Win).unwrap();
        let standings = ordered_standings(&tx, &Scope::Global).unwrap();
        assert_eq!(standings[0].name, "Bob");
        assert_eq!(standings[0].netscore.as_f64(), 1.0);
        assert_eq!(standings[1].name, "Ann");
    }
}
