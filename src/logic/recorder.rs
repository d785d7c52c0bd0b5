//! Match recorder: validates a result, appends the match, updates both entries.

use crate::logic::ledger::apply_result;
use crate::logic::registry::is_registered;
use crate::models::{Match, Outcome, PlayerId, Scope, TournamentError, TournamentResult};
use crate::store::StoreTx;

/// Record `winner` beating `loser` (or a tie between them) in `scope`.
///
/// Runs inside the caller's transaction: the match row and both standings
/// updates are committed together or not at all.
pub fn report_match(
    tx: &mut impl StoreTx,
    winner: PlayerId,
    loser: PlayerId,
    scope: &Scope,
    is_tie: bool,
) -> TournamentResult<Match> {
    for player_id in [winner, loser] {
        if !is_registered(&*tx, player_id, scope)? {
            return Err(TournamentError::UnknownPlayer {
                player_id,
                scope: scope.clone(),
            });
        }
    }
    if winner == loser {
        return Err(TournamentError::SelfMatch(winner));
    }

    let number = tx.next_match_number()?;
    let (game, winner_outcome, loser_outcome) = if is_tie {
        (
            Match::tie(number, scope.clone(), winner, loser),
            Outcome::Tie,
            Outcome::Tie,
        )
    } else {
        (
            Match::decisive(number, scope.clone(), winner, loser),
            Outcome::Win,
            Outcome::Loss,
        )
    };
    tx.insert_match(game.clone())?;
    apply_result(tx, winner, scope, winner_outcome)?;
    apply_result(tx, loser, scope, loser_outcome)?;

    if is_tie {
        log::info!("Match {} in {}: {} tied {}", number, scope, winner, loser);
    } else {
        log::info!("Match {} in {}: {} beat {}", number, scope, winner, loser);
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::registry::register_player;
    use crate::store::{MemoryStore, Store, StoreRead};

    #[test]
    fn win_and_tie_update_both_players() {
        let store = MemoryStore::new();
        let scope = Scope::Tournament("t".to_string());
        let mut tx = store.begin().unwrap();
        let a = register_player(&mut tx, "A", &scope).unwrap();
        let b = register_player(&mut tx, "B", &scope).unwrap();

        let first = report_match(&mut tx, a, b, &scope, false).unwrap();
        assert_eq!(first.winner, Some(a));
        let second = report_match(&mut tx, b, a, &scope, true).unwrap();
        assert!(second.is_tie());
        assert_eq!(second.number, first.number + 1);

        let ea = tx.standing(a, &scope).unwrap().unwrap();
        let eb = tx.standing(b, &scope).unwrap().unwrap();
        assert_eq!((ea.matches, ea.wins, ea.ties, ea.losses), (2, 1, 1, 0));
        assert_eq!((eb.matches, eb.wins, eb.ties, eb.losses), (2, 0, 1, 1));
        assert_eq!(ea.netscore.as_f64(), 1.5);
        assert_eq!(eb.netscore.as_f64(), -0.5);
        assert!(ea.is_consistent() && eb.is_consistent());
        assert_eq!(tx.matches(Some(&scope)).unwrap().len(), 2);
    }

    #[test]
    fn rejects_unknown_and_self_matches_without_writing() {
        let store = MemoryStore::new();
        let scope = Scope::Tournament("t".to_string());
        let other = Scope::Tournament("other".to_string());
        let mut tx = store.begin().unwrap();
        let a = register_player(&mut tx, "A", &scope).unwrap();
        let b = register_player(&mut tx, "B", &other).unwrap();

        assert_eq!(
            report_match(&mut tx, a, b, &scope, false),
            Err(TournamentError::UnknownPlayer {
                player_id: b,
                scope: scope.clone()
            })
        );
        assert_eq!(
            report_match(&mut tx, a, a, &scope, false),
            Err(TournamentError::SelfMatch(a))
        );
        assert!(tx.matches(None).unwrap().is_empty());
        assert_eq!(tx.standing(a, &scope).unwrap().unwrap().matches, 0);
    }
}
