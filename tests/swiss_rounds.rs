//! Integration tests for a Swiss round: registration, results, standings, pairings and resets.

use swiss_tournament::{
    MemoryStore, NetScore, Pairing, Standing, SwissTournament, TournamentError,
};

const T: Option<&str> = Some("T");

/// A, B, C, D registered into tournament T (ids 1-4).
fn tournament_with_four() -> SwissTournament<MemoryStore> {
    let t = SwissTournament::new(MemoryStore::new());
    for name in ["A", "B", "C", "D"] {
        t.register_player(name, T).unwrap();
    }
    t
}

fn ids(standings: &[Standing]) -> Vec<u64> {
    standings.iter().map(|s| s.player_id).collect()
}

fn assert_consistent(standings: &[Standing]) {
    for s in standings {
        assert_eq!(s.matches, s.wins + s.ties + s.losses, "{:?}", s);
        assert_eq!(s.netscore, NetScore::from_record(s.wins, s.ties, s.losses), "{:?}", s);
    }
}

#[test]
fn fresh_players_rank_by_id() {
    let t = tournament_with_four();
    assert_eq!(t.count_players(T).unwrap(), 4);
    let standings = t.player_standings(T).unwrap();
    assert_eq!(ids(&standings), vec![1, 2, 3, 4]);
    assert!(standings.iter().all(|s| s.netscore == NetScore::ZERO));
}

#[test]
fn win_moves_winner_ahead() {
    let t = tournament_with_four();
    t.report_match(1, 2, T, false).unwrap();
    let standings = t.player_standings(T).unwrap();
    let a = standings.iter().find(|s| s.player_id == 1).unwrap();
    let b = standings.iter().find(|s| s.player_id == 2).unwrap();
    assert_eq!((a.matches, a.wins, a.losses), (1, 1, 0));
    assert_eq!(a.netscore.as_f64(), 1.0);
    assert_eq!((b.matches, b.wins, b.losses), (1, 0, 1));
    assert_eq!(b.netscore.as_f64(), -1.0);
    let pos = |id| standings.iter().position(|s| s.player_id == id).unwrap();
    assert!(pos(1) < pos(2));
    assert_consistent(&standings);
}

#[test]
fn tie_gives_half_a_point_each() {
    let t = tournament_with_four();
    t.report_match(3, 4, T, true).unwrap();
    for s in t.player_standings(T).unwrap().iter().filter(|s| s.player_id > 2) {
        assert_eq!((s.matches, s.ties, s.wins, s.losses), (1, 1, 0, 0));
        assert_eq!(s.netscore.as_f64(), 0.5);
    }
}

#[test]
fn second_round_pairs_adjacent_players() {
    let t = tournament_with_four();
    t.report_match(1, 2, T, false).unwrap();
    t.report_match(3, 4, T, true).unwrap();

    let standings = t.player_standings(T).unwrap();
    assert_eq!(ids(&standings), vec![1, 3, 4, 2]);
    let scores: Vec<f64> = standings.iter().map(|s| s.netscore.as_f64()).collect();
    assert_eq!(scores, vec![1.0, 0.5, 0.5, -1.0]);
    assert_consistent(&standings);

    let pairings = t.swiss_pairings(T).unwrap();
    assert_eq!(
        pairings,
        vec![
            Pairing {
                player_1: 1,
                name_1: "A".to_string(),
                player_2: 3,
                name_2: "C".to_string(),
            },
            Pairing {
                player_1: 4,
                name_1: "D".to_string(),
                player_2: 2,
                name_2: "B".to_string(),
            },
        ]
    );
    assert_eq!(t.swiss_pairings(T).unwrap(), pairings);
}

#[test]
fn fifth_player_makes_pairing_fail() {
    let t = tournament_with_four();
    t.report_match(1, 2, T, false).unwrap();
    t.register_player("E", T).unwrap();
    assert_eq!(t.swiss_pairings(T), Err(TournamentError::OddPlayerCount(5)));
}

#[test]
fn resets_clear_results_then_players() {
    let t = tournament_with_four();
    t.report_match(1, 2, T, false).unwrap();
    t.report_match(3, 4, T, true).unwrap();

    t.delete_matches(T).unwrap();
    assert_eq!(t.count_players(T).unwrap(), 4);
    assert!(t.match_history(T).unwrap().is_empty());
    for s in t.player_standings(T).unwrap() {
        assert_eq!((s.matches, s.wins, s.ties, s.losses), (0, 0, 0, 0));
        assert_eq!(s.netscore, NetScore::ZERO);
    }

    t.delete_players(T).unwrap();
    assert_eq!(t.count_players(T).unwrap(), 0);
    assert!(t.player_standings(T).unwrap().is_empty());
    assert!(t.report_match(1, 2, T, false).is_err());
}

#[test]
fn duplicate_registration_leaves_entry_alone() {
    let t = tournament_with_four();
    t.report_match(1, 2, T, false).unwrap();
    assert_eq!(
        t.enroll_player(1, T),
        Err(TournamentError::DuplicateRegistration {
            player_id: 1,
            scope: swiss_tournament::Scope::Tournament("T".to_string()),
        })
    );
    let a = t.player_standings(T).unwrap().remove(0);
    assert_eq!((a.player_id, a.wins, a.matches), (1, 1, 1));
}

#[test]
fn tournaments_do_not_see_each_other() {
    let t = tournament_with_four();
    let x = t.register_player("X", Some("other")).unwrap();
    let y = t.register_player("Y", Some("other")).unwrap();
    t.report_match(x, y, Some("other"), false).unwrap();

    assert!(matches!(
        t.report_match(1, x, T, false),
        Err(TournamentError::UnknownPlayer { player_id, .. }) if player_id == x
    ));
    assert_eq!(t.match_history(T).unwrap().len(), 0);
    assert_eq!(t.match_history(Some("other")).unwrap().len(), 1);
    assert_eq!(t.match_history(None).unwrap().len(), 1);
    assert!(t.player_standings(T).unwrap().iter().all(|s| s.matches == 0));
    assert_eq!(t.swiss_pairings(Some("other")).unwrap().len(), 1);

    // The same player can carry separate records in two tournaments.
    t.enroll_player(x, T).unwrap();
    t.register_player("Z", T).unwrap();
    let in_t = t.player_standings(T).unwrap();
    assert_eq!(in_t.len(), 6);
    assert!(in_t.iter().all(|s| s.matches == 0));
}

#[test]
fn global_pool_is_its_own_scope() {
    let t = tournament_with_four();
    let g1 = t.register_player("G1", None).unwrap();
    let g2 = t.register_player("G2", None).unwrap();
    t.report_match(g2, g1, None, false).unwrap();

    let global = t.player_standings(None).unwrap();
    assert_eq!(ids(&global), vec![g2, g1]);
    assert_eq!(t.count_players(None).unwrap(), 6);
    assert_eq!(t.count_players(T).unwrap(), 4);

    t.delete_players(None).unwrap();
    assert_eq!(t.count_players(None).unwrap(), 0);
    assert_eq!(t.count_players(T).unwrap(), 0);
    assert_eq!(t.register_player("Again", None).unwrap(), 1);
}
