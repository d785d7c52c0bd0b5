//! In-process store: tables behind an `RwLock`, optional JSON snapshot file.
//!
//! A write transaction holds the write guard for its whole lifetime and works
//! on a staged copy of the tables; commit swaps the copy in. Dropping the
//! transaction without committing discards the copy.

use crate::models::{
    Match, MatchNumber, Membership, Player, PlayerId, Scope, StandingsEntry, TournamentError,
    TournamentId, TournamentResult,
};
use crate::store::{Store, StoreRead, StoreTx};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// All rows held by the memory store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "TablesFile", into = "TablesFile")]
pub struct Tables {
    players: BTreeMap<PlayerId, Player>,
    scopes: BTreeSet<TournamentId>,
    memberships: BTreeSet<(Scope, PlayerId)>,
    standings: BTreeMap<(Scope, PlayerId), StandingsEntry>,
    matches: Vec<Match>,
    next_player_id: PlayerId,
    next_match_number: MatchNumber,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            players: BTreeMap::new(),
            scopes: BTreeSet::new(),
            memberships: BTreeSet::new(),
            standings: BTreeMap::new(),
            matches: Vec::new(),
            next_player_id: 1,
            next_match_number: 1,
        }
    }
}

/// On-disk shape of [`Tables`]: flat row lists (JSON maps cannot have tuple keys).
#[derive(Serialize, Deserialize)]
struct TablesFile {
    players: Vec<Player>,
    scopes: Vec<TournamentId>,
    memberships: Vec<Membership>,
    standings: Vec<StandingsEntry>,
    matches: Vec<Match>,
    next_player_id: PlayerId,
    next_match_number: MatchNumber,
}

impl From<TablesFile> for Tables {
    fn from(file: TablesFile) -> Self {
        Self {
            players: file.players.into_iter().map(|p| (p.id, p)).collect(),
            scopes: file.scopes.into_iter().collect(),
            memberships: file
                .memberships
                .into_iter()
                .map(|m| (m.scope, m.player_id))
                .collect(),
            standings: file
                .standings
                .into_iter()
                .map(|e| ((e.scope.clone(), e.player_id), e))
                .collect(),
            matches: file.matches,
            next_player_id: file.next_player_id,
            next_match_number: file.next_match_number,
        }
    }
}

impl From<Tables> for TablesFile {
    fn from(tables: Tables) -> Self {
        Self {
            players: tables.players.into_values().collect(),
            scopes: tables.scopes.into_iter().collect(),
            memberships: tables
                .memberships
                .into_iter()
                .map(|(scope, player_id)| Membership { player_id, scope })
                .collect(),
            standings: tables.standings.into_values().collect(),
            matches: tables.matches,
            next_player_id: tables.next_player_id,
            next_match_number: tables.next_match_number,
        }
    }
}

fn in_scope(filter: Option<&Scope>, scope: &Scope) -> bool {
    filter.map_or(true, |f| f == scope)
}

impl StoreRead for Tables {
    fn player(&self, player_id: PlayerId) -> TournamentResult<Option<Player>> {
        Ok(self.players.get(&player_id).cloned())
    }

    fn player_count(&self) -> TournamentResult<usize> {
        Ok(self.players.len())
    }

    fn scope_exists(&self, scope: &Scope) -> TournamentResult<bool> {
        Ok(match scope {
            Scope::Global => true,
            Scope::Tournament(id) => self.scopes.contains(id),
        })
    }

    fn is_member(&self, player_id: PlayerId, scope: &Scope) -> TournamentResult<bool> {
        Ok(self.memberships.contains(&(scope.clone(), player_id)))
    }

    fn member_count(&self, scope: &Scope) -> TournamentResult<usize> {
        Ok(self.memberships.iter().filter(|(s, _)| s == scope).count())
    }

    fn standing(
        &self,
        player_id: PlayerId,
        scope: &Scope,
    ) -> TournamentResult<Option<StandingsEntry>> {
        Ok(self.standings.get(&(scope.clone(), player_id)).cloned())
    }

    fn standings(&self, scope: &Scope) -> TournamentResult<Vec<StandingsEntry>> {
        Ok(self
            .standings
            .values()
            .filter(|e| &e.scope == scope)
            .cloned()
            .collect())
    }

    fn matches(&self, scope: Option<&Scope>) -> TournamentResult<Vec<Match>> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| in_scope(scope, &m.scope))
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.number);
        Ok(matches)
    }
}

impl Tables {
    /// Every standings entry must satisfy the aggregate invariant and name a known player.
    fn validate(&self) -> Result<(), String> {
        for entry in self.standings.values() {
            if !entry.is_consistent() {
                return Err(format!(
                    "inconsistent standings for player {} in {}",
                    entry.player_id, entry.scope
                ));
            }
            if !self.players.contains_key(&entry.player_id) {
                return Err(format!(
                    "standings for unknown player {} in {}",
                    entry.player_id, entry.scope
                ));
            }
        }
        Ok(())
    }

    fn next_player_id(&mut self) -> PlayerId {
        let id = self.next_player_id;
        self.next_player_id += 1;
        id
    }

    fn next_match_number(&mut self) -> MatchNumber {
        let number = self.next_match_number;
        self.next_match_number += 1;
        number
    }

    fn insert_scope(&mut self, scope: &Scope) -> bool {
        match scope {
            Scope::Global => false,
            Scope::Tournament(id) => self.scopes.insert(id.clone()),
        }
    }

    fn delete_scopes(&mut self, scope: Option<&Scope>) {
        match scope {
            Some(Scope::Tournament(id)) => {
                self.scopes.remove(id);
            }
            Some(Scope::Global) => {}
            None => self.scopes.clear(),
        }
    }

    fn update_standing(&mut self, entry: StandingsEntry) -> TournamentResult<()> {
        match self.standings.get_mut(&(entry.scope.clone(), entry.player_id)) {
            Some(row) => {
                *row = entry;
                Ok(())
            }
            None => Err(TournamentError::UnknownPlayer {
                player_id: entry.player_id,
                scope: entry.scope,
            }),
        }
    }

    fn zero_standings(&mut self, scope: Option<&Scope>) {
        self.standings
            .values_mut()
            .filter(|e| in_scope(scope, &e.scope))
            .for_each(StandingsEntry::reset);
    }
}

/// In-memory [`Store`], optionally mirrored to a JSON file on every commit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Empty store, memory only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by a snapshot file: loaded now if it exists, rewritten on each commit.
    pub fn open(path: impl Into<PathBuf>) -> TournamentResult<Self> {
        let path = path.into();
        let tables = if path.exists() {
            let bytes = std::fs::read(&path).map_err(|e| {
                TournamentError::StoreUnavailable(format!("read {}: {}", path.display(), e))
            })?;
            let tables: Tables = serde_json::from_slice(&bytes).map_err(|e| {
                TournamentError::StoreUnavailable(format!("parse {}: {}", path.display(), e))
            })?;
            tables.validate().map_err(|reason| {
                TournamentError::StoreUnavailable(format!("load {}: {}", path.display(), reason))
            })?;
            log::info!(
                "Loaded {} player(s) and {} match(es) from {}",
                tables.players.len(),
                tables.matches.len(),
                path.display()
            );
            tables
        } else {
            Tables::default()
        };
        Ok(Self {
            tables: RwLock::new(tables),
            snapshot_path: Some(path),
        })
    }
}

fn lock_error<T>(_: T) -> TournamentError {
    TournamentError::StoreUnavailable("lock error".to_string())
}

/// Write to a sibling temp file then rename, so a crash never leaves half a snapshot.
fn write_snapshot(path: &Path, tables: &Tables) -> TournamentResult<()> {
    let json = serde_json::to_vec_pretty(tables)
        .map_err(|e| TournamentError::StoreUnavailable(format!("serialize snapshot: {}", e)))?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)
        .and_then(|()| std::fs::rename(&tmp, path))
        .map_err(|e| {
            log::warn!("Snapshot write to {} failed: {}", path.display(), e);
            TournamentError::StoreUnavailable(format!("write {}: {}", path.display(), e))
        })
}

impl Store for MemoryStore {
    type Reader<'a> = MemoryReader<'a>;
    type Tx<'a> = MemoryTx<'a>;

    fn read(&self) -> TournamentResult<MemoryReader<'_>> {
        let tables = self.tables.read().map_err(lock_error)?;
        Ok(MemoryReader { tables })
    }

    fn begin(&self) -> TournamentResult<MemoryTx<'_>> {
        let guard = self.tables.write().map_err(lock_error)?;
        let staged = guard.clone();
        Ok(MemoryTx {
            guard,
            staged,
            snapshot_path: self.snapshot_path.as_deref(),
        })
    }
}

/// Shared read guard over the committed tables.
pub struct MemoryReader<'a> {
    tables: RwLockReadGuard<'a, Tables>,
}

impl StoreRead for MemoryReader<'_> {
    fn player(&self, player_id: PlayerId) -> TournamentResult<Option<Player>> {
        self.tables.player(player_id)
    }

    fn player_count(&self) -> TournamentResult<usize> {
        self.tables.player_count()
    }

    fn scope_exists(&self, scope: &Scope) -> TournamentResult<bool> {
        self.tables.scope_exists(scope)
    }

    fn is_member(&self, player_id: PlayerId, scope: &Scope) -> TournamentResult<bool> {
        self.tables.is_member(player_id, scope)
    }

    fn member_count(&self, scope: &Scope) -> TournamentResult<usize> {
        self.tables.member_count(scope)
    }

    fn standing(
        &self,
        player_id: PlayerId,
        scope: &Scope,
    ) -> TournamentResult<Option<StandingsEntry>> {
        self.tables.standing(player_id, scope)
    }

    fn standings(&self, scope: &Scope) -> TournamentResult<Vec<StandingsEntry>> {
        self.tables.standings(scope)
    }

    fn matches(&self, scope: Option<&Scope>) -> TournamentResult<Vec<Match>> {
        self.tables.matches(scope)
    }
}

/// Exclusive write transaction over a staged copy of the tables.
pub struct MemoryTx<'a> {
    guard: RwLockWriteGuard<'a, Tables>,
    staged: Tables,
    snapshot_path: Option<&'a Path>,
}

impl StoreRead for MemoryTx<'_> {
    fn player(&self, player_id: PlayerId) -> TournamentResult<Option<Player>> {
        self.staged.player(player_id)
    }

    fn player_count(&self) -> TournamentResult<usize> {
        self.staged.player_count()
    }

    fn scope_exists(&self, scope: &Scope) -> TournamentResult<bool> {
        self.staged.scope_exists(scope)
    }

    fn is_member(&self, player_id: PlayerId, scope: &Scope) -> TournamentResult<bool> {
        self.staged.is_member(player_id, scope)
    }

    fn member_count(&self, scope: &Scope) -> TournamentResult<usize> {
        self.staged.member_count(scope)
    }

    fn standing(
        &self,
        player_id: PlayerId,
        scope: &Scope,
    ) -> TournamentResult<Option<StandingsEntry>> {
        self.staged.standing(player_id, scope)
    }

    fn standings(&self, scope: &Scope) -> TournamentResult<Vec<StandingsEntry>> {
        self.staged.standings(scope)
    }

    fn matches(&self, scope: Option<&Scope>) -> TournamentResult<Vec<Match>> {
        self.staged.matches(scope)
    }
}

impl StoreTx for MemoryTx<'_> {
    fn next_player_id(&mut self) -> TournamentResult<PlayerId> {
        Ok(self.staged.next_player_id())
    }

    fn next_match_number(&mut self) -> TournamentResult<MatchNumber> {
        Ok(self.staged.next_match_number())
    }

    fn reset_player_sequence(&mut self) -> TournamentResult<()> {
        self.staged.next_player_id = 1;
        Ok(())
    }

    fn reset_match_sequence(&mut self) -> TournamentResult<()> {
        self.staged.next_match_number = 1;
        Ok(())
    }

    fn insert_player(&mut self, player: Player) -> TournamentResult<()> {
        self.staged.players.insert(player.id, player);
        Ok(())
    }

    fn delete_all_players(&mut self) -> TournamentResult<()> {
        self.staged.players.clear();
        Ok(())
    }

    fn insert_scope(&mut self, scope: &Scope) -> TournamentResult<bool> {
        Ok(self.staged.insert_scope(scope))
    }

    fn delete_scopes(&mut self, scope: Option<&Scope>) -> TournamentResult<()> {
        self.staged.delete_scopes(scope);
        Ok(())
    }

    fn insert_membership(&mut self, membership: Membership) -> TournamentResult<()> {
        self.staged
            .memberships
            .insert((membership.scope, membership.player_id));
        Ok(())
    }

    fn delete_memberships(&mut self, scope: Option<&Scope>) -> TournamentResult<()> {
        self.staged.memberships.retain(|(s, _)| !in_scope(scope, s));
        Ok(())
    }

    fn insert_standing(&mut self, entry: StandingsEntry) -> TournamentResult<()> {
        self.staged
            .standings
            .insert((entry.scope.clone(), entry.player_id), entry);
        Ok(())
    }

    fn update_standing(&mut self, entry: StandingsEntry) -> TournamentResult<()> {
        self.staged.update_standing(entry)
    }

    fn zero_standings(&mut self, scope: Option<&Scope>) -> TournamentResult<()> {
        self.staged.zero_standings(scope);
        Ok(())
    }

    fn delete_standings(&mut self, scope: Option<&Scope>) -> TournamentResult<()> {
        self.staged.standings.retain(|(s, _), _| !in_scope(scope, s));
        Ok(())
    }

    fn insert_match(&mut self, game: Match) -> TournamentResult<()> {
        self.staged.matches.push(game);
        Ok(())
    }

    fn delete_matches(&mut self, scope: Option<&Scope>) -> TournamentResult<()> {
        self.staged.matches.retain(|m| !in_scope(scope, &m.scope));
        Ok(())
    }

    fn commit(self) -> TournamentResult<()> {
        let MemoryTx {
            mut guard,
            staged,
            snapshot_path,
        } = self;
        if let Some(path) = snapshot_path {
            write_snapshot(path, &staged)?;
        }
        *guard = staged;
        Ok(())
    }
}
