//! Scope resolution: which tournament (or the global pool) an operation targets.

use crate::models::{Scope, TournamentResult};
use crate::store::StoreTx;

/// Resolve a tournament id to its scope, creating the scope on first use.
///
/// `None` resolves to the global pool. Re-resolving an existing id is a no-op.
pub fn resolve_scope(tx: &mut impl StoreTx, id: Option<&str>) -> TournamentResult<Scope> {
    let scope = Scope::from_id(id);
    if tx.insert_scope(&scope)? {
        log::debug!("Created {}", scope);
    }
    Ok(scope)
}
