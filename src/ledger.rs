//! Append-only score ledger with serialized writes.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, instrument};

use crate::db::{ArbiterRepository, DbError, NewScoreEvent, ScoreEvent};
use crate::games::{GameKind, OutcomeKind};

/// Per-game, per-outcome counts derived from the event log.
pub type LedgerCounts = BTreeMap<String, BTreeMap<String, i64>>;

/// Score ledger over the append-only event store.
///
/// Writes are serialized through a single-writer lock so concurrent
/// `record` calls never lose an increment. Reads go straight to the store
/// and may observe a count that is momentarily stale relative to an
/// in-flight write.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    repository: ArbiterRepository,
    write_lock: Arc<Mutex<()>>,
}

impl ScoreLedger {
    /// Creates a ledger over the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: ArbiterRepository) -> Self {
        info!("Creating ScoreLedger");
        Self {
            repository,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Appends one score event.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the append fails; the event is then not
    /// recorded at all.
    #[instrument(skip(self))]
    pub fn record(&self, game: GameKind, outcome: OutcomeKind) -> Result<ScoreEvent, DbError> {
        debug!(game = %game, outcome = %outcome, "Recording score event");
        // A poisoned lock means another writer panicked mid-append; the
        // store itself is still consistent, so keep writing.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.repository
            .insert_event(NewScoreEvent::new(game.to_string(), outcome.to_string()))
    }

    /// Returns the current count of events matching (game, outcome).
    ///
    /// Monotonically non-decreasing over time for a fixed pair.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn aggregate(&self, game: GameKind, outcome: OutcomeKind) -> Result<i64, DbError> {
        self.repository
            .count_events(&game.to_string(), &outcome.to_string())
    }

    /// Returns event counts grouped by game and outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn counts(&self) -> Result<LedgerCounts, DbError> {
        let mut counts = LedgerCounts::new();
        for (game, outcome, count) in self.repository.counts_by_game_and_outcome()? {
            counts.entry(game).or_default().insert(outcome, count);
        }
        Ok(counts)
    }
}
