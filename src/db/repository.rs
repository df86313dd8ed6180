//! Database repository for user identities and score events.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, MIGRATIONS, NewScoreEvent, NewUser, ScoreEvent, User, schema};

/// Repository over the SQLite record store.
///
/// Connections are established per call; the store itself is owned by
/// SQLite, not by this type.
#[derive(Debug, Clone)]
pub struct ArbiterRepository {
    db_path: String,
}

impl ArbiterRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating ArbiterRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Query, format!("Migrations failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns a conflict [`DbError`] when the username is taken, or a
    /// query error otherwise.
    #[instrument(skip(self))]
    pub fn create_user(&self, username: String) -> Result<User, DbError> {
        debug!(username = %username, "Creating user");
        let mut conn = self.connection()?;

        let new_user = NewUser::new(username);

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), username = %user.username(), "User created");
        Ok(user)
    }

    /// Gets a user by username. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_name(&self, username: &str) -> Result<Option<User>, DbError> {
        debug!(username = %username, "Looking up user by name");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::username.eq(username))
            .first::<User>(&mut conn)
            .optional()?;

        Ok(user)
    }

    /// Appends one score event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, event), fields(game = %event.game(), outcome = %event.outcome()))]
    pub fn insert_event(&self, event: NewScoreEvent) -> Result<ScoreEvent, DbError> {
        debug!("Appending score event");
        let mut conn = self.connection()?;

        let recorded = diesel::insert_into(schema::score_events::table)
            .values(&event)
            .returning(ScoreEvent::as_returning())
            .get_result(&mut conn)?;

        info!(event_id = recorded.id(), "Score event recorded");
        Ok(recorded)
    }

    /// Counts score events matching a (game, outcome) pair.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count_events(&self, game: &str, outcome: &str) -> Result<i64, DbError> {
        debug!(game = %game, outcome = %outcome, "Counting score events");
        let mut conn = self.connection()?;

        let count = schema::score_events::table
            .filter(schema::score_events::game.eq(game))
            .filter(schema::score_events::outcome.eq(outcome))
            .count()
            .get_result(&mut conn)?;

        Ok(count)
    }

    /// Counts score events grouped by (game, outcome).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn counts_by_game_and_outcome(&self) -> Result<Vec<(String, String, i64)>, DbError> {
        debug!("Aggregating score events");
        let mut conn = self.connection()?;

        let counts = schema::score_events::table
            .group_by((schema::score_events::game, schema::score_events::outcome))
            .select((
                schema::score_events::game,
                schema::score_events::outcome,
                diesel::dsl::count_star(),
            ))
            .load::<(String, String, i64)>(&mut conn)?;

        info!(groups = counts.len(), "Score events aggregated");
        Ok(counts)
    }
}
