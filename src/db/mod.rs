//! Database persistence layer for user identities and the score-event log.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

/// Embedded schema migrations, applied by [`ArbiterRepository::run_migrations`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub use error::{DbError, DbErrorKind};
pub use models::{NewScoreEvent, NewUser, ScoreEvent, User};
pub use repository::ArbiterRepository;
