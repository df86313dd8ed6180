//! Database models for user identities and the score-event log.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// Registered user database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    username: String,
    created_at: NaiveDateTime,
}

/// Insertable user model for registration.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    username: String,
}

/// One immutable score event. Rows are appended, never updated.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::score_events)]
pub struct ScoreEvent {
    id: i32,
    game: String,
    outcome: String,
    recorded_at: NaiveDateTime,
}

/// Insertable score event.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::score_events)]
pub struct NewScoreEvent {
    game: String,
    outcome: String,
}
