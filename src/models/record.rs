use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// One logged set, as stored. Every record sharing a `(date, workout_id)`
/// pair belongs to the same performed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub date: String,
    pub workout_id: i64,
    /// Null when the exercise was deleted after the fact; the set itself
    /// is kept.
    pub exercise_id: Option<i64>,
    pub weight: Option<f64>,
    pub set_number: i64,
    pub reps: Option<i64>,
    pub half_reps: Option<i64>,
    pub left_reps: Option<i64>,
    pub right_reps: Option<i64>,
}

impl FromSqliteRow for Record {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            workout_id: row.get("workout_id")?,
            exercise_id: row.get("exercise_id")?,
            weight: row.get("weight")?,
            set_number: row.get("set_number")?,
            reps: row.get("reps")?,
            half_reps: row.get("half_reps")?,
            left_reps: row.get("left_reps")?,
            right_reps: row.get("right_reps")?,
        })
    }
}

/// One set as submitted by the input screen. `left_reps`/`right_reps` are
/// filled for isolation exercises and supersede `reps` for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetInput {
    pub weight: f64,
    pub reps: i64,
    pub half_reps: i64,
    pub left_reps: Option<i64>,
    pub right_reps: Option<i64>,
}

impl SetInput {
    pub fn new(weight: f64, reps: i64) -> Self {
        Self {
            weight,
            reps,
            half_reps: 0,
            left_reps: None,
            right_reps: None,
        }
    }
}

/// All submitted sets for one exercise within a session. Set numbers are
/// assigned from list position at write time, so they always run 1..=N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub exercise_id: i64,
    pub sets: Vec<SetInput>,
}
