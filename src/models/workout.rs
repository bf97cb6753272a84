use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{EquipmentType, FromSqliteRow};

/// A named, reusable plan ("Push Day"): a template, not a performed
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// One exercise slot of a plan, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExercise {
    pub exercise_id: i64,
    pub name: String,
    pub equipment_type: Option<EquipmentType>,
    pub is_isolation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    pub id: i64,
    pub name: String,
    pub exercises: Vec<PlanExercise>,
}

/// What the plan editor submits: a name and exercise ids in the order the
/// user arranged them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDraft {
    pub name: String,
    pub exercise_ids: Vec<i64>,
}
