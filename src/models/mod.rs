pub mod exercise;
pub mod record;
pub mod session;
pub mod user_profile;
pub mod workout;

use rusqlite::Row;

pub use exercise::{EquipmentType, Exercise};
pub use record::{Record, SessionEntry, SetInput};
pub use session::{MonthGroup, PreviousPerformance, SessionExercise, SessionSummary, SetEntry};
pub use user_profile::{UserProfile, WeightUnit};
pub use workout::{PlanDraft, PlanExercise, Workout, WorkoutWithExercises};

/// Row-to-model mapping for rusqlite queries.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
