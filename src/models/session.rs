use serde::{Deserialize, Serialize};

use super::EquipmentType;

/// A set as read back for display. Missing numeric fields coalesce to
/// zero; left/right stay absent unless the set was logged per limb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub half_reps: i64,
    pub left_reps: Option<i64>,
    pub right_reps: Option<i64>,
}

/// Every set logged for one exercise within a session. `exercise` fields
/// are None when the exercise was deleted after the session was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExercise {
    pub exercise_id: Option<i64>,
    pub exercise_name: Option<String>,
    pub equipment_type: Option<EquipmentType>,
    pub is_isolation: bool,
    pub sets: Vec<SetEntry>,
}

/// One performed session in a history listing. `workout_name` is None
/// when the plan was deleted after the session was logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub date: String,
    pub workout_id: i64,
    pub workout_name: Option<String>,
}

/// A month bucket of the history screen: "2024-03" keyed, human labeled,
/// sessions newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGroup {
    pub key: String,
    pub label: String,
    pub sessions: Vec<SessionSummary>,
}

/// The most recent prior session's sets for one exercise: the "ghost"
/// shown next to a fresh input form for progressive-overload comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviousPerformance {
    pub date: String,
    pub workout_id: i64,
    pub sets: Vec<SetEntry>,
}
