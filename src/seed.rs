//! Preset exercise catalog and its one-time import.

use crate::db::DbPool;
use crate::error::{AppError, Result};

/// One catalog entry, inserted verbatim at first launch.
#[derive(Debug, Clone, Copy)]
pub struct PresetExercise {
    pub name: &'static str,
    pub muscle_group: &'static str,
    pub equipment_type: &'static str,
    pub is_isolation: bool,
}

const fn preset(
    name: &'static str,
    muscle_group: &'static str,
    equipment_type: &'static str,
) -> PresetExercise {
    PresetExercise {
        name,
        muscle_group,
        equipment_type,
        is_isolation: false,
    }
}

/// Dumbbell and single-limb movements logged with independent left/right
/// rep counts.
const fn isolation(
    name: &'static str,
    muscle_group: &'static str,
    equipment_type: &'static str,
) -> PresetExercise {
    PresetExercise {
        name,
        muscle_group,
        equipment_type,
        is_isolation: true,
    }
}

pub const PRESET_EXERCISES: &[PresetExercise] = &[
    // --- CHEST ---
    preset("Bench Press", "chest", "free-weight"),
    preset("Incline Bench Press", "chest", "free-weight"),
    preset("Decline Bench Press", "chest", "free-weight"),
    preset("Dumbbell Chest Press", "chest", "free-weight"),
    preset("Incline Dumbbell Press", "chest", "free-weight"),
    preset("Dumbbell Chest Fly", "chest", "free-weight"),
    preset("Machine Chest Press", "chest", "machine"),
    preset("Machine Chest Fly", "chest", "machine"),
    preset("Pec Deck", "chest", "machine"),
    preset("Cable Chest Press", "chest", "machine"),
    preset("Push-Up", "chest", "bodyweight"),
    preset("Dips", "chest", "bodyweight"),
    // --- BACK ---
    preset("Deadlift", "back", "free-weight"),
    preset("Pull-Up", "back", "bodyweight"),
    preset("Chin-Up", "back", "bodyweight"),
    preset("Lat Pulldown", "back", "machine"),
    preset("Close-Grip Lat Pulldown", "back", "machine"),
    isolation("Single-Arm Lat Pulldown", "back", "machine"),
    preset("Straight Arm Pulldown", "back", "machine"),
    preset("Barbell Row", "back", "free-weight"),
    isolation("Dumbbell Row", "back", "free-weight"),
    preset("Seated Cable Row", "back", "machine"),
    preset("T-Bar Row", "back", "free-weight"),
    preset("Bent Over Row", "back", "free-weight"),
    preset("Meadows Row", "back", "free-weight"),
    preset("Chest-Supported Row", "back", "machine"),
    preset("Inverted Row", "back", "bodyweight"),
    preset("Back Extension", "back", "bodyweight"),
    preset("Dumbbell Shrugs", "back", "free-weight"),
    preset("Barbell Shrugs", "back", "free-weight"),
    preset("Rack Pulls", "back", "free-weight"),
    // --- SHOULDERS ---
    preset("Overhead Press", "shoulders", "free-weight"),
    preset("Dumbbell Shoulder Press", "shoulders", "free-weight"),
    preset("Arnold Press", "shoulders", "free-weight"),
    isolation("Dumbbell Lateral Raise", "shoulders", "free-weight"),
    isolation("Dumbbell Front Raise", "shoulders", "free-weight"),
    isolation("Dumbbell Rear Delt Row", "shoulders", "free-weight"),
    preset("Face Pull", "shoulders", "machine"),
    preset("Reverse Pec Deck", "shoulders", "machine"),
    preset("Cable Lateral Raise", "shoulders", "machine"),
    preset("Machine Shoulder Press", "shoulders", "machine"),
    preset("Push Press", "shoulders", "free-weight"),
    preset("Upright Row", "shoulders", "free-weight"),
    // --- ARMS ---
    preset("Barbell Curl", "arms", "free-weight"),
    isolation("Dumbbell Curl", "arms", "free-weight"),
    isolation("Hammer Curl", "arms", "free-weight"),
    isolation("Incline Dumbbell Curl", "arms", "free-weight"),
    preset("Preacher Curl", "arms", "free-weight"),
    preset("Spider Curl", "arms", "free-weight"),
    isolation("Concentration Curl", "arms", "free-weight"),
    preset("Cable Curl", "arms", "machine"),
    preset("Machine Bicep Curl", "arms", "machine"),
    preset("Tricep Pushdown (Bar)", "arms", "machine"),
    preset("Tricep Pushdown (Rope)", "arms", "machine"),
    preset("Skull Crushers", "arms", "free-weight"),
    preset("Overhead Cable Extension", "arms", "machine"),
    preset("Dumbbell Overhead Extension", "arms", "free-weight"),
    preset("Close-Grip Bench Press", "arms", "free-weight"),
    preset("JM Press", "arms", "free-weight"),
    preset("Bench Dip", "arms", "bodyweight"),
    preset("Diamond Push-Up", "arms", "bodyweight"),
    // --- LEGS ---
    preset("Squat", "legs", "free-weight"),
    preset("Front Squat", "legs", "free-weight"),
    preset("Leg Press", "legs", "machine"),
    preset("Leg Extension", "legs", "machine"),
    preset("Lying Leg Curl", "legs", "machine"),
    preset("Seated Leg Curl", "legs", "machine"),
    preset("Romanian Deadlift", "legs", "free-weight"),
    isolation("Bulgarian Split Squat", "legs", "free-weight"),
    preset("Goblet Squat", "legs", "free-weight"),
    isolation("Lunges", "legs", "free-weight"),
    preset("Hack Squat", "legs", "machine"),
    isolation("Step-Ups", "legs", "free-weight"),
    preset("Sissy Squat", "legs", "bodyweight"),
    preset("Sumo Squat", "legs", "free-weight"),
    // --- GLUTES ---
    preset("Hip Thrust", "glutes", "free-weight"),
    preset("Glute Bridge", "glutes", "free-weight"),
    isolation("Cable Glute Kickback", "glutes", "machine"),
    preset("Hip Abduction Machine", "glutes", "machine"),
    // --- ABS ---
    preset("Plank", "abs", "bodyweight"),
    preset("Crunch", "abs", "bodyweight"),
    preset("Leg Raise", "abs", "bodyweight"),
    preset("Hanging Leg Raise", "abs", "bodyweight"),
    preset("Cable Crunch", "abs", "machine"),
    preset("Russian Twist", "abs", "free-weight"),
    preset("Bicycle Crunch", "abs", "bodyweight"),
    preset("Dead Bug", "abs", "bodyweight"),
    preset("Ab Wheel Rollout", "abs", "free-weight"),
    preset("Pallof Press", "abs", "machine"),
    preset("Woodchoppers", "abs", "machine"),
    // --- CALVES ---
    preset("Standing Calf Raise", "calves", "machine"),
    preset("Seated Calf Raise", "calves", "machine"),
    preset("Calf Raise in Leg Press", "calves", "machine"),
    // --- FOREARMS ---
    preset("Barbell Wrist Curl", "forearms", "free-weight"),
    preset("Farmers Walk", "forearms", "free-weight"),
];

/// Import the preset catalog. Skips outright when any exercise rows
/// already exist; the per-row INSERT OR IGNORE keeps the import
/// idempotent even without that early return. Returns how many rows were
/// inserted.
pub async fn import_preset_exercises(pool: &DbPool) -> Result<usize> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;

        let existing: i64 =
            conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
        if existing > 0 {
            tracing::debug!("Exercise catalog already imported, skipping");
            return Ok(0);
        }

        let tx = conn.transaction()?;
        let mut imported = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO exercises (name, muscle_group, equipment_type, is_isolation)
                 VALUES (?, ?, ?, ?)",
            )?;
            for ex in PRESET_EXERCISES {
                imported += stmt.execute(rusqlite::params![
                    ex.name,
                    ex.muscle_group,
                    ex.equipment_type,
                    ex.is_isolation,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!("{} preset exercises imported", imported);
        Ok(imported)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}
