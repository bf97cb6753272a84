use repbook::db::{create_memory_pool, DbPool};
use repbook::migrations::run_migrations_for_tests;
use repbook::models::{PlanDraft, SessionEntry, SetInput};
use repbook::repositories::{ExerciseRepository, PlanRepository, RecordRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

/// Fresh database with the preset catalog imported.
pub async fn seeded_test_db() -> DbPool {
    let pool = setup_test_db();
    repbook::seed::import_preset_exercises(&pool)
        .await
        .expect("Failed to import preset catalog");
    pool
}

pub async fn exercise_id(pool: &DbPool, name: &str) -> i64 {
    ExerciseRepository::new(pool.clone())
        .find_by_name(name)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("exercise {name:?} not found"))
        .id
}

pub async fn create_test_plan(pool: &DbPool, name: &str, exercise_ids: &[i64]) -> i64 {
    PlanRepository::new(pool.clone())
        .save_plan(
            &PlanDraft {
                name: name.to_string(),
                exercise_ids: exercise_ids.to_vec(),
            },
            None,
        )
        .await
        .unwrap()
}

pub async fn record_at(
    pool: &DbPool,
    date: &str,
    workout_id: i64,
    entries: &[SessionEntry],
) -> String {
    RecordRepository::new(pool.clone())
        .record_session_at(date.to_string(), workout_id, entries)
        .await
        .unwrap()
}

pub fn entry(exercise_id: i64, sets: Vec<SetInput>) -> SessionEntry {
    SessionEntry { exercise_id, sets }
}

pub fn sets(weight_reps: &[(f64, i64)]) -> Vec<SetInput> {
    weight_reps
        .iter()
        .map(|&(weight, reps)| SetInput::new(weight, reps))
        .collect()
}
