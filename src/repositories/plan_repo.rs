use rusqlite::{params, OptionalExtension};

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::grouping::group_ordered;
use crate::models::{
    EquipmentType, FromSqliteRow, PlanDraft, PlanExercise, Workout, WorkoutWithExercises,
};

#[derive(Clone)]
pub struct PlanRepository {
    pool: DbPool,
}

struct PlanRow {
    workout_id: i64,
    workout_name: String,
    exercise: Option<PlanExercise>,
}

impl PlanRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ?")?;
            let result = stmt.query_row([id], Workout::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// All plans, most recently created first, each with its exercises in
    /// stored order. The LEFT JOIN keeps plans with no exercises in the
    /// listing.
    pub async fn list_with_exercises(&self) -> Result<Vec<WorkoutWithExercises>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT
                    w.id AS workout_id,
                    w.name AS workout_name,
                    e.id AS exercise_id,
                    e.name AS exercise_name,
                    e.equipment_type,
                    e.is_isolation
                 FROM workouts w
                 LEFT JOIN workout_exercises we ON w.id = we.workout_id
                 LEFT JOIN exercises e ON we.exercise_id = e.id
                 ORDER BY w.id DESC, we.exercise_order ASC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    let exercise = match row.get::<_, Option<i64>>("exercise_id")? {
                        Some(exercise_id) => {
                            let equipment: Option<String> = row.get("equipment_type")?;
                            Some(PlanExercise {
                                exercise_id,
                                name: row.get("exercise_name")?,
                                equipment_type: equipment
                                    .as_deref()
                                    .and_then(EquipmentType::parse),
                                is_isolation: row
                                    .get::<_, Option<bool>>("is_isolation")?
                                    .unwrap_or(false),
                            })
                        }
                        None => None,
                    };
                    Ok(PlanRow {
                        workout_id: row.get("workout_id")?,
                        workout_name: row.get("workout_name")?,
                        exercise,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(group_ordered(
                rows,
                |row| row.workout_id,
                |row| WorkoutWithExercises {
                    id: row.workout_id,
                    name: row.workout_name.clone(),
                    exercises: Vec::new(),
                },
                |group, row| {
                    if let Some(exercise) = row.exercise {
                        group.exercises.push(exercise);
                    }
                },
            ))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Create a plan, or replace an existing plan's name and exercise
    /// list in one transaction. Editing keeps the workout's id, so every
    /// record already logged against the plan stays reachable. The
    /// association rows are fully rewritten with `exercise_order` taken
    /// from list position; any failure rolls the whole save back.
    pub async fn save_plan(&self, draft: &PlanDraft, editing_id: Option<i64>) -> Result<i64> {
        let pool = self.pool.clone();
        let draft = draft.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let workout_id = match editing_id {
                Some(id) => {
                    let updated =
                        tx.execute("UPDATE workouts SET name = ? WHERE id = ?", params![draft.name, id])?;
                    if updated == 0 {
                        return Err(AppError::NotFound(format!("workout {id}")));
                    }
                    tx.execute("DELETE FROM workout_exercises WHERE workout_id = ?", [id])?;
                    id
                }
                None => {
                    tx.execute("INSERT INTO workouts (name) VALUES (?)", [&draft.name])?;
                    tx.last_insert_rowid()
                }
            };

            {
                let mut stmt = tx.prepare(
                    "INSERT INTO workout_exercises (workout_id, exercise_id, exercise_order)
                     VALUES (?, ?, ?)",
                )?;
                for (position, exercise_id) in draft.exercise_ids.iter().enumerate() {
                    stmt.execute(params![workout_id, exercise_id, position as i64])?;
                }
            }

            tx.commit()?;
            Ok(workout_id)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Remove a plan. The cascade clears its association rows; logged
    /// records are kept, so history outlives the plan.
    pub async fn delete_plan(&self, workout_id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workouts WHERE id = ?", [workout_id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;
    use crate::models::EquipmentType;
    use crate::repositories::ExerciseRepository;

    async fn setup() -> (DbPool, PlanRepository, Vec<i64>) {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");

        let exercises = ExerciseRepository::new(pool.clone());
        let mut ids = Vec::new();
        for name in ["Bench Press", "Overhead Press", "Squat"] {
            let ex = exercises
                .create_custom(name, "misc", EquipmentType::FreeWeight, false)
                .await
                .unwrap();
            ids.push(ex.id);
        }

        (pool.clone(), PlanRepository::new(pool), ids)
    }

    #[tokio::test]
    async fn test_save_plan_keeps_submitted_order() {
        let (_pool, repo, ids) = setup().await;

        let draft = PlanDraft {
            name: "Push Day".to_string(),
            exercise_ids: vec![ids[2], ids[0], ids[1]],
        };
        repo.save_plan(&draft, None).await.unwrap();

        let plans = repo.list_with_exercises().await.unwrap();
        assert_eq!(plans.len(), 1);
        let listed: Vec<i64> = plans[0].exercises.iter().map(|e| e.exercise_id).collect();
        assert_eq!(listed, vec![ids[2], ids[0], ids[1]]);
    }

    #[tokio::test]
    async fn test_list_orders_newest_plan_first() {
        let (_pool, repo, ids) = setup().await;

        let first = repo
            .save_plan(
                &PlanDraft { name: "A".into(), exercise_ids: vec![ids[0]] },
                None,
            )
            .await
            .unwrap();
        let second = repo
            .save_plan(
                &PlanDraft { name: "B".into(), exercise_ids: vec![ids[1]] },
                None,
            )
            .await
            .unwrap();

        let plans = repo.list_with_exercises().await.unwrap();
        assert_eq!(plans[0].id, second);
        assert_eq!(plans[1].id, first);
    }

    #[tokio::test]
    async fn test_empty_plan_still_listed() {
        let (_pool, repo, _ids) = setup().await;

        let id = repo
            .save_plan(
                &PlanDraft { name: "Rest Day".into(), exercise_ids: vec![] },
                None,
            )
            .await
            .unwrap();

        let plans = repo.list_with_exercises().await.unwrap();
        assert_eq!(plans[0].id, id);
        assert!(plans[0].exercises.is_empty());
    }

    #[tokio::test]
    async fn test_edit_keeps_id() {
        let (_pool, repo, ids) = setup().await;

        let id = repo
            .save_plan(
                &PlanDraft { name: "Push Day".into(), exercise_ids: vec![ids[0], ids[1]] },
                None,
            )
            .await
            .unwrap();

        let edited = repo
            .save_plan(
                &PlanDraft { name: "Push Day v2".into(), exercise_ids: vec![ids[1]] },
                Some(id),
            )
            .await
            .unwrap();

        assert_eq!(edited, id);
        let plans = repo.list_with_exercises().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Push Day v2");
        assert_eq!(plans[0].exercises.len(), 1);

        let workout = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(workout.name, "Push Day v2");
    }

    #[tokio::test]
    async fn test_edit_missing_plan_is_not_found() {
        let (_pool, repo, ids) = setup().await;

        let err = repo
            .save_plan(
                &PlanDraft { name: "Ghost".into(), exercise_ids: vec![ids[0]] },
                Some(999),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.list_with_exercises().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_exercise_rolls_back_whole_plan() {
        let (_pool, repo, ids) = setup().await;

        let err = repo
            .save_plan(
                &PlanDraft {
                    name: "Doubled".into(),
                    exercise_ids: vec![ids[0], ids[0]],
                },
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        // The workout row must not survive the failed association insert.
        assert!(repo.list_with_exercises().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_plan_cascades_associations() {
        let (pool, repo, ids) = setup().await;

        let id = repo
            .save_plan(
                &PlanDraft { name: "Push Day".into(), exercise_ids: vec![ids[0]] },
                None,
            )
            .await
            .unwrap();

        assert!(repo.delete_plan(id).await.unwrap());
        assert!(!repo.delete_plan(id).await.unwrap());

        let conn = pool.get().unwrap();
        let remaining: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM workout_exercises WHERE workout_id = ?",
                [id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
