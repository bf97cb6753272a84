use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{EquipmentType, Exercise, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
            let result = stmt.query_row([id], Exercise::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE name = ?")?;
            let result = stmt.query_row([&name], Exercise::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The exercise picker's ordering: custom exercises first, then the
    /// catalog by muscle group and name.
    pub async fn find_all(&self) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM exercises ORDER BY is_custom DESC, muscle_group ASC, name ASC",
            )?;
            let exercises = stmt
                .query_map([], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_muscle_group(&self, muscle_group: &str) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        let muscle_group = muscle_group.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM exercises WHERE muscle_group = ? ORDER BY name")?;
            let exercises = stmt
                .query_map([&muscle_group], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Add a user-defined exercise. A name collision with any existing
    /// exercise (preset or custom) comes back as `DuplicateName` so the
    /// caller can tell the user, not as a generic failure.
    pub async fn create_custom(
        &self,
        name: &str,
        muscle_group: &str,
        equipment_type: EquipmentType,
        is_isolation: bool,
    ) -> Result<Exercise> {
        let pool = self.pool.clone();
        let name = name.to_string();
        let muscle_group = muscle_group.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let result = conn.execute(
                "INSERT INTO exercises (name, muscle_group, equipment_type, is_custom, is_isolation)
                 VALUES (?, ?, ?, 1, ?)",
                rusqlite::params![name, muscle_group, equipment_type.as_str(), is_isolation],
            );
            match result {
                Ok(_) => Ok(Exercise {
                    id: conn.last_insert_rowid(),
                    name,
                    muscle_group: Some(muscle_group),
                    equipment_type: Some(equipment_type),
                    is_custom: true,
                    is_isolation,
                }),
                Err(err) if is_unique_violation(&err) => Err(AppError::DuplicateName(name)),
                Err(err) => Err(err.into()),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a custom exercise. The `is_custom = 1` predicate lives in
    /// the SQL, so a preset id is a no-op no matter what the caller
    /// passes. Records referencing the exercise keep their rows with the
    /// reference set to null.
    pub async fn delete_custom(&self, id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM exercises WHERE id = ? AND is_custom = 1",
                [id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
