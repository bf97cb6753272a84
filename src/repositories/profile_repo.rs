use rusqlite::{params, OptionalExtension};

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, UserProfile, WeightUnit};

/// The profile is a configuration record, not an account table: exactly
/// one row, at a fixed id, regardless of how it got written.
const PROFILE_ROW_ID: i64 = 1;

#[derive(Clone)]
pub struct ProfileRepository {
    pool: DbPool,
}

impl ProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<UserProfile>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM user_profile WHERE id = ?")?;
            let result = stmt
                .query_row([PROFILE_ROW_ID], UserProfile::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Create or rename the profile. The stored weight unit survives a
    /// rename.
    pub async fn save(&self, first_name: &str, last_name: &str) -> Result<UserProfile> {
        let pool = self.pool.clone();
        let first_name = first_name.to_string();
        let last_name = last_name.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO user_profile (id, first_name, last_name)
                 VALUES (?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET
                    first_name = excluded.first_name,
                    last_name = excluded.last_name",
                params![PROFILE_ROW_ID, first_name, last_name],
            )?;
            let mut stmt = conn.prepare("SELECT * FROM user_profile WHERE id = ?")?;
            let profile = stmt.query_row([PROFILE_ROW_ID], UserProfile::from_row)?;
            Ok(profile)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The preferred unit for entering and showing weights. Defaults to
    /// kilograms until a profile exists.
    pub async fn weight_unit(&self) -> Result<WeightUnit> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let unit: Option<String> = conn
                .query_row(
                    "SELECT weight_unit FROM user_profile WHERE id = ?",
                    [PROFILE_ROW_ID],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(unit.as_deref().map(WeightUnit::parse).unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn set_weight_unit(&self, unit: WeightUnit) -> Result<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "UPDATE user_profile SET weight_unit = ? WHERE id = ?",
                params![unit.as_str(), PROFILE_ROW_ID],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Flip kg/lbs and persist, returning the new unit.
    pub async fn toggle_weight_unit(&self) -> Result<WeightUnit> {
        let next = self.weight_unit().await?.toggled();
        self.set_weight_unit(next).await?;
        Ok(next)
    }
}
