use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::grouping::group_ordered;
use crate::models::{
    EquipmentType, FromSqliteRow, MonthGroup, PreviousPerformance, Record, SessionEntry,
    SessionExercise, SessionSummary, SetEntry,
};

#[derive(Clone)]
pub struct RecordRepository {
    pool: DbPool,
}

/// Timestamp shared by every set of one recorded session. Fixed-width
/// RFC 3339 UTC with milliseconds, so the TEXT ordering the history
/// queries rely on is also chronological ordering.
fn session_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// "YYYY-MM" bucket key. Session timestamps are fixed-width, so the
/// prefix is the bucket.
fn month_key(date: &str) -> String {
    date.chars().take(7).collect()
}

fn month_label(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed.format("%B %Y").to_string(),
        Err(_) => month_key(date),
    }
}

fn insert_session_rows(
    conn: &Connection,
    date: &str,
    workout_id: i64,
    entries: &[SessionEntry],
) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO records
            (date, workout_id, exercise_id, weight, set_number, reps, half_reps, left_reps, right_reps)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )?;
    for entry in entries {
        // Set numbers come from list position, which keeps them
        // contiguous from 1 for every exercise.
        for (index, set) in entry.sets.iter().enumerate() {
            stmt.execute(params![
                date,
                workout_id,
                entry.exercise_id,
                set.weight,
                (index + 1) as i64,
                set.reps,
                set.half_reps,
                set.left_reps,
                set.right_reps,
            ])?;
        }
    }
    Ok(())
}

fn previous_performance_blocking(
    pool: &DbPool,
    exercise_id: i64,
) -> Result<Option<PreviousPerformance>> {
    let conn = pool.get()?;

    let last_date: Option<String> = conn.query_row(
        "SELECT MAX(date) FROM records WHERE exercise_id = ?",
        [exercise_id],
        |row| row.get(0),
    )?;
    let date = match last_date {
        Some(date) => date,
        None => return Ok(None),
    };

    // The exercise can appear in two plans on the same day; take the
    // lowest workout id so the result is deterministic.
    let workout_id: i64 = conn.query_row(
        "SELECT MIN(workout_id) FROM records WHERE exercise_id = ? AND date = ?",
        params![exercise_id, date],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT set_number, weight, reps, half_reps, left_reps, right_reps
         FROM records
         WHERE exercise_id = ? AND date = ? AND workout_id = ?
         ORDER BY set_number ASC",
    )?;
    let sets = stmt
        .query_map(params![exercise_id, date, workout_id], set_entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(PreviousPerformance { date, workout_id, sets }))
}

fn set_entry_from_row(row: &rusqlite::Row) -> rusqlite::Result<SetEntry> {
    Ok(SetEntry {
        set_number: row.get("set_number")?,
        weight: row.get::<_, Option<f64>>("weight")?.unwrap_or(0.0),
        reps: row.get::<_, Option<i64>>("reps")?.unwrap_or(0),
        half_reps: row.get::<_, Option<i64>>("half_reps")?.unwrap_or(0),
        left_reps: row.get("left_reps")?,
        right_reps: row.get("right_reps")?,
    })
}

struct DetailRow {
    exercise_id: Option<i64>,
    exercise_name: Option<String>,
    equipment_type: Option<EquipmentType>,
    is_isolation: bool,
    set: SetEntry,
}

impl RecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Log a full session right now: one shared timestamp for every set,
    /// one transaction for the whole write. Returns the session date.
    pub async fn record_session(
        &self,
        workout_id: i64,
        entries: &[SessionEntry],
    ) -> Result<String> {
        self.record_session_at(session_timestamp(), workout_id, entries)
            .await
    }

    /// Log a full session at an explicit timestamp (history backfill).
    /// The timestamp must be the fixed-width RFC 3339 form
    /// `record_session` writes, or the date-ordered queries will
    /// interleave it wrongly.
    pub async fn record_session_at(
        &self,
        date: String,
        workout_id: i64,
        entries: &[SessionEntry],
    ) -> Result<String> {
        let pool = self.pool.clone();
        let entries = entries.to_vec();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            insert_session_rows(&tx, &date, workout_id, &entries)?;
            tx.commit()?;
            Ok(date)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Replace every record of the `(date, workout)` session with the
    /// submitted list: a full overwrite inside one transaction, never a
    /// mix of old and new sets.
    pub async fn edit_session(
        &self,
        date: &str,
        workout_id: i64,
        entries: &[SessionEntry],
    ) -> Result<()> {
        let pool = self.pool.clone();
        let date = date.to_string();
        let entries = entries.to_vec();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM records WHERE date = ? AND workout_id = ?",
                params![date, workout_id],
            )?;
            insert_session_rows(&tx, &date, workout_id, &entries)?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete one session outright. Returns how many set rows went away.
    pub async fn delete_session(&self, date: &str, workout_id: i64) -> Result<usize> {
        let pool = self.pool.clone();
        let date = date.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let rows = tx.execute(
                "DELETE FROM records WHERE date = ? AND workout_id = ?",
                params![date, workout_id],
            )?;
            tx.commit()?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The raw stored rows of one session, in insertion order. The
    /// grouped `session_detail` is what screens want; this is the export
    /// and debugging view.
    pub async fn session_records(&self, date: &str, workout_id: i64) -> Result<Vec<Record>> {
        let pool = self.pool.clone();
        let date = date.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM records WHERE date = ? AND workout_id = ? ORDER BY id",
            )?;
            let rows = stmt
                .query_map(params![date, workout_id], Record::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// History listing: every performed session, bucketed by calendar
    /// month, months and sessions both newest first. Sessions whose plan
    /// was deleted keep their slot with no name.
    pub async fn sessions_by_month(&self) -> Result<Vec<MonthGroup>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT DISTINCT
                    r.date,
                    r.workout_id,
                    w.name AS workout_name
                 FROM records r
                 LEFT JOIN workouts w ON r.workout_id = w.id
                 ORDER BY r.date DESC",
            )?;
            let sessions = stmt
                .query_map([], |row| {
                    Ok(SessionSummary {
                        date: row.get("date")?,
                        workout_id: row.get("workout_id")?,
                        workout_name: row.get("workout_name")?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            // Rows arrive date-descending, so first-seen month order is
            // already newest first.
            Ok(group_ordered(
                sessions,
                |session| month_key(&session.date),
                |session| MonthGroup {
                    key: month_key(&session.date),
                    label: month_label(&session.date),
                    sessions: Vec::new(),
                },
                |group, session| group.sessions.push(session),
            ))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Everything logged in one session, grouped per exercise in the
    /// order the sets were written, sets ordered by set number. Sets
    /// whose exercise was deleted come back with no exercise attached.
    pub async fn session_detail(
        &self,
        date: &str,
        workout_id: i64,
    ) -> Result<Vec<SessionExercise>> {
        let pool = self.pool.clone();
        let date = date.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT
                    r.exercise_id,
                    e.name AS exercise_name,
                    e.equipment_type,
                    e.is_isolation,
                    r.set_number,
                    r.weight,
                    r.reps,
                    r.half_reps,
                    r.left_reps,
                    r.right_reps
                 FROM records r
                 LEFT JOIN exercises e ON r.exercise_id = e.id
                 WHERE r.date = ? AND r.workout_id = ?
                 ORDER BY r.id",
            )?;
            let rows = stmt
                .query_map(params![date, workout_id], |row| {
                    let equipment: Option<String> = row.get("equipment_type")?;
                    Ok(DetailRow {
                        exercise_id: row.get("exercise_id")?,
                        exercise_name: row.get("exercise_name")?,
                        equipment_type: equipment.as_deref().and_then(EquipmentType::parse),
                        is_isolation: row
                            .get::<_, Option<bool>>("is_isolation")?
                            .unwrap_or(false),
                        set: set_entry_from_row(row)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut exercises = group_ordered(
                rows,
                |row| row.exercise_id,
                |row| SessionExercise {
                    exercise_id: row.exercise_id,
                    exercise_name: row.exercise_name.clone(),
                    equipment_type: row.equipment_type,
                    is_isolation: row.is_isolation,
                    sets: Vec::new(),
                },
                |group, row| group.sets.push(row.set),
            );
            for exercise in &mut exercises {
                exercise.sets.sort_by_key(|set| set.set_number);
            }
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The "ghost" sets: everything lifted for this exercise in its most
    /// recent session. No history is an empty result, not an error.
    pub async fn previous_performance(
        &self,
        exercise_id: i64,
    ) -> Result<Option<PreviousPerformance>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || previous_performance_blocking(&pool, exercise_id))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Previous performance for a whole plan at once. Each lookup is
    /// read-only and independent of the others, so the batch fans out
    /// instead of awaiting serially.
    pub async fn previous_performance_all(
        &self,
        exercise_ids: &[i64],
    ) -> Result<Vec<(i64, Option<PreviousPerformance>)>> {
        let mut handles = Vec::with_capacity(exercise_ids.len());
        for &exercise_id in exercise_ids {
            let pool = self.pool.clone();
            handles.push((
                exercise_id,
                tokio::task::spawn_blocking(move || {
                    previous_performance_blocking(&pool, exercise_id)
                }),
            ));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (exercise_id, handle) in handles {
            let performance = handle
                .await
                .map_err(|e| AppError::Internal(e.to_string()))??;
            results.push((exercise_id, performance));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_timestamp_is_fixed_width_utc() {
        let ts = session_timestamp();
        // e.g. 2024-03-07T18:21:09.123Z
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_month_key_and_label() {
        assert_eq!(month_key("2024-03-07T18:21:09.123Z"), "2024-03");
        assert_eq!(month_label("2024-03-07T18:21:09.123Z"), "March 2024");
        // Unparseable dates fall back to the raw prefix.
        assert_eq!(month_label("garbage"), "garbage");
    }
}
