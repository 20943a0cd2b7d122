use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::ForecastError;
use crate::model::Scoreline;

pub mod models;
use models::{Accuracy, FeedbackRecord};

/// Append-only log of predicted-vs-actual match results.
///
/// Thread-safe SQLite handle (single connection behind a mutex): concurrent
/// appends serialize on the lock, and WAL mode gives readers a consistent
/// snapshot while a writer commits. Each `record` call is committed before it
/// returns.
#[derive(Clone)]
pub struct FeedbackStore {
    conn: Arc<Mutex<Connection>>,
}

impl FeedbackStore {
    /// Open (or create) the feedback database at the given path.
    pub fn open(path: &str) -> Result<Self, ForecastError> {
        let conn = Connection::open(path).map_err(ForecastError::StorageUnavailable)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(ForecastError::StorageUnavailable)?;
        let store = FeedbackStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.run_migrations()?;
        Ok(store)
    }

    /// Run schema migrations (idempotent).
    fn run_migrations(&self) -> Result<(), ForecastError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA_SQL)
            .map_err(ForecastError::StorageUnavailable)
    }

    /// Append one prediction outcome and return the stored record.
    ///
    /// Correctness is exact scoreline equality. The insert is durable before
    /// this returns; a failure surfaces as `StorageUnavailable` and leaves no
    /// partial record behind.
    pub fn record(
        &self,
        home_team: &str,
        away_team: &str,
        predicted: Scoreline,
        actual: Scoreline,
    ) -> Result<FeedbackRecord, ForecastError> {
        let correct = predicted == actual;
        let recorded_at = Utc::now();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO feedback (
                home_team, away_team,
                predicted_home, predicted_away,
                actual_home, actual_away,
                correct, recorded_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
            params![
                home_team,
                away_team,
                predicted.home,
                predicted.away,
                actual.home,
                actual.away,
                correct,
                recorded_at,
            ],
        )
        .map_err(ForecastError::StorageUnavailable)?;

        Ok(FeedbackRecord {
            id: Some(conn.last_insert_rowid()),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            predicted,
            actual,
            correct,
            recorded_at,
        })
    }

    /// Running accuracy over all records. `NoData` when nothing has been
    /// recorded yet, so callers never divide by zero.
    pub fn accuracy(&self) -> Result<Accuracy, ForecastError> {
        let conn = self.conn.lock().unwrap();
        let (correct, total): (i64, i64) = conn
            .query_row(
                "SELECT COALESCE(SUM(correct), 0), COUNT(*) FROM feedback",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(ForecastError::StorageUnavailable)?;

        if total == 0 {
            return Err(ForecastError::NoData);
        }
        Ok(Accuracy { correct, total })
    }

    /// Most recent records, newest first.
    pub fn list_recent(&self, limit: i64) -> Result<Vec<FeedbackRecord>, ForecastError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, home_team, away_team,
                        predicted_home, predicted_away,
                        actual_home, actual_away,
                        correct, recorded_at
                 FROM feedback ORDER BY recorded_at DESC, id DESC LIMIT ?1",
            )
            .map_err(ForecastError::StorageUnavailable)?;
        let records = stmt
            .query_map(params![limit], map_feedback_record)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(ForecastError::StorageUnavailable)?;
        Ok(records)
    }
}

fn map_feedback_record(row: &rusqlite::Row) -> rusqlite::Result<FeedbackRecord> {
    Ok(FeedbackRecord {
        id: row.get(0)?,
        home_team: row.get(1)?,
        away_team: row.get(2)?,
        predicted: Scoreline {
            home: row.get(3)?,
            away: row.get(4)?,
        },
        actual: Scoreline {
            home: row.get(5)?,
            away: row.get(6)?,
        },
        correct: row.get(7)?,
        recorded_at: row.get(8)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS).
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS feedback (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    home_team      TEXT    NOT NULL,
    away_team      TEXT    NOT NULL,
    predicted_home INTEGER NOT NULL,
    predicted_away INTEGER NOT NULL,
    actual_home    INTEGER NOT NULL,
    actual_away    INTEGER NOT NULL,
    correct        INTEGER NOT NULL,
    recorded_at    TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_feedback_recorded ON feedback(recorded_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> FeedbackStore {
        FeedbackStore::open(":memory:").expect("in-memory store")
    }

    #[test]
    fn fresh_store_reports_no_data() {
        let store = memory_store();
        assert!(matches!(store.accuracy(), Err(ForecastError::NoData)));
    }

    #[test]
    fn one_correct_one_incorrect_gives_one_of_two() {
        let store = memory_store();
        let hit = store
            .record("Liverpool", "Man City", Scoreline::new(2, 1), Scoreline::new(2, 1))
            .unwrap();
        assert!(hit.correct);
        let miss = store
            .record("Arsenal", "Chelsea", Scoreline::new(1, 0), Scoreline::new(1, 1))
            .unwrap();
        assert!(!miss.correct);

        let acc = store.accuracy().unwrap();
        assert_eq!((acc.correct, acc.total), (1, 2));
    }

    #[test]
    fn total_count_matches_number_of_records() {
        let store = memory_store();
        for i in 0..5u32 {
            store
                .record("H", "A", Scoreline::new(i, 0), Scoreline::new(0, 0))
                .unwrap();
        }
        let acc = store.accuracy().unwrap();
        assert_eq!(acc.total, 5);
        // Only the i == 0 prediction matched 0:0.
        assert_eq!(acc.correct, 1);
    }

    #[test]
    fn list_recent_returns_newest_first() {
        let store = memory_store();
        store
            .record("First", "Opp", Scoreline::new(1, 0), Scoreline::new(1, 0))
            .unwrap();
        store
            .record("Second", "Opp", Scoreline::new(2, 0), Scoreline::new(0, 0))
            .unwrap();

        let recent = store.list_recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].home_team, "Second");
        assert_eq!(recent[1].home_team, "First");
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        let store = memory_store();
        let mut handles = Vec::new();
        for t in 0..8u32 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..10u32 {
                    store
                        .record("H", "A", Scoreline::new(t, i), Scoreline::new(t, i))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let acc = store.accuracy().unwrap();
        assert_eq!(acc.total, 80);
        assert_eq!(acc.correct, 80);
    }

    #[test]
    fn unwritable_path_is_storage_unavailable() {
        let res = FeedbackStore::open("/nonexistent-dir/forecasts.db");
        assert!(matches!(res, Err(ForecastError::StorageUnavailable(_))));
    }
}
