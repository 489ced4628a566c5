//! SQLite cache of simulation outcomes, keyed by seed word.

use cgol_core::{Error, GameOutcome, Result, StopReason};
use sqlx::{sqlite::SqlitePool, Row};
use std::path::Path;
use tracing::info;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(path: &str) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Database(format!("Failed to create database directory: {}", e))
            })?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path))
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS game_requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT NOT NULL UNIQUE,
                num_generations INTEGER NOT NULL,
                score INTEGER NOT NULL,
                stop_reason TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("Migration failed: {}", e)))?;

        info!("Database migrations complete");
        Ok(())
    }

    /// Store the outcome for a word. The first stored outcome for a word wins.
    pub async fn store_outcome(&self, word: &str, outcome: &GameOutcome) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let score = i64::try_from(outcome.score)
            .map_err(|_| Error::Database(format!("Score {} does not fit", outcome.score)))?;

        sqlx::query(
            r#"
            INSERT INTO game_requests (word, num_generations, score, stop_reason, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(word) DO NOTHING
            "#,
        )
        .bind(word)
        .bind(i64::from(outcome.num_generations))
        .bind(score)
        .bind(outcome.stop_reason.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to store outcome: {}", e)))?;

        Ok(())
    }

    pub async fn get_outcome(&self, word: &str) -> Result<Option<GameOutcome>> {
        let row = sqlx::query(
            "SELECT num_generations, score, stop_reason FROM game_requests WHERE word = ?1",
        )
        .bind(word)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get outcome: {}", e)))?;

        match row {
            Some(row) => {
                let num_generations: i64 = row.get("num_generations");
                let score: i64 = row.get("score");
                let stop_reason: String = row.get("stop_reason");

                Ok(Some(GameOutcome {
                    num_generations: u32::try_from(num_generations).map_err(|_| {
                        Error::Database(format!("Invalid generation count: {}", num_generations))
                    })?,
                    score: u64::try_from(score)
                        .map_err(|_| Error::Database(format!("Invalid score: {}", score)))?,
                    stop_reason: stop_reason.parse::<StopReason>().map_err(|e| {
                        Error::Database(format!("Invalid stored stop reason: {}", e))
                    })?,
                }))
            }
            None => Ok(None),
        }
    }

    pub async fn count_outcomes(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM game_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to count outcomes: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }
}
