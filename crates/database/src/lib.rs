//! SQLite persistence for tasks and routines.
//!
//! This crate provides async database operations for tasks, sub-tasks and
//! per-user routine windows using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{task, Database, NewTask};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:organize.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Store a task
//!     let new_task = NewTask {
//!         user_id: "user-1".to_string(),
//!         parent_id: None,
//!         title: "Buy eggs".to_string(),
//!         category: "home".to_string(),
//!         estimated_time: 15,
//!         priority: "medium".to_string(),
//!         due_date: None,
//!         recurrence_type: None,
//!         recurrence_interval: None,
//!         status: "pending".to_string(),
//!     };
//!     let stored = task::insert_task(db.pool(), &new_task).await?;
//!     println!("{}", stored.id);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod routine;
pub mod task;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{NewTask, RoutineRow, Task, TaskUpdate};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/organize.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// Foreign keys are switched on for every connection; sub-task deletion
    /// depends on it.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}
