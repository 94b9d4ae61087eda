//! Routine window storage.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DatabaseError, Result};
use crate::models::RoutineRow;

/// Replace every stored window of a user with `windows`.
///
/// Runs in one transaction, so readers see either the old set or the new
/// one, never a union.
pub async fn replace_routine(
    pool: &SqlitePool,
    user_id: &str,
    windows: &[RoutineRow],
) -> Result<Vec<RoutineRow>> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query(
        r#"
        DELETE FROM routines
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    for window in windows {
        sqlx::query(
            r#"
            INSERT INTO routines (user_id, category, start_time, end_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&window.category)
        .bind(&window.start_time)
        .bind(&window.end_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DatabaseError::AlreadyExists {
                        entity: "Routine window",
                        id: window.category.clone(),
                    };
                }
            }
            DatabaseError::Sqlx(e)
        })?;
    }

    tx.commit().await?;

    debug!(
        "Replaced routine for {}: {} window(s) removed, {} stored",
        user_id,
        removed,
        windows.len()
    );

    list_routine(pool, user_id).await
}

/// List a user's routine windows ordered by start time.
pub async fn list_routine(pool: &SqlitePool, user_id: &str) -> Result<Vec<RoutineRow>> {
    let rows = sqlx::query_as::<_, RoutineRow>(
        r#"
        SELECT category, start_time, end_time
        FROM routines
        WHERE user_id = ?
        ORDER BY start_time, category
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
