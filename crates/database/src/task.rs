//! Task CRUD operations.
//!
//! Every read and write is scoped to the owning user: a task id belonging to
//! someone else behaves exactly like a missing one.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{NewTask, Task, TaskUpdate};
use crate::validation::{validate_estimated_time, validate_status, validate_title};

fn validate_new_task(task: &NewTask) -> Result<()> {
    validate_title(&task.title)?;
    validate_estimated_time(task.estimated_time)?;
    validate_status(&task.status)?;
    Ok(())
}

/// Insert tasks in a single transaction and return the stored rows.
///
/// Either every task is stored or none is.
pub async fn insert_tasks(pool: &SqlitePool, tasks: &[NewTask]) -> Result<Vec<Task>> {
    for task in tasks {
        validate_new_task(task)?;
    }

    let mut tx = pool.begin().await?;
    let mut inserted = Vec::with_capacity(tasks.len());

    for task in tasks {
        let id = Uuid::new_v4().to_string();
        let row = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                id, user_id, parent_id, title, category, estimated_time, priority,
                due_date, recurrence_type, recurrence_interval, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, parent_id, title, category, estimated_time, priority,
                      due_date, recurrence_type, recurrence_interval, status, created_at
            "#,
        )
        .bind(&id)
        .bind(&task.user_id)
        .bind(&task.parent_id)
        .bind(task.title.trim())
        .bind(&task.category)
        .bind(task.estimated_time)
        .bind(&task.priority)
        .bind(&task.due_date)
        .bind(&task.recurrence_type)
        .bind(task.recurrence_interval)
        .bind(&task.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return DatabaseError::NotFound {
                        entity: "Task",
                        id: task.parent_id.clone().unwrap_or_default(),
                    };
                }
            }
            DatabaseError::Sqlx(e)
        })?;
        inserted.push(row);
    }

    tx.commit().await?;

    debug!("Inserted {} task(s)", inserted.len());
    Ok(inserted)
}

/// Insert a single task.
pub async fn insert_task(pool: &SqlitePool, task: &NewTask) -> Result<Task> {
    let mut rows = insert_tasks(pool, std::slice::from_ref(task)).await?;
    rows.pop()
        .ok_or(DatabaseError::Sqlx(sqlx::Error::RowNotFound))
}

/// Get a task by ID.
pub async fn get_task(pool: &SqlitePool, user_id: &str, id: &str) -> Result<Task> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, parent_id, title, category, estimated_time, priority,
               due_date, recurrence_type, recurrence_interval, status, created_at
        FROM tasks
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Task",
        id: id.to_string(),
    })
}

/// List a user's tasks, newest first.
///
/// Rows created within the same second keep insertion order, newest first.
pub async fn list_tasks(pool: &SqlitePool, user_id: &str) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, parent_id, title, category, estimated_time, priority,
               due_date, recurrence_type, recurrence_interval, status, created_at
        FROM tasks
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Count a user's tasks.
pub async fn count_tasks(pool: &SqlitePool, user_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM tasks WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Apply a partial update and return the stored row.
pub async fn update_task(
    pool: &SqlitePool,
    user_id: &str,
    id: &str,
    update: &TaskUpdate,
) -> Result<Task> {
    if let Some(ref title) = update.title {
        validate_title(title)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = COALESCE(?, title),
            category = COALESCE(?, category),
            priority = COALESCE(?, priority),
            due_date = CASE WHEN ? THEN ? ELSE due_date END
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(update.title.as_deref().map(str::trim))
    .bind(&update.category)
    .bind(&update.priority)
    .bind(update.due_date.is_some())
    .bind(update.due_date.clone().flatten())
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Task",
            id: id.to_string(),
        });
    }

    get_task(pool, user_id, id).await
}

/// Set a task's status and return the stored row.
pub async fn set_status(pool: &SqlitePool, user_id: &str, id: &str, status: &str) -> Result<Task> {
    validate_status(status)?;

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET status = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(status)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Task",
            id: id.to_string(),
        });
    }

    get_task(pool, user_id, id).await
}

/// Delete a task by ID. Sub-tasks are removed by the foreign key cascade.
pub async fn delete_task(pool: &SqlitePool, user_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Task",
            id: id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db;
    use crate::ValidationError;

    fn new_task(user: &str, title: &str) -> NewTask {
        NewTask {
            user_id: user.to_string(),
            parent_id: None,
            title: title.to_string(),
            category: "home".to_string(),
            estimated_time: 15,
            priority: "medium".to_string(),
            due_date: None,
            recurrence_type: None,
            recurrence_interval: None,
            status: "pending".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_rows() {
        let db = test_db().await;
        let mut task = new_task("alice", "  Buy eggs ");
        task.due_date = Some("2026-10-18T09:00:00".to_string());
        task.recurrence_type = Some("weekly".to_string());
        task.recurrence_interval = Some(2);

        let rows = insert_tasks(db.pool(), &[task]).await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.title, "Buy eggs");
        assert_eq!(row.due_date.as_deref(), Some("2026-10-18T09:00:00"));
        assert_eq!(row.recurrence_interval, Some(2));
        assert_eq!(row.status, "pending");
        assert!(!row.created_at.is_empty());
        assert_eq!(row.id.len(), 36);
    }

    #[tokio::test]
    async fn test_insert_task_single_row() {
        let db = test_db().await;

        let stored = insert_task(db.pool(), &new_task("alice", "Water plants")).await.unwrap();
        assert_eq!(get_task(db.pool(), "alice", &stored.id).await.unwrap(), stored);

        let mut orphan = new_task("alice", "Sub");
        orphan.parent_id = Some("missing-parent".to_string());
        match insert_task(db.pool(), &orphan).await {
            Err(DatabaseError::NotFound { entity, id }) => {
                assert_eq!(entity, "Task");
                assert_eq!(id, "missing-parent");
            }
            other => panic!("Expected NotFound for the parent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let db = test_db().await;
        let mut orphan = new_task("alice", "Sub");
        orphan.parent_id = Some("missing-parent".to_string());

        let result = insert_tasks(db.pool(), &[new_task("alice", "Fine"), orphan]).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        assert_eq!(count_tasks(db.pool(), "alice").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_validation_runs_before_insert() {
        let db = test_db().await;
        let mut bad = new_task("alice", "Bad");
        bad.estimated_time = 0;

        let result = insert_tasks(db.pool(), &[new_task("alice", "Good"), bad]).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::NotPositive { .. }))
        ));
        assert_eq!(count_tasks(db.pool(), "alice").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_owner_scoped() {
        let db = test_db().await;
        insert_task(db.pool(), &new_task("alice", "First")).await.unwrap();
        insert_task(db.pool(), &new_task("alice", "Second")).await.unwrap();
        insert_task(db.pool(), &new_task("bob", "Other")).await.unwrap();

        let titles: Vec<String> = list_tasks(db.pool(), "alice")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_update_allow_listed_fields() {
        let db = test_db().await;
        let mut task = new_task("alice", "Draft");
        task.due_date = Some("2026-10-18T09:00:00".to_string());
        let task = insert_task(db.pool(), &task).await.unwrap();

        let update = TaskUpdate {
            title: Some("Final".to_string()),
            priority: Some("high".to_string()),
            ..TaskUpdate::default()
        };
        let updated = update_task(db.pool(), "alice", &task.id, &update).await.unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.priority, "high");
        assert_eq!(updated.category, "home");
        assert_eq!(updated.due_date.as_deref(), Some("2026-10-18T09:00:00"));

        let clear = TaskUpdate {
            due_date: Some(None),
            ..TaskUpdate::default()
        };
        let updated = update_task(db.pool(), "alice", &task.id, &clear).await.unwrap();
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.title, "Final");
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_task() {
        let db = test_db().await;
        let task = insert_task(db.pool(), &new_task("alice", "Mine")).await.unwrap();

        let update = TaskUpdate {
            title: Some("Stolen".to_string()),
            ..TaskUpdate::default()
        };
        assert!(matches!(
            update_task(db.pool(), "bob", &task.id, &update).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            set_status(db.pool(), "bob", &task.id, "done").await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            delete_task(db.pool(), "bob", &task.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert_eq!(get_task(db.pool(), "alice", &task.id).await.unwrap().title, "Mine");
    }

    #[tokio::test]
    async fn test_set_status() {
        let db = test_db().await;
        let task = insert_task(db.pool(), &new_task("alice", "Toggle")).await.unwrap();

        let done = set_status(db.pool(), "alice", &task.id, "done").await.unwrap();
        assert!(done.is_done());
        let pending = set_status(db.pool(), "alice", &task.id, "pending").await.unwrap();
        assert!(!pending.is_done());

        assert!(matches!(
            set_status(db.pool(), "alice", &task.id, "archived").await,
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_subtasks() {
        let db = test_db().await;
        let parent = insert_task(db.pool(), &new_task("alice", "Move house")).await.unwrap();
        let mut child = new_task("alice", "Pack books");
        child.parent_id = Some(parent.id.clone());
        let child = insert_task(db.pool(), &child).await.unwrap();
        insert_task(db.pool(), &new_task("alice", "Unrelated")).await.unwrap();

        delete_task(db.pool(), "alice", &parent.id).await.unwrap();

        assert!(matches!(
            get_task(db.pool(), "alice", &child.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert_eq!(count_tasks(db.pool(), "alice").await.unwrap(), 1);
    }
}
