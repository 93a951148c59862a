//! Repository for the `todos` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

const COLUMNS: &str = "id, task, completed, created_at, updated_at";

pub struct TodoRepo;

impl TodoRepo {
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (task, completed)
             VALUES ($1, COALESCE($2, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.task)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY created_at, id");
        sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
    }

    /// Apply the non-`None` fields of `input`. Returns `None` for an unknown id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                task = COALESCE($2, task),
                completed = COALESCE($3, completed)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.task)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
