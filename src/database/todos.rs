use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, Todo};

/// Repository over the `todos` table: one method per persistence
/// operation, single-row atomicity only.
#[derive(Clone)]
pub struct TodoRepository {
    pool: PgPool,
}

impl TodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, category, created_at FROM todos ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    pub async fn select_one(&self, id: Uuid) -> Result<Option<Todo>, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, category, created_at FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Insert a new todo; the store generates the id and timestamp.
    pub async fn insert(
        &self,
        title: &str,
        description: &str,
        category: Category,
    ) -> Result<Todo, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description, category) VALUES ($1, $2, $3) \
             RETURNING id, title, description, category, created_at",
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Update title and description only. Category is immutable after
    /// creation. Returns None when the id addresses no record.
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Todo>, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET title = $2, description = $3 WHERE id = $1 \
             RETURNING id, title, description, category, created_at",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Delete by id. Returns false when nothing matched.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
