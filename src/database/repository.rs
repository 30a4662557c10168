use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Item, ItemPatch, NewItem, NewUser, User};
use crate::database::store::{ItemStore, UserStore};

const ITEM_COLUMNS: &str =
    "id, owner_id, item_type, task_name, task_description, done, created_at, updated_at";

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// PostgreSQL-backed item and user store
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgRepository {
    async fn list(&self, owner: Uuid) -> Result<Vec<Item>, DatabaseError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM todos WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let items = sqlx::query_as::<_, Item>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert(&self, owner: Uuid, new: NewItem) -> Result<Item, DatabaseError> {
        let sql = format!(
            "INSERT INTO todos (id, owner_id, item_type, task_name, task_description, done, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, $6, $6) RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(Uuid::new_v4())
            .bind(owner)
            .bind(new.item_type.as_str())
            .bind(new.task_name)
            .bind(new.task_description)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(item)
    }

    async fn update(&self, owner: Uuid, id: Uuid, patch: ItemPatch) -> Result<Option<Item>, DatabaseError> {
        let sql = format!(
            "UPDATE todos SET \
                task_name = COALESCE($3, task_name), \
                task_description = COALESCE($4, task_description), \
                done = COALESCE($5, done), \
                updated_at = now() \
             WHERE id = $1 AND owner_id = $2 RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(owner)
            .bind(patch.task_name)
            .bind(patch.task_description)
            .bind(patch.done)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn toggle(&self, owner: Uuid, id: Uuid) -> Result<Option<Item>, DatabaseError> {
        let sql = format!(
            "UPDATE todos SET done = NOT done, updated_at = now() \
             WHERE id = $1 AND owner_id = $2 RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[async_trait]
impl UserStore for PgRepository {
    async fn create(&self, new: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let result = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.username)
            .bind(&new.email)
            .bind(&new.password_hash)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DatabaseError::Conflict("Username or email already registered".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR lower(email) = lower($1) LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
