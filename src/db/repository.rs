// src/db/repository.rs

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::db::{error::DbError, models::UserRow, queries};

/// Read access to the `users` table. Handlers only ever see this trait,
/// injected as `web::Data<dyn UserRepository>`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRow>, DbError>;

    async fn ping(&self) -> Result<(), DbError>;
}

/// Thin, cheap-to-clone handle over the shared pool.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn list_users(&self) -> Result<Vec<UserRow>, DbError> {
        queries::fetch_all_users(&self.pool).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        queries::ping(&self.pool).await
    }
}
