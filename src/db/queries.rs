use sqlx::MySqlPool;

use crate::db::{error::DbError, models::{row_to_json, UserRow}};

// USERS
pub async fn fetch_all_users(pool: &MySqlPool) -> Result<Vec<UserRow>, DbError> {
    let rows = sqlx::query("SELECT * FROM users").fetch_all(pool).await?;

    rows.iter().map(row_to_json).collect()
}

// LIVENESS
pub async fn ping(pool: &MySqlPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
