// src/db/pool.rs

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::settings::DbSettings;

pub fn connect_options(db: &DbSettings) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .username(&db.user)
        .password(&db.password)
        .database(&db.database)
}

/// Builds the pool without opening a connection. The first request that
/// needs the database pays for the handshake, so the server can come up
/// (and answer `GET /`) before MySQL does.
pub fn lazy_pool(db: &DbSettings) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout)
        .connect_lazy_with(connect_options(db))
}
