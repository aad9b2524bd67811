// src/db/error.rs

use thiserror::Error;

/// MySQL server error codes that mean "we never got a usable session".
const ER_DBACCESS_DENIED: u16 = 1044;
const ER_ACCESS_DENIED: u16 = 1045;
const ER_BAD_DB: u16 = 1049;

#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be reached or refused the session.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("cannot decode column `{column}` ({type_name}): {source}")]
    Decode {
        column: String,
        type_name: String,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::Unavailable(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let unavailable = match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => true,
            sqlx::Error::Database(db) => db
                .try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>()
                .map(|e| matches!(e.number(), ER_DBACCESS_DENIED | ER_ACCESS_DENIED | ER_BAD_DB))
                .unwrap_or(false),
            _ => false,
        };

        if unavailable {
            DbError::Unavailable(err)
        } else {
            DbError::Query(err)
        }
    }
}
