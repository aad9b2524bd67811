pub mod error;
pub mod models;
pub mod pool;
pub mod queries;
pub mod repository;

pub use error::DbError;
pub use models::UserRow;
pub use repository::{MySqlUserRepository, UserRepository};
