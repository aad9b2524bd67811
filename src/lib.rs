pub mod config;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;
