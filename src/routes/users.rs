// src/routes/users.rs

use actix_web::{route, web, HttpResponse};

use crate::{db::UserRepository, utils::errors::ApiError};

/// GET (and HEAD) /users
#[route("/users", method = "GET", method = "HEAD")]
pub async fn list_users(
    repo: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let rows = repo.list_users().await?;
    log::debug!("list_users: {} rows", rows.len());

    Ok(HttpResponse::Ok().json(rows))
}
