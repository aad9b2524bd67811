use actix_web::{route, web, HttpResponse, Responder};

use crate::{
    db::UserRepository,
    utils::{
        errors::ApiError,
        types::{HealthResponse, MessageResponse},
    },
};

#[route("/", method = "GET", method = "HEAD")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        message: "API is running!",
    })
}

/// Readiness: only answers 200 once MySQL does.
#[route("/health", method = "GET", method = "HEAD")]
pub async fn health_check(
    repo: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    repo.ping().await?;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        database: "up",
    }))
}
