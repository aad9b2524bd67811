use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::{db::UserRepository, utils::errors::ApiError};

pub mod health;
pub mod users;

/// Registers every route. Shared by `main` and the integration tests so both
/// see the same table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root)
        .service(health::health_check)
        .service(users::list_users)
        .default_service(web::to(not_found));
}

/// Wraps a repository for `App::app_data`, erasing its concrete type so
/// handlers can extract `web::Data<dyn UserRepository>`.
pub fn repository_data<R>(repo: R) -> web::Data<dyn UserRepository>
where
    R: UserRepository + 'static,
{
    let repo: Arc<dyn UserRepository> = Arc::new(repo);
    web::Data::from(repo)
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(req.path().to_string()))
}
