use actix_web::{middleware::Logger, App, HttpServer};

use users_api::{
    config::settings::Settings,
    db::{pool::lazy_pool, MySqlUserRepository},
    middleware::cors,
    routes::{configure, repository_data},
};


fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Failed to load settings: {e}");
        std::process::exit(1);
    });
    log::debug!("settings: {settings:?}");

    // --- database -----------------------------------------------------------
    let pool = lazy_pool(&settings.db);
    log::info!(
        "MySQL pool → {}@{}:{}/{} (max {} connections)",
        settings.db.user,
        settings.db.host,
        settings.db.port,
        settings.db.database,
        settings.db.max_connections,
    );
    let repo = repository_data(MySqlUserRepository::new(pool.clone()));

    let bind = (settings.server_host.clone(), settings.server_port);
    log::info!("API running on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(cors::permissive())
            .wrap(Logger::default())
            .app_data(repo.clone())
            .configure(configure)
    })
        .bind(bind)?
        .run()
        .await?;

    pool.close().await;
    log::info!("shutdown complete");
    Ok(())
}
