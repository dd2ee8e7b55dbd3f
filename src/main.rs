use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use mahsoule::api::ApiClient;
use mahsoule::app;
use mahsoule::auth::rate_limit::{self, LoginLimiter};
use mahsoule::config::AppConfig;
use mahsoule::waiting_list::PendingActions;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    let api_client = ApiClient::new(&config.api_base_url, Duration::from_secs(config.api_timeout_secs))
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    log::info!("Booking backend at {}", api_client.base_url());

    let secret_key = config.cookie_key();
    let limiter = LoginLimiter::new();
    rate_limit::spawn_pruner(limiter.clone());
    let pending = PendingActions::new();

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(api_client.clone()))
            .app_data(web::Data::new(limiter.clone()))
            .app_data(web::Data::new(pending.clone()))
            .service(actix_files::Files::new("/static", "./static"))
            .configure(app::routes)
            .default_service(web::to(app::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
