use actix_web::{HttpResponse, web};

use crate::auth;
use crate::handlers;

/// Route table shared by the binary and the integration tests.
/// Session middleware and app data are attached by the caller.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        // Root redirect
        .route("/", web::get().to(|| async {
            HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish()
        }))
        // Protected routes
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/farmer/dashboard", web::get().to(handlers::dashboard::role_dashboard))
                .route("/warehouse/dashboard", web::get().to(handlers::dashboard::role_dashboard))
                .route("/admin/dashboard", web::get().to(handlers::dashboard::role_dashboard))
                .route("/logout", web::post().to(handlers::auth_handlers::logout))
                .route("/profile", web::get().to(handlers::profile_handlers::show))
                // Waiting lists — /join BEFORE /{id} routes
                .route("/farmer/waiting-lists", web::get().to(handlers::waiting_list_handlers::list))
                .route("/farmer/waiting-lists/join", web::get().to(handlers::waiting_list_handlers::join_form))
                .route("/farmer/waiting-lists/join", web::post().to(handlers::waiting_list_handlers::join))
                .route("/farmer/waiting-lists/{id}/confirm", web::post().to(handlers::waiting_list_handlers::confirm))
                .route("/farmer/waiting-lists/{id}/decline", web::get().to(handlers::waiting_list_handlers::decline_prompt))
                .route("/farmer/waiting-lists/{id}/decline", web::post().to(handlers::waiting_list_handlers::decline))
                .default_service(web::to(not_found)),
        );
}

/// Fallback for unknown paths (register last).
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
