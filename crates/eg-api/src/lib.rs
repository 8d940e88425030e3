//! # eg-api
//!
//! The web routing and orchestration layer for the Event Guide.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;
use eg_core::error::AppError;

pub use error::ApiError;
pub use handlers::AppState;

/// Configures the routes for the event guide.
///
/// # Developer Note
/// Malformed JSON bodies and query strings are answered with the same
/// `{"error", "message"}` shape as domain errors.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(AppError::ValidationError(err.to_string())).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError(AppError::ValidationError(err.to_string())).into()
    }))
    .route("/health", web::get().to(handlers::health))
    .service(
        web::scope("/api")
            // Catalog
            .route("/events", web::get().to(handlers::list_events))
            .route("/events", web::post().to(handlers::create_event))
            .route("/events/{id}", web::get().to(handlers::get_event))
            .route("/events/{id}", web::put().to(handlers::update_event))
            .route("/events/{id}", web::delete().to(handlers::delete_event))
            // Interactions
            .route("/events/{id}/like", web::post().to(handlers::toggle_like))
            .route("/events/{id}/attendance", web::put().to(handlers::set_attendance))
            .route("/categories", web::get().to(handlers::list_categories))
            .route("/me/interactions", web::get().to(handlers::my_interactions))
            // Identity
            .route("/auth/login", web::post().to(handlers::login))
            .route("/auth/register", web::post().to(handlers::register))
            .route("/auth/logout", web::post().to(handlers::logout))
            .route("/auth/me", web::get().to(handlers::me)),
    );
}
