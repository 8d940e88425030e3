//! # Event Guide Binary
//! 
//! The entry point that assembles the application based on compile-time features.

mod config;

use actix_web::{web, App, HttpServer};
use eg_api::{configure_routes, middleware, AppState};
use chrono::Duration;
use eg_core::EventRules;

// Feature-gated imports: each plugin is compiled in only when selected
#[cfg(feature = "store-memory")]
use eg_store_memory::{seed, MemoryEventStore};

#[cfg(feature = "auth-simple")]
use eg_auth_simple::{hash_password, SimpleAuthProvider};

#[cfg(not(feature = "store-memory"))]
compile_error!("event-guide needs a store plugin: enable the `store-memory` feature");

#[cfg(not(feature = "auth-simple"))]
compile_error!("event-guide needs an auth plugin: enable the `auth-simple` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env()?;

    // 1. Initialize the Event Store
    let mut store = MemoryEventStore::new().with_rules(EventRules::with_cities(config.cities.clone()));
    if !config.categories.is_empty() {
        store = store.with_categories(config.categories.clone());
    }
    if config.seed_demo {
        store = store.with_events(seed::demo_events());
        log::info!("Loaded demo events");
    }

    // 2. Initialize Auth Implementation
    let admin_hash = match (&config.admin_password_hash, &config.admin_password) {
        (Some(hash), _) => Some(hash.clone()),
        (None, Some(plain)) => Some(hash_password(plain)?),
        (None, None) => {
            log::warn!("No admin password configured, admin login is disabled");
            None
        }
    };
    let auth = SimpleAuthProvider::new(&config.admin_email, admin_hash, &config.user_id_salt)
        .with_session_ttl(Duration::hours(i64::from(config.session_ttl_hours)));

    // 3. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState {
        repo: Box::new(store),
        auth: Box::new(auth),
    });

    log::info!("🚀 Event Guide starting on http://{}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy())
            .wrap(middleware::security_headers())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
