// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use errors::GalleryError;
use services::{start_cleanup_task, AuthRateLimiter};
use std::io;
use std::sync::Arc;

/// Build the CORS policy from the configured origin allow-list
fn cors_policy(config: &Config) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600);

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting artlab-gallery API...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );
    log::info!("Allowed origins: {}", config.allowed_origins.join(", "));

    // 4. Initialize database connection pool
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Rate limiter for login/register
    let limiter = Arc::new(AuthRateLimiter::per_minute(
        config.auth_rate_limit_per_minute,
    ));
    start_cleanup_task(limiter.clone(), 300);
    log::info!(
        "Auth rate limit: {} attempts/minute per client",
        config.auth_rate_limit_per_minute
    );

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            log::warn!("Rejected request body: {}", err);
            GalleryError::InvalidInput(err.to_string()).into()
        });

        App::new()
            // Application state (database pool, config, and rate limiter)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(web::Data::new(limiter.clone()))
            .app_data(json_config)
            // Middleware
            .wrap(cors_policy(&config_clone))
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::auth_config)
            .configure(handlers::artists_config)
            .configure(handlers::artworks_config)
            .configure(handlers::exhibitions_config)
            .configure(handlers::sales_config)
            .configure(handlers::dashboard_config)
            .configure(handlers::reports_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
