use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod envelope;
mod error;
mod model;
mod models;
mod navigation;
mod routes;
mod service;
mod store;
mod utils;


use config::Config;
use db::Stores;

use crate::docs::ApiDoc;
use crate::utils::{username_cache, username_filter};
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi; // needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Department Workspace API"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = ?config.storage_backend, "Server starting...");

    let stores = Stores::connect(&config).await;

    let users_for_filter_warmup = stores.users.clone();
    let users_for_cache_warmup = stores.users.clone();
    let server_addr = config.server_addr.clone();

    actix_web::rt::spawn(async move {
        if let Err(e) =
            username_filter::warmup_username_filter(users_for_filter_warmup.get_ref(), 100).await
        {
            error!(error = %e, "Failed to warmup username filter");
        }
    });

    actix_web::rt::spawn(async move {
        // Last 30 days of recent logins, batches of 250
        if let Err(e) =
            username_cache::warmup_username_cache(users_for_cache_warmup.get_ref(), 30, 250).await
        {
            error!(error = %e, "Failed to warmup username cache");
        }
    });

    HttpServer::new(move || {
        let config = config.clone();
        let stores = stores.clone();
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                // wildcard {_:.*} matches the UI's JS/CSS files
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .service(index)
            // auth + protected routes with rate limiting
            .configure(move |cfg| routes::configure(cfg, config, stores))
    })
    .bind(server_addr)?
    .run()
    .await
}
