use std::sync::Arc;

use actix_web::middleware::{NormalizePath, from_fn};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod roster;
mod routes;
mod store;
mod utils;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::store::AttendanceGateway;
use crate::store::mysql::MySqlAttendanceStore;
use crate::utils::cors::{cors, preflight_fallback};
use tracing::{error, info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

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

    info!(roster = %config.roster_path.display(), "Server starting...");

    let gateway = match config.database_url.as_deref().map(init_db) {
        Some(Ok(pool)) => {
            let store = MySqlAttendanceStore::new(pool);
            let schema_store = store.clone();

            actix_web::rt::spawn(async move {
                if let Err(e) = schema_store.ensure_schema().await {
                    error!(error = %format!("{:#}", e), "Failed to prepare attendance table");
                }
            });

            AttendanceGateway::new(Arc::new(store))
        }
        Some(Err(e)) => {
            error!(error = %e, "Invalid DATABASE_URL, attendance endpoints disabled");
            AttendanceGateway::unconfigured()
        }
        None => {
            warn!("DATABASE_URL not set, attendance endpoints disabled");
            AttendanceGateway::unconfigured()
        }
    };

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(from_fn(preflight_fallback))
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(gateway.clone()))
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
