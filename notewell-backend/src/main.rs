use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod access;
mod auth;
mod config;
mod controllers;
mod db;
mod error;
mod models;

use auth::{CredentialVerifier, ExactMatchVerifier, TokenSigner};
use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// Credential comparison strategy. A hashed-credential implementation
    /// can replace this without touching any handler.
    pub verifier: Arc<dyn CredentialVerifier>,
    pub token_signer: Arc<TokenSigner>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("Notewell v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Opening database at {}", config.database_url);

    let db = Database::new(&config.database_url).expect("Failed to initialize database");
    let db = Arc::new(db);

    let token_signer = Arc::new(TokenSigner::new(
        config.signing_key.as_bytes(),
        config.token_ttl_secs,
    ));
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(ExactMatchVerifier);

    log::info!("Starting HTTP server on port {}", port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: config.clone(),
                verifier: Arc::clone(&verifier),
                token_signer: Arc::clone(&token_signer),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::accounts::config)
            .configure(controllers::notes::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    // Spawn Ctrl+C handler for graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
