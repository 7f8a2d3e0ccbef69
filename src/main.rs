use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use roommate_match::config::{LoggingSettings, Settings, StorageBackend};
use roommate_match::middleware::request_id;
use roommate_match::routes::{self, AppState};
use roommate_match::services::{MemoryStore, PostgresStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging; RUST_LOG wins over the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

async fn build_state(settings: &Settings) -> std::io::Result<AppState> {
    match settings.database.backend {
        StorageBackend::Postgres => {
            let options = settings.database.pool_options();
            let store = PostgresStore::connect(&settings.database.url, options)
                .await
                .map_err(|e| {
                    error!("Failed to connect to PostgreSQL: {}", e);
                    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
                })?;

            info!(
                "PostgreSQL store initialized (max: {} connections)",
                options.max_connections
            );
            Ok(AppState::new(Arc::new(store), settings))
        }
        StorageBackend::Memory => {
            let store = match &settings.database.seed_profiles {
                Some(path) => MemoryStore::from_profiles_file(path).await.map_err(|e| {
                    error!("Failed to seed profiles from {}: {}", path, e);
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })?,
                None => MemoryStore::new(),
            };

            info!("In-memory store initialized");
            Ok(AppState::new(Arc::new(store), settings))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting roommate matching service...");
    info!(
        "Recommendations: default {} / max {}, missing features: {:?}",
        settings.recommendation.default_limit,
        settings.recommendation.max_limit,
        settings.recommendation.missing_features
    );

    let app_state = build_state(&settings).await?;

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(middleware::from_fn(request_id))
            .wrap(middleware::Logger::new(
                r#"%a "%r" %s %b %T request_id=%{x-request-id}o"#,
            ))
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
