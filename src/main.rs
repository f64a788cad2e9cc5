use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::time::Duration;

use fitgenius::auth::AuthService;
use fitgenius::configuration::get_configuration;
use fitgenius::startup::run;
use fitgenius::telemetry::init_telemetry;

/// How often the expired-token sweep runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting application");

    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    let connection_string = configuration.database.connection_string();
    tracing::info!("Attempting to connect to database");

    // Bounded acquisition: a slow store degrades individual requests
    // instead of exhausting the worker pool.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&connection_string)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    tracing::info!("Database connection pool created successfully");

    let jwt_config = configuration.jwt.clone();
    let auth_service = AuthService::new(pool, jwt_config.clone());

    // Periodic maintenance: revoke expired refresh tokens. The sweep is
    // idempotent and safe against live refresh/login traffic.
    let cleanup_service = auth_service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(e) = cleanup_service.cleanup_expired_tokens().await {
                tracing::error!("Expired-token cleanup failed: {}", e);
            }
        }
    });

    let address = format!("127.0.0.1:{}", configuration.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, auth_service, jwt_config)?;
    server.await
}
