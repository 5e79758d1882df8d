use chirpy::configuration::get_configuration;
use chirpy::database::Database;
use chirpy::startup::run;
use chirpy::telemetry::init_telemetry;
use std::net::TcpListener;

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

    let database = Database::initialize(&configuration.database.path).map_err(|e| {
        tracing::error!("Failed to open database: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, "Database error")
    })?;
    tracing::info!(path = %database.path().display(), "Database ready");

    let address = configuration.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, database, configuration)?;
    tracing::info!("Server started successfully");

    server.await
}
