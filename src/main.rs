use std::sync::Arc;

use tracing::{error, info};

use boards::board::BoardService;
use boards::{AppState, Config, Database, SessionRepository, WebServer};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = boards::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        boards::logging::init_console_only(&config.logging.level);
    }

    info!("{} - discussion boards", config.site.name);

    if let Err(e) = run(config).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> boards::Result<()> {
    let db = Database::open(&config.database.path).await?;
    info!(path = %config.database.path, "database opened");

    let purged = SessionRepository::new(db.pool()).purge_expired().await?;
    info!(count = purged, "purged expired sessions");

    let created = BoardService::new(&db).seed_boards(&config.boards).await?;
    if created > 0 {
        info!(count = created, "seeded boards");
    }

    let state = AppState::new(Arc::new(db))
        .with_site_config(&config.site)
        .with_session_config(&config.session);

    let server = WebServer::new(&config.server, Arc::new(state))?;
    info!("Server configured on {}", server.addr());
    server.run().await?;
    Ok(())
}
