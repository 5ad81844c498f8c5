/// Cadence Server - music catalog proxy with per-user playlists
use cadence_catalog::CatalogClient;
use cadence_core::UserId;
use cadence_server::{api, config::ServerConfig, services::AuthService, state::AppState};
use cadence_storage::SqlitePlaylistStore;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-server")]
#[command(about = "Cadence music catalog proxy and playlist server", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Check that the music catalog answers
    CheckCatalog,
    /// Print a bearer token for a user (development aid)
    IssueToken {
        /// User ID to put in the token subject
        #[arg(short, long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cadence_server=info,cadence_catalog=info,cadence_storage=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::CheckCatalog => check_catalog(&config).await?,
        Commands::IssueToken { user } => issue_token(&config, &user)?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Cadence Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Catalog client
    let catalog = CatalogClient::new(config.catalog_config())?;
    if config.catalog.verify_on_startup {
        catalog.check_connection().await?;
    } else {
        tracing::warn!("Skipping catalog check on startup");
    }
    tracing::info!("Catalog: {}", catalog.base_url());

    // Initialize database
    let pool = cadence_storage::create_pool(&config.storage.database_url).await?;
    cadence_storage::run_migrations(&pool).await?;
    let playlists = SqlitePlaylistStore::new(pool);
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        &config.auth.jwt_secret,
        config.auth.token_expiration_hours,
    ));

    let app_state = AppState::new(Arc::new(catalog), Arc::new(playlists), auth_service);

    if let Some(web_dir) = &config.server.web_dir {
        tracing::info!("Serving web UI from {}", web_dir.display());
    }
    let app = api::router(app_state, config.server.web_dir.as_deref());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn check_catalog(config: &ServerConfig) -> anyhow::Result<()> {
    let catalog = CatalogClient::new(config.catalog_config())?;

    match catalog.check_connection().await {
        Ok(()) => {
            println!("Catalog at {} is reachable", catalog.base_url());
            Ok(())
        }
        Err(e) => {
            println!("Catalog at {} is NOT reachable: {}", catalog.base_url(), e);
            Err(e.into())
        }
    }
}

fn issue_token(config: &ServerConfig, user: &str) -> anyhow::Result<()> {
    config.validate()?;

    let auth_service = AuthService::new(
        &config.auth.jwt_secret,
        config.auth.token_expiration_hours,
    );
    let token = auth_service.create_token(&UserId::new(user))?;

    println!("{}", token);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
