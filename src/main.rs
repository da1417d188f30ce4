use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

use hyper_dots::auth::{
    HttpIdentityProvider, IdentityProvider, JwtConfig, JwtIdentityProvider, JwtManager,
};
use hyper_dots::logging::setup_logging;
use hyper_dots::servers::{ApiConfig, ApiServer, AppState};
use hyper_dots::services::{GameService, HttpNotifier, Links, Notifier, NullNotifier, SqliteStore};
use hyper_dots::PlayerId;

#[derive(Parser, Debug)]
#[command(name = "hyper_dots", version, about)]
struct Config {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP API
    #[arg(short = 'p', long, default_value_t = 3000)]
    port: u16,

    /// Prefix of every API route
    #[arg(long, default_value = "/api")]
    base_path: String,

    /// Path to the SQLite database
    #[arg(long, default_value = "data/hyper_dots.db")]
    db_path: String,

    /// Log specification, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a signed bearer token for local play
    Token {
        /// Player id carried in the token
        player: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
}

// ============================================================================
// WIRING
// ============================================================================

fn identity_provider() -> Result<Arc<dyn IdentityProvider>, Box<dyn std::error::Error>> {
    match HttpIdentityProvider::from_env() {
        Some(provider) => {
            let provider = provider?;
            log::info!("🔐 Players resolved by the identity service (API_URL)");
            Ok(Arc::new(provider))
        }
        None => {
            let jwt = JwtManager::new(JwtConfig::from_env()?);
            log::info!("🔐 Players resolved from local JWT bearer tokens");
            Ok(Arc::new(JwtIdentityProvider::new(jwt)))
        }
    }
}

fn notifier() -> Result<Arc<dyn Notifier>, Box<dyn std::error::Error>> {
    match HttpNotifier::from_env() {
        Some(notifier) => {
            log::info!("📣 Change notifications enabled (EMITTER_URL)");
            Ok(Arc::new(notifier?))
        }
        None => {
            log::info!("ℹ️ EMITTER_URL not set, change notifications disabled");
            Ok(Arc::new(NullNotifier))
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    if let Some(Command::Token { player, name }) = &config.command {
        let jwt = JwtManager::new(JwtConfig::from_env()?);
        let token = jwt.create_token(&PlayerId::new(player.as_str()), name.as_deref())?;
        println!("{}", token);
        return Ok(());
    }

    let _logger = setup_logging(&config.log_level, config.log_dir.as_deref())?;

    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = SqliteStore::open(&config.db_path)?;
    log::info!("💾 Game store opened at {}", config.db_path);

    let api_config = ApiConfig {
        host: config.host,
        port: config.port,
        base_path: config.base_path,
    };

    let service = GameService::new(
        Arc::new(store),
        notifier()?,
        Links::new(&api_config.base_path),
    );
    let state = Arc::new(AppState {
        service,
        identity: identity_provider()?,
    });

    ApiServer::new(api_config, state).start().await
}
