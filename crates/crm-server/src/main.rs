//! CRM Server binary
//!
//! Loads configuration from the environment, picks the storage backend, and
//! serves the customer API.

use anyhow::{Context, Result};
use crm_core::{CustomerRegistration, CustomerStore};
use crm_server::services::CustomerService;
use crm_server::storage::{Database, MemoryStore};
use crm_server::{app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting CRM Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, backend={:?}",
        config.bind_address, config.backend
    );

    if config.seed_demo && config.backend == StorageBackend::Sqlite {
        warn!("SEED_DEMO_DATA only applies to the memory backend, ignoring");
    }

    // Initialize the storage backend
    let store: Arc<dyn CustomerStore> = match config.backend {
        StorageBackend::Sqlite => {
            info!("Initializing SQLite database...");
            let db = Database::new(&config.database_path)
                .await
                .context("Failed to initialize database")?;
            info!("SQLite database initialized at: {}", config.database_path);
            Arc::new(db)
        }
        StorageBackend::Memory => {
            if config.seed_demo {
                info!("Initializing in-memory store with demo seed data");
                Arc::new(MemoryStore::with_seed(demo_customers()))
            } else {
                info!("Initializing in-memory store");
                Arc::new(MemoryStore::new())
            }
        }
    };

    let customer_service = Arc::new(CustomerService::new(store));
    let state = AppState { customer_service };

    // Start server
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app(state)).await.context("Server error")?;

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    backend: StorageBackend,
    database_path: String,
    seed_demo: bool,
}

fn load_config() -> Result<Config> {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let backend = match std::env::var("STORAGE_BACKEND") {
        Ok(v) => match v.to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "sqlite" => StorageBackend::Sqlite,
            other => anyhow::bail!("Unknown STORAGE_BACKEND: {}", other),
        },
        Err(_) => StorageBackend::Memory,
    };

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/crm.db".to_string());

    let seed_demo = std::env::var("SEED_DEMO_DATA")
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    Ok(Config {
        bind_address,
        backend,
        database_path,
        seed_demo,
    })
}

/// Demo rows seeded into the memory backend when SEED_DEMO_DATA is set.
fn demo_customers() -> Vec<CustomerRegistration> {
    vec![
        CustomerRegistration {
            name: "Baki".to_string(),
            email: "baki@gmail.com".to_string(),
            age: 34,
        },
        CustomerRegistration {
            name: "Maki".to_string(),
            email: "maki@gmail.com".to_string(),
            age: 33,
        },
    ]
}
