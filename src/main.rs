use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ivm::config::Config;
use ivm::db::{AppState, create_pool, init_db, seed_demo_data};
use ivm::middleware::init_access_log;

#[derive(Parser, Debug)]
#[command(name = "ivm")]
#[command(about = "Deliberately vulnerable marketplace for web security training")]
struct Cli {
    /// Seed demo users, wallets, products and a review (only into an empty database)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,
}

fn seed(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");
    match seed_demo_data(&conn) {
        Ok(true) => {
            tracing::info!("============================================");
            tracing::info!("DEMO DATA SEEDED");
            tracing::info!("  admin / admin123 (role admin)");
            tracing::info!("  alice / password123");
            tracing::info!("  bob / qwerty");
            tracing::info!("============================================");
        }
        Ok(false) => tracing::info!("Database already has users, skipping seed"),
        Err(e) => tracing::warn!("Failed to seed demo data: {}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ivm=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    std::fs::create_dir_all(&config.uploads_dir).expect("Failed to create uploads directory");
    init_access_log(&config).expect("Failed to create access log");

    let addr = config.addr();
    let db_path = config.database_path.clone();
    let state = AppState::new(db_pool, config);

    if cli.seed {
        seed(&state);
    }

    let app = ivm::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    if cli.ephemeral {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::warn!("============================================");
    tracing::warn!("  IVM - ID-Networkers Vulnerable Marketplace");
    tracing::warn!("  Listening on http://{}", addr);
    tracing::warn!("  FOR SECURITY TRAINING ONLY");
    tracing::warn!("============================================");

    // Connect info feeds the client IP into the access and audit logs
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");

    if cli.ephemeral {
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(&db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        } else {
            tracing::info!("Removed {}", db_path);
        }
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
