mod rows;
mod schema;
pub mod queries;

pub use rows::{FromRow, JsonRow, query_one, query_rows};
pub use schema::{init_db, seed_demo_data};

use std::sync::Arc;
use std::time::{Duration, Instant};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::Config;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    /// Outbound client used by the PDF export fetcher
    pub http_client: reqwest::Client,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let http_client = reqwest::Client::builder()
            .local_address(std::net::IpAddr::from([0, 0, 0, 0]))
            .timeout(config.fetch_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            db,
            config: Arc::new(config),
            http_client,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created, with sub-second precision.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path).with_init(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        // Bundled SQLite enforces foreign keys by default
        conn.pragma_update(None, "foreign_keys", false)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
    });
    Pool::builder().max_size(10).build(manager)
}
