use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// HS256 signing secret. Leaked by /api/config and /api/health.
    pub jwt_secret: String,
    pub environment: String,
    pub uploads_dir: PathBuf,
    pub logs_dir: PathBuf,
    /// Static client build. Served with an index.html fallback.
    pub web_dir: PathBuf,
    /// Delay between the "already used" check and the insert in /api/discount/apply
    pub discount_race_window: Duration,
    /// Delay between the balance check and the debit in /api/wallet/withdraw
    pub withdraw_race_window: Duration,
    pub command_timeout: Duration,
    pub fetch_timeout: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_millis(key: &str, default: u64) -> Duration {
    Duration::from_millis(
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default),
    )
}

fn env_secs(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default),
    )
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port,
            database_path: env_or("DATABASE_PATH", "ivm.db"),
            jwt_secret: env_or("JWT_SECRET", "secret123"),
            environment: env_or("APP_ENV", "development"),
            uploads_dir: PathBuf::from(env_or("UPLOADS_DIR", "uploads")),
            logs_dir: PathBuf::from(env_or("LOGS_DIR", "logs")),
            web_dir: PathBuf::from(env_or("WEB_DIR", "web")),
            discount_race_window: env_millis("DISCOUNT_RACE_WINDOW_MS", 500),
            withdraw_race_window: env_millis("WITHDRAW_RACE_WINDOW_MS", 100),
            command_timeout: env_secs("COMMAND_TIMEOUT_SECS", 15),
            fetch_timeout: env_secs("FETCH_TIMEOUT_SECS", 15),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the request log written by the access log middleware.
    pub fn access_log_path(&self) -> PathBuf {
        self.logs_dir.join("app.log")
    }
}
