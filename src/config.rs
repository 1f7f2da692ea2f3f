use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/ProductCatalogAPI";
const DEV_SECRET_KEY: &str = "secret";

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub log_level: String,
    pub secret_key: String,
    pub token_ttl_secs: u64,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    /// Echo raw storage/internal error text in 500 responses.
    pub expose_internal_errors: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("secret_key", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("rate_limit_max", &self.rate_limit_max)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("expose_internal_errors", &self.expose_internal_errors)
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: parsed("PORT").unwrap_or(3000),
            database_url: env::var("MONGODB_URI")
                .or_else(|_| env::var("MONGO_URI"))
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            secret_key: env::var("SECRET_KEY")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_else(|_| DEV_SECRET_KEY.to_string()),
            token_ttl_secs: parsed("TOKEN_TTL_SECS").unwrap_or(3600),
            rate_limit_max: parsed("RATE_LIMIT_MAX").unwrap_or(100),
            rate_limit_window_secs: parsed("RATE_LIMIT_WINDOW_SECS").unwrap_or(600),
            expose_internal_errors: parsed("EXPOSE_INTERNAL_ERRORS").unwrap_or(false),
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

// Read once, on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
