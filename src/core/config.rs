use std::env;
use std::str::FromStr;

/// Runtime configuration, read once at startup. `main` loads `.env` (when
/// present) before calling [`Config::from_env`], so plain process env and
/// dotenv files are interchangeable.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Generation-service configuration for mood-to-genre resolution.
/// A missing API key is not an error: resolution degrades to the default genre.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Movie catalog configuration. A missing API key degrades lookups to empty results.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Empty values count as unset, so `GEMINI_API_KEY=` in a `.env` template
/// behaves like a missing key
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            tmdb: TmdbConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let cors_allowed_origins = env_or("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_parse("PORT", 3000)?,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Conservative pool defaults for a small service
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env_or("DB_HOST", "127.0.0.1"),
            port: env_parse("DB_PORT", 3306)?,
            user: env_or("DB_USER", "root"),
            password: env_or("DB_PASSWORD", ""),
            name: env_or("DB_NAME", "moodreel"),
            max_connections: env_parse("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: env_parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: env_parse("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: env_parse("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }

    pub fn connect_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

impl GeminiConfig {
    const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            api_key: env_opt("GEMINI_API_KEY"),
            model: env_or("GEMINI_MODEL", Self::DEFAULT_MODEL),
            base_url: env_or("GEMINI_BASE_URL", Self::DEFAULT_BASE_URL),
        })
    }
}

impl TmdbConfig {
    const DEFAULT_BASE_URL: &'static str = "https://api.themoviedb.org/3";

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            api_key: env_opt("TMDB_API_KEY"),
            base_url: env_or("TMDB_BASE_URL", Self::DEFAULT_BASE_URL),
        })
    }
}
