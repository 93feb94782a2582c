use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub tecopos: TecoposConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_minutes: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TecoposConfig {
    /// Base64 AES-256 key for stored Tecopos tokens; empty means generate per process
    #[serde(default)]
    pub tokens_secret_key: String,
}

fn default_token_lifetime() -> i64 {
    60 * 24
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 8000

[database]
path = "target/db/supplier_sales.db"

[auth]
jwt_secret = "change-me-supplier-sales-secret"
token_lifetime_minutes = 1440

[tecopos]
tokens_secret_key = ""
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Current directory
/// 3. Embedded default
///
/// `SUPPLIER_JWT_SECRET` and `TOKENS_SECRET_KEY` override the file values.
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    let mut config = None;
    for path in &candidates {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(path)?;
            config = Some(toml::from_str::<Config>(&contents)?);
            break;
        }
    }

    let mut config = match config {
        Some(c) => c,
        None => {
            tracing::warn!("config.toml not found, using default embedded configuration");
            toml::from_str(DEFAULT_CONFIG)?
        }
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(secret) = std::env::var("SUPPLIER_JWT_SECRET") {
        if !secret.is_empty() {
            config.auth.jwt_secret = secret;
        }
    }
    if let Ok(key) = std::env::var("TOKENS_SECRET_KEY") {
        if !key.is_empty() {
            config.tecopos.tokens_secret_key = key;
        }
    }
}

/// Store the loaded configuration for the rest of the process
pub fn init(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already initialized"))
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Configuration has not been initialized")
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.path, "target/db/supplier_sales.db");
        assert_eq!(config.auth.token_lifetime_minutes, 1440);
        assert!(config.tecopos.tokens_secret_key.is_empty());
    }

    #[test]
    fn test_optional_sections_default() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000
            [database]
            path = "/tmp/app.db"
            [auth]
            jwt_secret = "s"
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.token_lifetime_minutes, 60 * 24);
        assert!(config.tecopos.tokens_secret_key.is_empty());
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/app.db"));
    }
}
