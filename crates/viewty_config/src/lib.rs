pub mod models;

pub use models::{AppConfig, DatabaseConfig, SchedulingConfig, ServerConfig};

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use tracing::debug;

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads `.env` once per process. Safe to call from every crate that needs
/// environment-backed configuration.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment from .env");
        }
    });
}

/// Loads the application configuration.
///
/// Sources, later ones winning: `config/default.{toml,yaml,...}`, an optional
/// `config/{RUN_ENV}` file, then `APP_`-prefixed environment variables with
/// `__` as the section separator (e.g. `APP_SERVER__PORT=9000`,
/// `APP_DATABASE__URL=sqlite://viewty.db`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
