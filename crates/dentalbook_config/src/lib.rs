//! Configuration for the dental appointment service.
//!
//! Settings are layered with the `config` crate: built-in defaults, then
//! `config/default.*`, then `config/{RUN_ENV}.*`, then `DENTALBOOK__*`
//! environment variables, and finally the conventional `DATABASE_URL` and
//! `PORT` variables. A `.env` file is loaded once before the environment is read.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Prefix for structured environment overrides, e.g. `DENTALBOOK__SERVER__HOST`.
pub const ENV_PREFIX: &str = "DENTALBOOK";

/// Plain environment variable carrying the store connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Plain environment variable selecting the listening port.
pub const PORT_VAR: &str = "PORT";

/// Loads the application configuration from the process environment.
///
/// Fails when the database URL is absent or empty, or when any value cannot be
/// deserialized (for example a non-numeric `PORT`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let mut overrides = Vec::new();
    if let Ok(url) = env::var(DATABASE_URL_VAR) {
        overrides.push(("database.url", url));
    }
    if let Ok(port) = env::var(PORT_VAR) {
        overrides.push(("server.port", port));
    }

    load_config_from(&config_dir, &run_env, &overrides)
}

/// Loads the configuration from an explicit directory with explicit overrides.
///
/// `overrides` are applied last, keyed by dotted config path.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    overrides: &[(&str, String)],
) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading configuration from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    for (key, value) in overrides {
        builder = builder.set_override(*key, value.as_str())?;
    }

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Rejects configurations the service cannot start with.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.database_url().is_none() {
        return Err(ConfigError::Message(format!(
            "database.url is not configured; set {DATABASE_URL_VAR} or {ENV_PREFIX}__DATABASE__URL"
        )));
    }
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, at most once.
///
/// `DOTENV_OVERRIDE` selects the file; otherwise `.env` in the working
/// directory is used. A missing file is not an error. Returns the path tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
