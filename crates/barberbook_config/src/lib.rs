use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};

pub mod env_vars;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning: `config/default.*`, `config/<RUN_ENV>.*`,
/// then `<PREFIX>__SECTION__KEY` environment variables. Marker values are
/// resolved afterwards, see [`env_vars::inject_env_vars`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    load_config_from(&config_dir())
}

/// Same as [`load_config`] but reads the files from `dir`.
pub fn load_config_from(dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();

    let default_path = dir.join("default");
    let env_path = dir.join(&run_env);

    tracing::debug!(
        "loading config from {} (RUN_ENV={})",
        dir.display(),
        run_env
    );

    let raw: serde_json::Value = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    apply_env_overrides_from_marker(raw)
}

/// Resolves `secret_from_env` markers and deserializes the result.
pub fn apply_env_overrides_from_marker(
    mut raw: serde_json::Value,
) -> Result<AppConfig, ConfigError> {
    let missing = env_vars::inject_env_vars(&mut raw);
    if !missing.is_empty() {
        tracing::warn!("unresolved config secrets: {}", missing.join(", "));
    }
    serde_json::from_value(raw)
        .map_err(|err| ConfigError::Message(format!("failed to parse config: {err}")))
}

/// `CONFIG_DIR` if set, else `./config` when present, else the workspace's `config/`.
fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let local = PathBuf::from("config");
    if local.is_dir() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2) // crates/barberbook_config -> workspace root
        .map(|root| root.join("config"))
        .unwrap_or(local)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, else the first command line argument
/// when it starts with `.env`, else `.env`. Loading happens once per process;
/// the chosen path is returned either way.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config_dir(name: &str, body: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("barberbook-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("default.toml"), body).unwrap();
        dir
    }

    #[test]
    fn loads_defaults_and_resolves_markers() {
        env::set_var("BOOKING_BARBER_EMAIL", "owner@example.com");
        let dir = temp_config_dir(
            "markers",
            r#"
use_resend = true

[server]
host = "127.0.0.1"
port = 8080

[booking]
open_time = "10:00"
close_time = "20:00"
step_minutes = 15
barber_email = "secret_from_env"
"#,
        );

        let config = load_config_from(&dir).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.use_resend);
        assert_eq!(config.booking.barber_email(), Some("owner@example.com"));
        assert_eq!(config.booking.shop_name(), DEFAULT_SHOP_NAME);
        assert_eq!(config.booking.time_zone(), DEFAULT_TIME_ZONE);
        assert!(config.resend.is_none());
    }

    #[test]
    fn missing_server_section_is_an_error() {
        let dir = temp_config_dir("noserver", "use_resend = false\n");
        assert!(load_config_from(&dir).is_err());
    }
}
