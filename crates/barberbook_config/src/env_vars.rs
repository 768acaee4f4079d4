//! Environment variable handling for Barberbook.
//!
//! Config files may hold the marker `"secret_from_env"` instead of a value.
//! The marker is resolved from the environment using two naming patterns,
//! the prefixed one first and the plain `SECTION_KEY` one second, so the
//! usual deployment names (`RESEND_API_KEY`, `BOOKING_BARBER_EMAIL`) work
//! as they are.

use std::env;

/// Marker string replaced by an environment variable at load time.
pub const SECRET_MARKER: &str = "secret_from_env";

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BARBERBOOK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to the prefixed environment variable name
///
/// `resend.api_key` becomes `BARBERBOOK_SECRET_RESEND_API_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!(
        "{}{sep}SECRET{sep}{}",
        get_config_prefix(),
        path,
        sep = SECRET_SEPARATOR
    )
    .to_uppercase()
}

/// Convert a secret path to its plain environment variable name
///
/// `booking.barber_email` becomes `BOOKING_BARBER_EMAIL`.
pub fn plain_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Look up the value for a marked path, prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path))
        .or_else(|_| env::var(plain_path_to_env_var(path)))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Replace every marker in `value` with its environment value.
///
/// Markers without a matching variable become `null`, so optional fields
/// deserialize as `None` instead of carrying the marker text. Returns the
/// paths that could not be resolved.
pub fn inject_env_vars(value: &mut serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    fn walk(path: &mut Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_secret_env_var(&path_str) {
                    Some(env_val) => *obj = Value::String(env_val),
                    None => {
                        tracing::warn!("env var for {} not found", path_str);
                        missing.push(path_str);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &mut missing);
    missing
}
