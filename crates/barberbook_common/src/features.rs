//! Runtime feature checks.
//!
//! Compile-time features (`#[cfg(feature = "...")]`) decide which crates are
//! linked into the backend; these helpers decide at runtime, from the loaded
//! configuration, whether a linked integration should actually be used.

use barberbook_config::AppConfig;
use std::sync::Arc;

/// A feature is on when its flag is set and its config section is present.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if e-mail relay through Resend is enabled at runtime.
#[cfg(feature = "resend")]
pub fn is_resend_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_resend, config.resend.as_ref())
}
