//! Log subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::Error;

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` when the variable is unset.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the directive is malformed or a global
/// subscriber is already installed.
pub fn init(default_directive: &str) -> Result<(), Error> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive).map_err(|e| Error::Logging(e.to_string()))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
