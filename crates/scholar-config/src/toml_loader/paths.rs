//! Where `scholar` keeps its config file, and first-run creation of it.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use scholar_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

const APP_DIR: &str = "scholar";
const FILE_NAME: &str = "config.toml";

fn io_failure(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {e}", path.display()))
}

/// `<config dir>/scholar/config.toml`, e.g. `~/.config/scholar/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented template to `path` unless a file is already there.
///
/// An existing file is never touched, even one created between the caller's
/// existence check and this call. The template leaves `[api.headers]`
/// commented out so the default `Content-Type` survives.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_failure("create config directory", parent, e))?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already present at {}, leaving it", path.display());
            return Ok(());
        }
        Err(e) => return Err(io_failure("create default config", path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_failure("write default config to", path, e))?;

    info!("created default config at {}", path.display());
    Ok(())
}
