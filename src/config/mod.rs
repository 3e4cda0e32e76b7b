mod types;

pub use types::*;

use std::path::Path;

use vidsplit_common::{Error, Result};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {e}", path)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {e}", path)))?;

    validate_config(&config)?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./vidsplit.toml", "~/.config/vidsplit/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn validate_config(config: &Config) -> Result<()> {
    let factor = config.split.filesize_factor;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::Config(format!(
            "split.filesize_factor must be positive, got {factor}"
        )));
    }

    if config.split.vcodec.trim().is_empty() || config.split.acodec.trim().is_empty() {
        return Err(Error::Config("split codecs cannot be empty".to_string()));
    }

    for (name, path) in [
        ("ffmpeg", &config.tools.ffmpeg_path),
        ("ffprobe", &config.tools.ffprobe_path),
    ] {
        if let Some(path) = path {
            if !path.exists() {
                tracing::warn!("Configured {name} path does not exist: {:?}", path);
            }
        }
    }

    Ok(())
}
