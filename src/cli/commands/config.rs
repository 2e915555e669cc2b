//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::Output;
use crate::config::Config;
use crate::registry;

/// Dotted keys accepted by `config get` and `config set`
pub const KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "dashboard.host_address",
    "dashboard.default_game",
    "dashboard.poll_interval_secs",
    "dashboard.recheck_delay_secs",
    "dashboard.track_joinability",
    "launcher.theme",
];

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "api.base_url", "dashboard.default_game")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "api.base_url", "dashboard.default_game")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub fn run(command: ConfigCommands, out: Output) -> Result<()> {
    match command {
        ConfigCommands::Show => show(out),
        ConfigCommands::Get { key } => get(&key, out),
        ConfigCommands::Set { key, value } => set(&key, &value, out),
        ConfigCommands::Path => path(out),
    }
}

fn show(out: Output) -> Result<()> {
    let config = Config::load()?;
    let text = toml::to_string_pretty(&config)?;
    out.value(&config, |_| text);
    Ok(())
}

fn get(key: &str, out: Output) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;
    out.value(&value, |v| v.clone());
    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!("Unknown config key: {} (known: {})", key, KEYS.join(", "))
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(config.api.base_url.clone()),
        ["api", "timeout_secs"] => Ok(config.api.timeout_secs.to_string()),
        ["dashboard", "host_address"] => Ok(config.dashboard.host_address.clone()),
        ["dashboard", "default_game"] => Ok(config.dashboard.default_game.clone()),
        ["dashboard", "poll_interval_secs"] => Ok(config.dashboard.poll_interval_secs.to_string()),
        ["dashboard", "recheck_delay_secs"] => Ok(config.dashboard.recheck_delay_secs.to_string()),
        ["dashboard", "track_joinability"] => Ok(config.dashboard.track_joinability.to_string()),
        ["launcher", "theme"] => Ok(config.launcher.theme.name().to_string()),
        _ => Err(unknown_key(key)),
    }
}

fn set(key: &str, value: &str, out: Output) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    out.note(&format!("Set {} = {}", key, value));
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                anyhow::bail!("api.base_url must start with http:// or https://");
            }
            config.api.base_url = value.trim_end_matches('/').to_string();
        }
        ["api", "timeout_secs"] => {
            config.api.timeout_secs = value.parse()?;
        }
        ["dashboard", "host_address"] => {
            config.dashboard.host_address = value.to_string();
        }
        ["dashboard", "default_game"] => {
            if registry::find(value).is_none() {
                anyhow::bail!(
                    "Unknown game: {} (known: {})",
                    value,
                    registry::ids().collect::<Vec<_>>().join(", ")
                );
            }
            config.dashboard.default_game = value.to_string();
        }
        ["dashboard", "poll_interval_secs"] => {
            config.dashboard.poll_interval_secs = value.parse()?;
        }
        ["dashboard", "recheck_delay_secs"] => {
            config.dashboard.recheck_delay_secs = value.parse()?;
        }
        ["dashboard", "track_joinability"] => {
            config.dashboard.track_joinability = value.parse()?;
        }
        ["launcher", "theme"] => {
            config.launcher.theme = value.parse()?;
        }
        _ => return Err(unknown_key(key)),
    }

    Ok(())
}

fn path(out: Output) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    out.value(&result, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemePreset;

    #[test]
    fn test_get_defaults() {
        let config = Config::default();
        assert_eq!(
            get_config_value(&config, "api.base_url").unwrap(),
            "http://localhost:3000/api"
        );
        assert_eq!(get_config_value(&config, "dashboard.poll_interval_secs").unwrap(), "5");
        assert_eq!(get_config_value(&config, "launcher.theme").unwrap(), "Graphite");
    }

    #[test]
    fn test_set_then_get() {
        let mut config = Config::default();
        set_config_value(&mut config, "dashboard.default_game", "rust").unwrap();
        set_config_value(&mut config, "dashboard.track_joinability", "false").unwrap();
        set_config_value(&mut config, "launcher.theme", "midnight").unwrap();
        set_config_value(&mut config, "api.base_url", "http://10.0.0.2:3000/api/").unwrap();

        assert_eq!(config.dashboard.default_game, "rust");
        assert!(!config.dashboard.track_joinability);
        assert_eq!(config.launcher.theme, ThemePreset::Midnight);
        assert_eq!(config.api.base_url, "http://10.0.0.2:3000/api");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "dashboard.default_game", "factorio").is_err());
        assert!(set_config_value(&mut config, "dashboard.poll_interval_secs", "soon").is_err());
        assert!(set_config_value(&mut config, "api.base_url", "localhost:3000").is_err());
        assert!(set_config_value(&mut config, "launcher.locale", "en").is_err());
        assert_eq!(config.dashboard.default_game, "satisfactory");
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in KEYS {
            assert!(get_config_value(&config, key).is_ok(), "{}", key);
        }
        let err = get_config_value(&config, "game.directory").unwrap_err().to_string();
        assert!(err.contains("dashboard.track_joinability"));
    }
}
