//! User configuration: default toggles read from disk.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/lsct/config.toml` (default `~/.config/lsct/config.toml`).
//! Every toggle has a `--flag` / `--no-flag` pair on the command line that
//! overrides the file in either direction.

use std::path::PathBuf;

use crate::core::{emit::EmitConfig, fs::WalkConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Do not skip dot-prefixed entries.
    pub include_hidden: bool,
    /// Print `"<mime>: <path>"` records.
    pub mime_format: bool,
    /// Terminate records with NUL instead of newline.
    pub null_terminator: bool,
    /// Treat an inaccessible root argument as a warning.
    pub ignore_inaccessible_roots: bool,
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim() == "true";

            match key.trim() {
                "include_hidden" => config.include_hidden = value,
                "mime_format" => config.mime_format = value,
                "null_terminator" => config.null_terminator = value,
                "ignore_inaccessible_roots" => config.ignore_inaccessible_roots = value,
                _ => {}
            }
        }

        config
    }

    pub fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            include_hidden: self.include_hidden,
            ignore_inaccessible_roots: self.ignore_inaccessible_roots,
        }
    }

    pub fn emit_config(&self) -> EmitConfig {
        EmitConfig {
            mime_format: self.mime_format,
            terminator: if self.null_terminator { b'\0' } else { b'\n' },
        }
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/lsct/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("lsct").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        let config = AppConfig::parse_config(
            "# lsct configuration\n\
             [listing]\n\
             include_hidden = true\n\
             mime_format=true\n\
             null_terminator = false\n",
        );
        assert!(config.include_hidden);
        assert!(config.mime_format);
        assert!(!config.null_terminator);
        assert!(!config.ignore_inaccessible_roots);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let config = AppConfig::parse_config(
            "nonsense\ncolour = true\n = true\nignore_inaccessible_roots = yes\n",
        );
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_derived_configs() {
        let config = AppConfig {
            null_terminator: true,
            ignore_inaccessible_roots: true,
            ..Default::default()
        };
        assert_eq!(config.emit_config().terminator, 0);
        assert!(!config.emit_config().mime_format);
        assert!(config.walk_config().ignore_inaccessible_roots);
        assert!(!config.walk_config().include_hidden);
    }
}
