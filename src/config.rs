//! On-disk configuration.
//!
//! Maps the optional `~/.config/inkdown/config.yaml` onto [`RenderOptions`].
//! Every field has a default, so a partial file is fine — and a malformed
//! one degrades to the defaults with a logged warning rather than aborting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::RenderOptions;
use crate::table::TableStyle;

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_width() -> usize {
    80
}

fn default_table_style() -> String {
    "unicode".to_string()
}

// ---------------------------------------------------------------------------
// File config
// ---------------------------------------------------------------------------

/// The `config.yaml` schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileConfig {
    /// Output width in columns.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Left padding in columns.
    #[serde(default)]
    pub pad: usize,

    /// Whether the pattern grammar layer is enabled.
    #[serde(default = "default_true")]
    pub patterns: bool,

    /// Whether to emit colors and attributes.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Collapse pattern-matched numbered items to one truncated line.
    #[serde(default)]
    pub truncate: bool,

    /// Table border style: "unicode", "ascii", or "rounded".
    #[serde(default = "default_table_style")]
    pub table_style: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            pad: 0,
            patterns: true,
            color: true,
            truncate: false,
            table_style: default_table_style(),
        }
    }
}

impl FileConfig {
    /// Translate the file schema into live render options. An unrecognized
    /// table style falls back to unicode.
    pub fn into_options(self) -> RenderOptions {
        let table_style = match self.table_style.as_str() {
            "ascii" => TableStyle::Ascii,
            "rounded" => TableStyle::Rounded,
            "unicode" => TableStyle::Unicode,
            other => {
                log::warn!("unknown table_style {other:?}, using unicode");
                TableStyle::Unicode
            }
        };
        RenderOptions {
            width: self.width,
            pad: self.pad,
            patterns_enabled: self.patterns,
            no_color: !self.color,
            truncate_mode: self.truncate,
            table_style,
        }
    }
}

/// Errors from reading or parsing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// The conventional config file location, when a config dir exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inkdown").join("config.yaml"))
}

/// Load and parse a specific config file.
pub fn load_from(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml_ng::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the conventional config file. Missing file means defaults; a broken
/// file means defaults plus a warning — never a hard failure.
pub fn load() -> FileConfig {
    let Some(path) = config_path() else {
        return FileConfig::default();
    };
    if !path.exists() {
        return FileConfig::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; falling back to defaults");
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.width, 80);
        assert!(config.patterns);
        assert!(config.color);
        assert!(!config.truncate);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: FileConfig = serde_yaml_ng::from_str("width: 100\n").unwrap();
        assert_eq!(config.width, 100);
        assert!(config.patterns);
        assert_eq!(config.table_style, "unicode");
    }

    #[test]
    fn test_into_options() {
        let config: FileConfig =
            serde_yaml_ng::from_str("color: false\ntable_style: ascii\n").unwrap();
        let options = config.into_options();
        assert!(options.no_color);
        assert_eq!(options.table_style, TableStyle::Ascii);
    }

    #[test]
    fn test_unknown_table_style_falls_back() {
        let config: FileConfig = serde_yaml_ng::from_str("table_style: dotted\n").unwrap();
        assert_eq!(config.into_options().table_style, TableStyle::Unicode);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width: 72\ntruncate: true").unwrap();
        let config = load_from(file.path()).unwrap();
        assert_eq!(config.width, 72);
        assert!(config.truncate);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let err = load_from(Path::new("/nonexistent/inkdown.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_bad_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width: [not a number").unwrap();
        let err = load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
