//! Shared TOML loading used by every `config/*.toml` consumer.
use std::{fmt, fs, io, path::Path};

use bevy::log::warn;
use serde::de::DeserializeOwned;

/// Failure reading or parsing a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: io::Error },
    Parse { path: String, message: String },
}

impl ConfigError {
    #[cfg(test)]
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read {}: {}", path, source),
            Self::Parse { path, message } => write!(f, "failed to parse {}: {}", path, message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

/// Reads and deserializes a TOML file.
pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_toml(&data, &path.display().to_string())
}

/// Deserializes TOML text, tagging errors with the originating path.
pub fn parse_toml<T: DeserializeOwned>(data: &str, path: &str) -> Result<T, ConfigError> {
    toml::from_str::<T>(data).map_err(|err| ConfigError::Parse {
        path: path.to_string(),
        message: err.to_string(),
    })
}

/// Loads `path`, logging and falling back to `T::default()` on any error.
pub fn load_toml_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    match load_toml(path) {
        Ok(value) => value,
        Err(err) => {
            warn!("{}. Falling back to defaults.", err);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Default, PartialEq)]
    #[serde(default)]
    struct Sample {
        speed: f32,
        label: String,
    }

    #[test]
    fn parses_partial_documents_with_defaults() {
        let parsed: Sample = parse_toml("speed = 2.5", "inline.toml").expect("valid toml");
        assert_eq!(parsed.speed, 2.5);
        assert!(parsed.label.is_empty());
    }

    #[test]
    fn parse_errors_carry_path() {
        let err = parse_toml::<Sample>("speed = [", "broken.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), "broken.toml");
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_file_reports_read_error_and_defaults() {
        let err = load_toml::<Sample>("config/does-not-exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let fallback: Sample = load_toml_or_default("config/does-not-exist.toml");
        assert_eq!(fallback, Sample::default());
    }
}
