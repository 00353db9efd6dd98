//! Run configuration: parsing and validation.
//!
//! Validation runs in two phases. [`ConfigDraft::parse`] turns raw text into a
//! mapping and checks that every required key is present; [`ConfigDraft::validate`]
//! coerces the values into an immutable [`RunConfig`]. The split lets the job
//! learn `version` before value coercion can fail, so an error record can still
//! carry it.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys that must be present, in the order they are checked.
pub const REQUIRED_KEYS: [&str; 3] = ["seed", "window", "version"];

/// Largest accepted seed (seeds are 32-bit).
pub const MAX_SEED: u64 = u32::MAX as u64;

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read, or its text is not valid structured data.
    #[error("Failed to load config file: {0}")]
    Parse(String),

    /// The document parsed but is not a key-value mapping.
    #[error("Invalid config structure: must be a YAML dictionary")]
    Shape,

    #[error("Missing required config key: {0}")]
    MissingKey(&'static str),

    #[error("Invalid config value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Text format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension. Unknown or missing extensions are YAML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Parse `text` into a format-neutral document.
    fn parse_document(self, text: &str) -> Result<Value, ConfigError> {
        let parsed = match self {
            Self::Yaml => {
                if is_empty_yaml(text) {
                    return Ok(Value::Null);
                }
                serde_yaml::from_str::<serde_yaml::Value>(text)
                    .map_err(|e| e.to_string())
                    .and_then(|doc| serde_json::to_value(doc).map_err(|e| e.to_string()))
            }
            Self::Toml => toml::from_str::<toml::Table>(text)
                .map_err(|e| e.to_string())
                .and_then(|table| serde_json::to_value(table).map_err(|e| e.to_string())),
            Self::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(ConfigError::Parse)
    }
}

/// A YAML stream with no document in it (blank, comments, bare markers) loads as null.
fn is_empty_yaml(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// A parsed config whose required keys are all present but not yet coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDraft {
    version: String,
    seed: Value,
    window: Value,
}

impl ConfigDraft {
    /// Read and parse a config file, choosing the format from its extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::parse(&text, ConfigFormat::from_path(path))
    }

    /// Parse config text and check the required keys in order.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let Value::Object(mut map) = format.parse_document(text)? else {
            return Err(ConfigError::Shape);
        };

        for key in REQUIRED_KEYS {
            if !map.contains_key(key) {
                return Err(ConfigError::MissingKey(key));
            }
        }

        let seed = take(&mut map, "seed")?;
        let window = take(&mut map, "window")?;
        let version = render_version(take(&mut map, "version")?);

        Ok(Self {
            version,
            seed,
            window,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Coerce `seed` and `window` and produce the final config.
    pub fn validate(self) -> Result<RunConfig, ConfigError> {
        let seed = coerce_seed(&self.seed)?;
        let window = coerce_window(&self.window)?;
        Ok(RunConfig {
            version: self.version,
            seed,
            window,
        })
    }
}

fn take(map: &mut Map<String, Value>, key: &'static str) -> Result<Value, ConfigError> {
    map.remove(key).ok_or(ConfigError::MissingKey(key))
}

fn render_version(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn coerce_seed(value: &Value) -> Result<u32, ConfigError> {
    value
        .as_u64()
        .and_then(|seed| u32::try_from(seed).ok())
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "seed",
            reason: format!("expected an integer between 0 and {MAX_SEED}, got {value}"),
        })
}

/// Integer coercion for `window`: integers as-is, finite floats truncated,
/// booleans as 1/0, integer literals in strings parsed. Must end up >= 1.
fn coerce_window(value: &Value) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: "window",
        reason,
    };

    let n: i64 = match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(num) => match (num.as_i64(), num.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.is_finite() => f.trunc() as i64,
            _ => return Err(invalid(format!("cannot convert {num} to an integer"))),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("invalid integer literal '{s}'")))?,
        other => return Err(invalid(format!("expected an integer, got {other}"))),
    };

    if n < 1 {
        return Err(invalid(format!("must be a positive integer, got {n}")));
    }
    usize::try_from(n).map_err(|_| invalid(format!("{n} is out of range")))
}

/// Validated run configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    version: String,
    seed: u32,
    window: usize,
}

impl RunConfig {
    /// Build a config directly. `window` must be at least 1.
    pub fn new(version: impl Into<String>, seed: u32, window: usize) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::InvalidValue {
                key: "window",
                reason: "must be a positive integer, got 0".into(),
            });
        }
        Ok(Self {
            version: version.into(),
            seed,
            window,
        })
    }

    /// Load, parse and validate a config file in one step.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        ConfigDraft::from_file(path)?.validate()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
