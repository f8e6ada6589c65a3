use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULTS: &str = include_str!("../../defaults.toml");

/// How each parsed address is printed.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `192.168.1.1`
    #[default]
    Dotted,
    /// Each octet in lowercase hex: `c0.a8.1.1`
    Hex,
    /// The packed native-endian u32 in decimal
    Packed,
    /// One JSON object per token
    Json,
}

/// Which parser backend to run.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PathChoice {
    /// SIMD when the CPU supports it, scalar otherwise
    #[default]
    Auto,
    /// Require the SIMD backend
    Simd,
    /// Always use the scalar backend
    Scalar,
}

/// What to do with a token that is not a valid address.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Print the error message and keep going
    #[default]
    Report,
    /// Drop the token silently
    Skip,
    /// Stop with a non-zero exit status
    Fail,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParseSettings {
    #[serde(default)]
    pub path: PathChoice,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ErrorSettings {
    #[serde(default)]
    pub mode: ErrorMode,
    #[serde(default = "default_error_message")]
    pub message: String,
}

impl Default for ErrorSettings {
    fn default() -> Self {
        ErrorSettings {
            mode: ErrorMode::default(),
            message: default_error_message(),
        }
    }
}

fn default_error_message() -> String {
    "Error: Invalid IP Address.".to_string()
}

/// Effective CLI configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub parse: ParseSettings,
    #[serde(default)]
    pub errors: ErrorSettings,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_toml(DEFAULTS)?)
    }

    /// Load configuration with overrides from standard locations
    /// 1. Start with built-in defaults
    /// 2. Override with ~/.config/dotquad/config.toml if it exists
    /// 3. Override with ./dotquad.toml if it exists in current directory
    /// 4. Override with `extra` (tilde expanded) if given; failures here are fatal
    pub fn load_with_overrides(
        extra: Option<&str>,
        quiet: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut merged: toml::Table = toml::from_str(DEFAULTS)?;

        let mut optional: Vec<PathBuf> = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            optional.push(config_dir.join("dotquad").join("config.toml"));
        }
        optional.push(PathBuf::from("dotquad.toml"));

        for path in optional {
            if !path.exists() {
                continue;
            }
            match load_table(&path) {
                Ok(layer) => merge_tables(&mut merged, layer),
                Err(e) => {
                    if !quiet {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        if let Some(extra) = extra {
            let expanded = shellexpand::tilde(extra);
            let path = Path::new(expanded.as_ref());
            let layer = load_table(path)
                .map_err(|e| format!("Cannot load config '{}': {}", extra, e))?;
            merge_tables(&mut merged, layer);
        }

        Ok(toml::Value::Table(merged).try_into()?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

fn load_table(path: &Path) -> Result<toml::Table, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)?;
    // Validate the layer on its own so errors point at the right file
    toml::Value::Table(table.clone()).try_into::<Settings>()?;
    Ok(table)
}

/// Merge `overlay` into `base`, recursing into nested tables
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
