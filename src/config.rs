//! Generator configuration loaded from `foggo.toml`
//!
//! The file is optional. It is looked up in the target package directory
//! unless a path is given explicitly, and every value has a default:
//!
//! ```toml
//! format = true
//! formatter = ["goimports"]
//! output_suffix = "_gen"
//!
//! [exclude]
//! tag = "foggo"            # skip fields tagged `foggo:"-"`
//! # comment = "foggo:ignore"  # or: skip fields with this comment
//! ```
//!
//! `FOGGO_FORMATTER` overrides `formatter`; CLI flags override everything.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FoggoError;
use crate::generator::{CommandFormatter, DEFAULT_FORMATTER};
use crate::parser::ExclusionMarker;
use crate::writer::DEFAULT_OUTPUT_SUFFIX;

/// File name searched for in the package directory
pub const CONFIG_FILE_NAME: &str = "foggo.toml";

/// Settings for one generator run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Run the formatter over generated code
    pub format: bool,
    /// Formatter command and arguments
    pub formatter: Vec<String>,
    /// Suffix for the generated file's stem
    pub output_suffix: String,
    /// Field exclusion marker
    pub exclude: ExcludeConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            format: true,
            formatter: DEFAULT_FORMATTER.iter().map(|s| s.to_string()).collect(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            exclude: ExcludeConfig::default(),
        }
    }
}

/// `[exclude]` table; at most one of `tag` and `comment`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
    pub tag: Option<String>,
    pub comment: Option<String>,
}

impl ExcludeConfig {
    /// The marker described by this table
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Config` when both `tag` and `comment` are set,
    /// or when the one set is blank.
    pub fn marker(&self) -> Result<ExclusionMarker, FoggoError> {
        let marker = match (&self.tag, &self.comment) {
            (Some(_), Some(_)) => {
                return Err(FoggoError::Config(
                    "exclude.tag and exclude.comment are mutually exclusive".into(),
                ))
            }
            (Some(key), None) => ExclusionMarker::tag(key.as_str()),
            (None, Some(directive)) => ExclusionMarker::comment(directive.as_str()),
            (None, None) => ExclusionMarker::default(),
        };
        marker.validate()?;
        Ok(marker)
    }
}

impl GeneratorConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Config` on invalid TOML or unknown keys.
    pub fn from_toml(contents: &str) -> Result<Self, FoggoError> {
        toml::from_str(contents).map_err(|e| FoggoError::Config(e.to_string()))
    }

    /// Load configuration from `path`
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FoggoError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FoggoError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| FoggoError::Config(format!("{}: {e}", path.display())))
    }

    /// Load `explicit` if given, else `foggo.toml` in `package_dir` if
    /// present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Config` if the selected file is unreadable or invalid.
    pub fn resolve(explicit: Option<&Path>, package_dir: &Path) -> Result<Self, FoggoError> {
        match explicit {
            Some(path) => GeneratorConfig::load(path),
            None => match auto_detect_config_path(package_dir) {
                Some(path) => GeneratorConfig::load(&path),
                None => Ok(GeneratorConfig::default()),
            },
        }
    }

    /// Formatter for this configuration, honouring `FOGGO_FORMATTER`
    pub fn formatter(&self) -> CommandFormatter {
        CommandFormatter::from_env_or(self.formatter.clone())
    }
}

/// `foggo.toml` in `package_dir`, if it exists
pub fn auto_detect_config_path(package_dir: &Path) -> Option<PathBuf> {
    let path = package_dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}
