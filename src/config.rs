use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::check::JavaVersion;

/// Name of the configuration file looked up next to the snapshot.
pub const CONFIG_FILE: &str = "sam-check.toml";

/// Configuration loaded from `sam-check.toml`.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct SamCheckConfig {
    /// Java source level of the analysed project: `11`, `"11"` or `"1.7"`.
    /// Unset means "assume 8 or greater". Kept as a raw value so a malformed level cannot
    /// discard the rest of the file.
    pub java_version: Option<toml::Value>,
    /// Glob patterns over qualified interface names to leave unreported.
    pub exclude: Option<Vec<String>>,
}

impl SamCheckConfig {
    /// Load configuration from `sam-check.toml` in the given directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!("failed to parse {CONFIG_FILE}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                warn!("failed to read {CONFIG_FILE}: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// The configured source level. Values that are neither an integer nor a version
    /// string are ignored with a warning.
    pub fn java_version(&self) -> JavaVersion {
        match &self.java_version {
            None => JavaVersion::not_set(),
            Some(toml::Value::String(raw)) => JavaVersion::parse(raw),
            Some(toml::Value::Integer(n)) => JavaVersion::parse(&n.to_string()),
            Some(other) => {
                warn!("ignoring java_version {other}: expected a number or a string");
                JavaVersion::not_set()
            }
        }
    }

    /// Compile the exclude globs. Invalid patterns are skipped with a warning.
    pub fn exclude_patterns(&self) -> Vec<glob::Pattern> {
        self.exclude
            .iter()
            .flatten()
            .filter_map(|raw| match glob::Pattern::new(raw) {
                Ok(p) => Some(p),
                Err(err) => {
                    warn!("ignoring exclude pattern {raw:?}: {err}");
                    None
                }
            })
            .collect()
    }
}
