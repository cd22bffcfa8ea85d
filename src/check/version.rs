use std::fmt;

use tracing::warn;

/// The Java source level of the analysed project, if configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JavaVersion(Option<u32>);

impl JavaVersion {
    pub fn new(version: u32) -> Self {
        Self(Some(version))
    }

    pub fn not_set() -> Self {
        Self(None)
    }

    /// Parse a `sonar.java.source` style value: `1.7` and `7` both mean Java 7.
    ///
    /// Anything unreadable is treated as not set, with a warning.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let major = trimmed.strip_prefix("1.").unwrap_or(trimmed);
        match major.parse::<u32>() {
            Ok(version) => Self::new(version),
            Err(_) => {
                warn!("invalid java version {raw:?}, assuming 8 or greater");
                Self::not_set()
            }
        }
    }

    pub fn is_set(self) -> bool {
        self.0.is_some()
    }

    /// True when unset, or when the source level is 8 or above.
    pub fn is_java8_compatible(self) -> bool {
        self.0.is_none_or(|v| v >= 8)
    }

    /// Suffix appended to issue messages that assume Java 8 features.
    pub fn java8_compatibility_message(self) -> &'static str {
        if self.is_set() {
            ""
        } else {
            " (sonar.java.source not set. Assuming 8 or greater.)"
        }
    }
}

impl From<Option<u32>> for JavaVersion {
    fn from(value: Option<u32>) -> Self {
        Self(value)
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("not set"),
        }
    }
}
