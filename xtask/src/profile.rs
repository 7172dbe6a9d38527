//! Build profile selection
//!
//! The profile is read from the environment once in `app::run` and passed by
//! value from there on.

use std::env;
use std::fmt;

/// Environment switch selecting the release profile.
pub const RELEASE_ENV: &str = "RELEASE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildProfile {
    #[default]
    Debug,
    Release,
}

impl BuildProfile {
    pub fn from_env() -> Self {
        Self::from_value(env::var(RELEASE_ENV).ok().as_deref())
    }

    /// Anything not recognised as "on" selects Debug.
    pub fn from_value(value: Option<&str>) -> Self {
        let value = value.map(|v| v.trim().to_ascii_lowercase());
        match value.as_deref() {
            Some("1" | "true" | "yes" | "y" | "on") => BuildProfile::Release,
            _ => BuildProfile::Debug,
        }
    }

    /// Directory cargo writes this profile's artifacts to.
    pub fn dir_name(self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }

    pub fn cargo_flags(self) -> &'static [&'static str] {
        match self {
            BuildProfile::Debug => &[],
            BuildProfile::Release => &["--release"],
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
