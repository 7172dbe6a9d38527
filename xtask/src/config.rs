//! Configuration file support for xtask
//!
//! Reads xtask.toml from the project root. Every key is optional. The QEMU
//! hardware profile is fixed per product variant and has no key here;
//! unknown sections are rejected so a stray `[qemu]` table fails loudly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "xtask.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XtaskConfig {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[cfg_attr(not(feature = "grub"), allow(dead_code))]
    #[serde(default)]
    pub image: ImageConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Target triple or path to a custom `*.json` target specification.
    #[serde(default = "default_target")]
    pub target: String,

    /// Appended to every `cargo build` invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            target: default_target(),
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default = "default_qemu")]
    pub qemu: String,

    #[cfg_attr(not(feature = "grub"), allow(dead_code))]
    #[serde(default = "default_mkrescue")]
    pub mkrescue: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            qemu: default_qemu(),
            mkrescue: default_mkrescue(),
        }
    }
}

/// Paths are relative to the project root.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(not(feature = "grub"), allow(dead_code))]
pub struct ImageConfig {
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    #[serde(default = "default_grub_config")]
    pub grub_config: PathBuf,

    #[serde(default = "default_iso")]
    pub iso: PathBuf,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            staging_dir: default_staging_dir(),
            grub_config: default_grub_config(),
            iso: default_iso(),
        }
    }
}

fn default_target() -> String {
    "i386-unknown-none.json".to_string()
}
fn default_qemu() -> String {
    "qemu-system-i386".to_string()
}
fn default_mkrescue() -> String {
    "grub-mkrescue".to_string()
}
fn default_staging_dir() -> PathBuf {
    PathBuf::from("iso_root")
}
fn default_grub_config() -> PathBuf {
    PathBuf::from("grub.cfg")
}
fn default_iso() -> PathBuf {
    PathBuf::from("kfs.iso")
}

impl XtaskConfig {
    /// Load `<root>/xtask.toml`, or defaults if the file doesn't exist.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults", root.display());
            return Ok(XtaskConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
