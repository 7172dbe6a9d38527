//! GRUB rescue image assembly
//!
//! Stages the kernel and a hand-written `grub.cfg` into a fixed layout and
//! hands the tree to `grub-mkrescue`:
//!
//! ```text
//! <staging>/boot/grub/grub.cfg
//! <staging>/boot/kfs.bin
//! ```
//!
//! The staging tree is reused between runs and never removed here.

use crate::app::Workspace;
use crate::error::TaskError;
use crate::metadata::ResolvedPaths;
use crate::process::Runner;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const GRUB_DIR: &str = "boot/grub";
pub const GRUB_CONFIG_NAME: &str = "grub.cfg";
/// Name of the kernel inside the image, independent of the package name.
pub const KERNEL_IMAGE_NAME: &str = "kfs.bin";

#[derive(Clone, Debug)]
pub struct ImageLayout {
    pub root: PathBuf,
}

impl ImageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn grub_dir(&self) -> PathBuf {
        self.root.join(GRUB_DIR)
    }

    pub fn grub_config(&self) -> PathBuf {
        self.grub_dir().join(GRUB_CONFIG_NAME)
    }

    pub fn kernel(&self) -> PathBuf {
        self.root.join("boot").join(KERNEL_IMAGE_NAME)
    }
}

/// Populate the staging tree. Safe to repeat on an existing tree.
pub fn stage(layout: &ImageLayout, kernel: &Path, grub_config: &Path) -> Result<(), TaskError> {
    let grub_dir = layout.grub_dir();
    fs::create_dir_all(&grub_dir).map_err(|source| TaskError::ImageIo {
        step: format!("creating {}", grub_dir.display()),
        source,
    })?;

    copy(kernel, &layout.kernel())?;
    // grub.cfg is opaque here; grub-mkrescue is the one that validates it.
    copy(grub_config, &layout.grub_config())?;
    Ok(())
}

fn copy(from: &Path, to: &Path) -> Result<(), TaskError> {
    log::debug!("Copying {} -> {}", from.display(), to.display());
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|source| TaskError::ImageIo {
            step: format!("copying {} to {}", from.display(), to.display()),
            source,
        })
}

/// Stage the freshly built kernel and package it. Returns the ISO path.
pub fn assemble<R: Runner>(
    runner: &mut R,
    ws: &Workspace,
    paths: &ResolvedPaths,
) -> Result<PathBuf> {
    let image = &ws.config.image;
    let layout = ImageLayout::new(ws.root.join(&image.staging_dir));
    let iso = ws.root.join(&image.iso);

    log::info!("📦 Staging GRUB image in {}", layout.root.display());
    stage(&layout, &paths.kernel, &ws.root.join(&image.grub_config))?;

    log::info!("💿 Creating {}...", iso.display());
    let mkrescue = &ws.config.tools.mkrescue;
    let mut cmd = Command::new(mkrescue);
    // Both paths already carry the project root.
    cmd.arg("-o").arg(&iso).arg(&layout.root);

    let status = runner.status(&mut cmd).map_err(|source| TaskError::ImageIo {
        step: format!("running `{mkrescue}`"),
        source,
    })?;
    if !status.success() {
        return Err(TaskError::ImagePackager {
            program: mkrescue.clone(),
            status,
        }
        .into());
    }

    Ok(iso)
}
