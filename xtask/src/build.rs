//! Toolchain delegates: build, clean, rebuild and artifact size.
//!
//! Compilation and artifact removal are cargo's business; this module only
//! sequences the calls and turns a non-zero exit into a `TaskError`.

use crate::app::Workspace;
use crate::error::TaskError;
use crate::metadata::ResolvedPaths;
use crate::process::Runner;
use anyhow::{Context, Result};
use std::fs;

pub fn build<R: Runner>(runner: &mut R, ws: &Workspace, paths: &ResolvedPaths) -> Result<()> {
    log::info!("🔨 Building {} ({})...", paths.package, ws.profile);

    let mut cmd = ws.cargo_command();
    cmd.arg("build")
        .args(["--target", ws.config.build.target.as_str()])
        .args(ws.profile.cargo_flags())
        .args(&ws.config.build.extra_args);

    let status = runner
        .status(&mut cmd)
        .with_context(|| format!("Failed to run {} build", ws.cargo.display()))?;
    if !status.success() {
        return Err(TaskError::Build(status).into());
    }

    log::debug!("Kernel binary: {}", paths.kernel.display());
    Ok(())
}

pub fn clean<R: Runner>(runner: &mut R, ws: &Workspace) -> Result<()> {
    log::info!("🧹 Cleaning...");

    let mut cmd = ws.cargo_command();
    cmd.arg("clean");

    let status = runner
        .status(&mut cmd)
        .with_context(|| format!("Failed to run {} clean", ws.cargo.display()))?;
    if !status.success() {
        return Err(TaskError::Clean(status).into());
    }
    Ok(())
}

/// `clean` then `build`, as two separate cargo invocations. Paths are
/// resolved again after the clean.
pub fn rebuild<R: Runner>(runner: &mut R, ws: &Workspace) -> Result<()> {
    clean(runner, ws)?;
    let paths = ws.resolve(runner)?;
    build(runner, ws, &paths)
}

pub fn print_size<R: Runner>(runner: &mut R, ws: &Workspace, paths: &ResolvedPaths) -> Result<()> {
    build(runner, ws, paths)?;
    println!("{}", size_report(paths)?);
    Ok(())
}

/// `<path>: <bytes> bytes (<human>)` for the resolved kernel binary.
pub fn size_report(paths: &ResolvedPaths) -> Result<String> {
    let len = fs::metadata(&paths.kernel)
        .with_context(|| format!("Kernel binary not found at {}", paths.kernel.display()))?
        .len();
    Ok(format!(
        "{}: {len} bytes ({})",
        paths.kernel.display(),
        human_size(len)
    ))
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
