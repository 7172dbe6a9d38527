//! QEMU run commands

use crate::app::Workspace;
use crate::build;
use crate::error::TaskError;
use crate::metadata::ResolvedPaths;
use crate::process::Runner;
use crate::qemu::{BootMode, GdbStub, QemuBuilder, ACTIVE_PROFILE};
use anyhow::Result;

/// Build, then boot the kernel binary directly.
pub fn run_kernel<R: Runner>(
    runner: &mut R,
    ws: &Workspace,
    paths: &ResolvedPaths,
    gdb: GdbStub,
) -> Result<()> {
    build::build(runner, ws, paths)?;
    launch(runner, ws, BootMode::Kernel(paths.kernel.clone()), gdb)
}

/// Build, assemble the GRUB rescue image, then boot it as a CD-ROM.
#[cfg(feature = "grub")]
pub fn run_grub<R: Runner>(
    runner: &mut R,
    ws: &Workspace,
    paths: &ResolvedPaths,
    gdb: GdbStub,
) -> Result<()> {
    build::build(runner, ws, paths)?;
    let iso = crate::image::assemble(runner, ws, paths)?;
    launch(runner, ws, BootMode::Iso(iso), gdb)
}

/// Runs QEMU in the foreground until the guest powers off or the user quits.
fn launch<R: Runner>(runner: &mut R, ws: &Workspace, boot: BootMode, gdb: GdbStub) -> Result<()> {
    let qemu = &ws.config.tools.qemu;
    log::info!(
        "🚀 Starting {qemu} ({}, {})",
        ACTIVE_PROFILE.machine(),
        ACTIVE_PROFILE.memory()
    );
    if gdb != GdbStub::Off {
        log::info!("🐛 GDB server on tcp::1234");
    }
    if gdb == GdbStub::Wait {
        log::info!("⏳ CPU halted until a debugger continues it");
    }

    let mut cmd = QemuBuilder::new(qemu, ACTIVE_PROFILE, boot).gdb(gdb).build();

    let status = runner
        .status(&mut cmd)
        .map_err(|source| TaskError::EmulatorLaunch {
            program: qemu.clone(),
            source,
        })?;
    if !status.success() {
        return Err(TaskError::Emulator(status).into());
    }
    Ok(())
}
