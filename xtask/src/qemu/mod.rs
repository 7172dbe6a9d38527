//! QEMU management module for xtask
//!
//! Builds the emulator command line from the active hardware profile.

mod builder;
mod profile;

pub use builder::{BootMode, GdbStub, QemuBuilder};
pub use profile::{QemuProfile, ACTIVE_PROFILE};
