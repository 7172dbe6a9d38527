//! QEMU hardware profiles
//!
//! One fixed profile per product variant. The active one is picked at compile
//! time by the `grub` feature and cannot be changed from the command line or
//! from xtask.toml.

/// Machine type shared by both variants.
pub const MACHINE: &str = "pc-i440fx-3.1";

/// Only one variant is constructed outside of tests in a given build.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QemuProfile {
    /// GRUB rescue image variant: 2G RAM, kernel or CD-ROM boot
    GrubVariant,
    /// Direct boot only: 100M RAM
    DirectVariant,
}

#[cfg(feature = "grub")]
pub const ACTIVE_PROFILE: QemuProfile = QemuProfile::GrubVariant;

#[cfg(not(feature = "grub"))]
pub const ACTIVE_PROFILE: QemuProfile = QemuProfile::DirectVariant;

impl QemuProfile {
    /// Returns the QEMU machine type string
    pub fn machine(self) -> &'static str {
        MACHINE
    }

    /// Returns the memory size
    pub fn memory(self) -> &'static str {
        match self {
            QemuProfile::GrubVariant => "2G",
            QemuProfile::DirectVariant => "100M",
        }
    }
}
