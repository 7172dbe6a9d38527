//! QEMU command builder

use super::QemuProfile;
use std::path::PathBuf;
use std::process::Command;

/// What the guest boots from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootMode {
    /// Multiboot kernel handed straight to QEMU (`-kernel`)
    Kernel(PathBuf),
    /// GRUB rescue image as CD-ROM
    #[cfg(feature = "grub")]
    Iso(PathBuf),
}

/// GDB server on tcp::1234.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GdbStub {
    #[default]
    Off,
    Listen,
    /// Also freeze the CPU until a debugger continues it.
    Wait,
}

/// QEMU command builder with fluent API
#[derive(Clone, Debug)]
pub struct QemuBuilder {
    binary: String,
    profile: QemuProfile,
    boot: BootMode,
    gdb: GdbStub,
}

impl QemuBuilder {
    pub fn new(binary: &str, profile: QemuProfile, boot: BootMode) -> Self {
        Self {
            binary: binary.to_string(),
            profile,
            boot,
            gdb: GdbStub::Off,
        }
    }

    pub fn gdb(mut self, gdb: GdbStub) -> Self {
        self.gdb = gdb;
        self
    }

    /// Build the QEMU command
    pub fn build(self) -> Command {
        let mut cmd = Command::new(&self.binary);

        cmd.args(["-machine", self.profile.machine()]);
        cmd.args(["-m", self.profile.memory()]);

        match &self.boot {
            BootMode::Kernel(kernel) => {
                cmd.arg("-kernel").arg(kernel);
            }
            #[cfg(feature = "grub")]
            BootMode::Iso(iso) => {
                cmd.arg("-cdrom").arg(iso).args(["-boot", "d"]);
            }
        }

        match self.gdb {
            GdbStub::Off => {}
            GdbStub::Listen => {
                cmd.arg("-s");
            }
            GdbStub::Wait => {
                cmd.args(["-s", "-S"]);
            }
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_direct_kernel_boot() {
        let cmd = QemuBuilder::new(
            "qemu-system-i386",
            QemuProfile::DirectVariant,
            BootMode::Kernel(PathBuf::from("/t/i386-unknown-none/debug/kfs")),
        )
        .build();

        assert_eq!(cmd.get_program(), "qemu-system-i386");
        assert_eq!(
            args(&cmd),
            [
                "-machine",
                "pc-i440fx-3.1",
                "-m",
                "100M",
                "-kernel",
                "/t/i386-unknown-none/debug/kfs"
            ]
        );
    }

    #[cfg(feature = "grub")]
    #[test]
    fn test_cdrom_boot() {
        let cmd = QemuBuilder::new(
            "qemu-system-i386",
            QemuProfile::GrubVariant,
            BootMode::Iso(PathBuf::from("kfs.iso")),
        )
        .build();

        assert_eq!(
            args(&cmd),
            ["-machine", "pc-i440fx-3.1", "-m", "2G", "-cdrom", "kfs.iso", "-boot", "d"]
        );
    }

    #[test]
    fn test_gdb_stub() {
        let boot = BootMode::Kernel(PathBuf::from("kfs"));
        let listen = QemuBuilder::new("qemu", QemuProfile::GrubVariant, boot.clone())
            .gdb(GdbStub::Listen)
            .build();
        let wait = QemuBuilder::new("qemu", QemuProfile::GrubVariant, boot)
            .gdb(GdbStub::Wait)
            .build();

        assert!(args(&listen).ends_with(&["-s".to_string()]));
        assert!(args(&wait).ends_with(&["-s".to_string(), "-S".to_string()]));
    }
}
