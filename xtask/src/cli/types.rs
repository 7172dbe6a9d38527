use crate::qemu::GdbStub;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build, package and boot the KFS kernel")]
#[command(after_help = "Set RELEASE=1 to build and run the release profile.")]
pub struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the cargo executable.
    #[arg(long, env = "CARGO", default_value = "cargo", global = true)]
    pub cargo: PathBuf,

    /// Kernel project directory.
    #[arg(short = 'C', long, default_value = ".", global = true)]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Build the kernel.
    Build,

    /// Build, then boot the kernel binary directly in QEMU.
    Run {
        #[command(flatten)]
        gdb: GdbArgs,
    },

    /// Build, assemble a GRUB rescue ISO, then boot it in QEMU.
    #[cfg(feature = "grub")]
    #[command(name = "run-grub")]
    RunGrub {
        #[command(flatten)]
        gdb: GdbArgs,
    },

    /// Build, then print the size of the kernel binary.
    #[command(name = "print-size")]
    PrintSize,

    /// Remove build artifacts (`cargo clean`).
    Clean,

    /// Clean, then build.
    Re,

    /// Check that cargo, QEMU and the image tools are installed.
    Doctor,
}

#[derive(Args, Clone, Copy, Debug, Default)]
pub struct GdbArgs {
    /// Start a GDB server on tcp::1234.
    #[arg(long)]
    pub gdb: bool,

    /// Start a GDB server and freeze the CPU until a debugger attaches.
    #[arg(long)]
    pub gdb_wait: bool,
}

impl GdbArgs {
    pub fn stub(self) -> GdbStub {
        if self.gdb_wait {
            GdbStub::Wait
        } else if self.gdb {
            GdbStub::Listen
        } else {
            GdbStub::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_command_names() {
        let cli = Cli::try_parse_from(["xtask", "print-size"]).unwrap();
        assert!(matches!(cli.cmd, Some(Cmd::PrintSize)));
        let cli = Cli::try_parse_from(["xtask", "re"]).unwrap();
        assert!(matches!(cli.cmd, Some(Cmd::Re)));
        let cli = Cli::try_parse_from(["xtask"]).unwrap();
        assert!(cli.cmd.is_none());
    }

    #[cfg(feature = "grub")]
    #[test]
    fn test_run_grub_with_gdb() {
        let cli = Cli::try_parse_from(["xtask", "run-grub", "--gdb-wait"]).unwrap();
        match cli.cmd {
            Some(Cmd::RunGrub { gdb }) => assert_eq!(gdb.stub(), GdbStub::Wait),
            _ => panic!("expected run-grub"),
        }
    }

    #[test]
    fn test_no_hardware_flags() {
        assert!(Cli::try_parse_from(["xtask", "run", "--memory", "4G"]).is_err());
        let cli = Cli::try_parse_from(["xtask", "run", "--gdb"]).unwrap();
        match cli.cmd {
            Some(Cmd::Run { gdb }) => assert_eq!(gdb.stub(), GdbStub::Listen),
            _ => panic!("expected run"),
        }
    }
}
