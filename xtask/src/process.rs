//! Child process seam.
//!
//! Every external tool (cargo, grub-mkrescue, qemu) is started through a
//! [`Runner`] so command sequencing can be checked without the real tools.

use std::io;
use std::process::{Command, ExitStatus, Output, Stdio};

pub trait Runner {
    /// Run in the foreground with the terminal attached and wait for exit.
    fn status(&mut self, cmd: &mut Command) -> io::Result<ExitStatus>;

    /// Run with stdout captured. stderr stays on the terminal.
    fn output(&mut self, cmd: &mut Command) -> io::Result<Output>;
}

/// Spawns real processes.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn status(&mut self, cmd: &mut Command) -> io::Result<ExitStatus> {
        log::debug!("$ {}", display(cmd));
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }

    fn output(&mut self, cmd: &mut Command) -> io::Result<Output> {
        log::debug!("$ {}", display(cmd));
        cmd.stderr(Stdio::inherit()).output()
    }
}

/// Shell-like rendering of a command line, for logs.
pub fn display(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
