//! Failure taxonomy for xtask commands.
//!
//! Each variant records how the failing delegate ended so that `main` can exit
//! with the same status as the first step that failed.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// `cargo metadata` could not run or printed something we cannot use.
    #[error("project metadata query failed: {reason}")]
    ToolchainQuery {
        reason: String,
        status: Option<ExitStatus>,
    },

    #[error("kernel build failed ({0})")]
    Build(ExitStatus),

    #[error("clean failed ({0})")]
    Clean(ExitStatus),

    /// Staging directory creation, a copy, or spawning the packager failed.
    #[cfg_attr(not(feature = "grub"), allow(dead_code))]
    #[error("image assembly failed while {step}")]
    ImageIo {
        step: String,
        #[source]
        source: io::Error,
    },

    #[cfg_attr(not(feature = "grub"), allow(dead_code))]
    #[error("image packager `{program}` failed ({status})")]
    ImagePackager { program: String, status: ExitStatus },

    #[error("failed to launch emulator `{program}`")]
    EmulatorLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("emulator exited with {0}")]
    Emulator(ExitStatus),
}

impl TaskError {
    pub fn query(reason: impl Into<String>) -> Self {
        TaskError::ToolchainQuery {
            reason: reason.into(),
            status: None,
        }
    }

    /// Process exit code to report for this failure.
    pub fn exit_code(&self) -> u8 {
        let status = match self {
            TaskError::ToolchainQuery { status, .. } => *status,
            TaskError::Build(status)
            | TaskError::Clean(status)
            | TaskError::Emulator(status)
            | TaskError::ImagePackager { status, .. } => Some(*status),
            TaskError::ImageIo { .. } | TaskError::EmulatorLaunch { .. } => None,
        };
        status.map_or(1, status_code)
    }
}

/// Exit code for an error chain: the first `TaskError` found decides, anything
/// else is a plain failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TaskError>())
        .map_or(1, TaskError::exit_code)
}

/// Maps a failed child status onto a non-zero `u8`.
///
/// Children killed by a signal report `128 + signal` like a POSIX shell does.
pub fn status_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return match u8::try_from(code) {
            Ok(0) | Err(_) => 1,
            Ok(code) => code,
        };
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(1);
        }
    }

    1
}
