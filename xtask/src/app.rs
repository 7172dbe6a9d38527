use crate::cli::{Cli, Cmd};
use crate::config::XtaskConfig;
use crate::metadata::{self, ResolvedPaths};
use crate::process::Runner;
use crate::profile::BuildProfile;
use crate::{build, doctor, run};
use anyhow::{Context, Result};
use clap::CommandFactory;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Per-invocation settings, fixed before the first step runs.
pub struct Workspace {
    pub root: PathBuf,
    pub cargo: PathBuf,
    pub config: XtaskConfig,
    pub profile: BuildProfile,
}

impl Workspace {
    /// The project root is made absolute so child processes see the same paths.
    pub fn load(root: PathBuf, cargo: PathBuf, profile: BuildProfile) -> Result<Self> {
        let root = fs::canonicalize(&root)
            .with_context(|| format!("Project directory not found: {}", root.display()))?;
        let config = XtaskConfig::load(&root)?;
        Ok(Self {
            root,
            cargo,
            config,
            profile,
        })
    }

    /// Query cargo for the package and output root and locate the kernel.
    pub fn resolve<R: Runner>(&self, runner: &mut R) -> Result<ResolvedPaths> {
        let meta = metadata::query(runner, &self.cargo, &self.root)?;
        let paths = ResolvedPaths::new(meta, &self.config.build.target, self.profile);
        log::debug!(
            "Resolved {} -> {}",
            paths.package,
            paths.kernel.display()
        );
        Ok(paths)
    }

    pub fn cargo_command(&self) -> Command {
        let mut cmd = Command::new(&self.cargo);
        cmd.current_dir(&self.root);
        cmd
    }
}

pub fn run<R: Runner>(cli: Cli, runner: &mut R) -> Result<()> {
    let Some(cmd) = cli.cmd else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let profile = BuildProfile::from_env();
    let ws = Workspace::load(cli.project_dir, cli.cargo, profile)?;
    dispatch(cmd, &ws, runner)
}

pub fn dispatch<R: Runner>(cmd: Cmd, ws: &Workspace, runner: &mut R) -> Result<()> {
    match cmd {
        Cmd::Build => {
            let paths = ws.resolve(runner)?;
            build::build(runner, ws, &paths)
        }
        Cmd::Run { gdb } => {
            let paths = ws.resolve(runner)?;
            run::run_kernel(runner, ws, &paths, gdb.stub())
        }
        #[cfg(feature = "grub")]
        Cmd::RunGrub { gdb } => {
            let paths = ws.resolve(runner)?;
            run::run_grub(runner, ws, &paths, gdb.stub())
        }
        Cmd::PrintSize => {
            let paths = ws.resolve(runner)?;
            build::print_size(runner, ws, &paths)
        }
        Cmd::Clean => {
            ws.resolve(runner)?;
            build::clean(runner, ws)
        }
        Cmd::Re => {
            ws.resolve(runner)?;
            build::rebuild(runner, ws)
        }
        Cmd::Doctor => doctor::run(ws),
    }
}
