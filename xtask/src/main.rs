use clap::Parser;
use std::process::ExitCode;

mod app;
mod build;
mod cli;
mod config;
mod doctor;
mod error;
#[cfg(feature = "grub")]
mod image;
mod metadata;
mod process;
mod profile;
mod qemu;
mod run;

fn main() -> ExitCode {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match crate::app::run(cli, &mut crate::process::SystemRunner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(crate::error::exit_code(&err))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
