use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as _;
use relative_build_paths::{BuildPathFixer, FixError};
use tracing::debug;

use crate::cli::Cli;

mod cli;

fn main() -> ExitCode {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    match run(cli_args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<FixError>() {
                Some(missing) => eprintln!("{missing}"),
                None => eprintln!("Error: {err:?}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli_args: Cli) -> Result<()> {
    let executable = env::current_exe().context("failed to locate the running executable")?;
    let layout = cli_args.into_layout(&executable)?;
    debug!(build_root = %layout.build_root.display(), "resolved build layout");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    BuildPathFixer::new(layout).run(&mut out)?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
