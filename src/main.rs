//! arff2tree command-line entry point.

use anyhow::Context;
use arff2tree::cli::Cli;
use arff2tree::convert;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let (input, output) = match cli.resolve_paths() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("**error** {e}");
            eprintln!("{}", Cli::command().render_help());
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &input, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("**error** {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, input: &std::path::Path, output: &std::path::Path) -> anyhow::Result<()> {
    convert(input, output, &cli.options()).with_context(|| {
        format!(
            "converting [{}] into [{}]",
            input.display(),
            output.display()
        )
    })?;
    Ok(())
}
