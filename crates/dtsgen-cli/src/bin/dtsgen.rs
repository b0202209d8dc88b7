#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use dtsgen_cli::args::CliArgs;
use dtsgen_cli::config::{DtsConfig, load_config};
use dtsgen_cli::driver;
use dtsgen_cli::reporter::Reporter;

const EXIT_MODULES_FAILED: i32 = 1;

fn main() -> Result<()> {
    // DTSGEN_LOG / RUST_LOG enable logging; DTSGEN_LOG_FORMAT=tree|json|text.
    dtsgen_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DtsConfig::default(),
    };
    let config = config.merge_args(&args).resolve()?;
    let inputs = driver::discover_inputs(&args.inputs)?;

    let report = driver::run(&config, &inputs);

    if config.dry_run {
        for module in &report.generated {
            print!("{}", module.text);
        }
    }

    let reporter = Reporter::new(std::io::stderr().is_terminal());
    for failure in &report.failures {
        eprintln!("{}", reporter.format_failure(failure));
    }
    eprintln!("{}", reporter.format_summary(&report));

    if report.has_failures() {
        std::process::exit(EXIT_MODULES_FAILED);
    }
    Ok(())
}
