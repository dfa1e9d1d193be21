use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io;
use std::process::ExitCode;
use tracing::info;

mod cli;

use install_cycles::config::{self, Settings};
use install_cycles::{init_tracing, DfxInstaller, Measurer};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Cli) -> Result<()> {
    let mut settings = config::load_settings(args.config.as_deref())?;
    apply_overrides(&mut settings, &args);
    settings.validate()?;

    init_tracing(&settings.log);
    info!(
        target_name = %args.target,
        modules = args.wasm.len(),
        program = %settings.installer.program,
        "Starting measurement"
    );

    let installer = DfxInstaller::from_config(&settings.installer);
    let measurer = Measurer::new(installer, args.target.as_str())
        .with_cycles_format(settings.installer.cycles_format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    measurer.run(&args.wasm, &mut out, args.format)?;

    Ok(())
}

/// Command-line flags win over the settings file
fn apply_overrides(settings: &mut Settings, args: &cli::Cli) {
    if let Some(program) = &args.dfx {
        settings.installer.program = program.clone();
    }
    if let Some(network) = &args.network {
        settings.installer.network = Some(network.clone());
    }
    if let Some(format) = args.cycles_format {
        settings.installer.cycles_format = format;
    }
}
