use clap::Parser;
use install_cycles::{CyclesFormat, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "install-cycles",
    version,
    about = "Measure the cycles charged for installing Wasm modules and fit cost against size"
)]
pub struct Cli {
    /// Target canister name
    pub target: String,

    /// Wasm modules to install, measured in the given order
    #[arg(required = true, num_args = 1..)]
    pub wasm: Vec<PathBuf>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Installer program (overrides installer.program)
    #[arg(long)]
    pub dfx: Option<String>,

    /// Network passed to the installer (overrides installer.network)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// How to read the cycle cost from installer output (overrides installer.cycles_format)
    #[arg(long, value_enum)]
    pub cycles_format: Option<CyclesFormat>,
}
