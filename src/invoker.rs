//! Deployment invoker
//!
//! Shells out to the installer tool, blocks until it exits and hands its
//! stdout back to the caller.

use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

use crate::config::InstallerConfig;
use crate::error::MeasureError;

/// Something that installs a module onto a target and reports on stdout
pub trait Installer {
    fn install(&self, wasm: &Path, target: &str) -> Result<String, MeasureError>;
}

impl<T: Installer + ?Sized> Installer for &T {
    fn install(&self, wasm: &Path, target: &str) -> Result<String, MeasureError> {
        (**self).install(wasm, target)
    }
}

/// Installs through `dfx canister install` in reinstall mode
#[derive(Debug, Clone)]
pub struct DfxInstaller {
    program: String,
    network: Option<String>,
    extra_args: Vec<String>,
}

impl DfxInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            network: None,
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(cfg: &InstallerConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            network: cfg.network.clone(),
            extra_args: cfg.extra_args.clone(),
        }
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the install command for one module
    pub fn command(&self, wasm: &Path, target: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["canister", "install", target, "--wasm"])
            .arg(wasm)
            .args(["--mode", "reinstall", "--with-cycles"]);

        if let Some(network) = &self.network {
            cmd.args(["--network", network.as_str()]);
        }
        cmd.args(&self.extra_args);
        cmd
    }
}

impl Installer for DfxInstaller {
    fn install(&self, wasm: &Path, target: &str) -> Result<String, MeasureError> {
        run_captured(self.command(wasm, target))
    }
}

/// Run a command to completion and return its stdout
///
/// A non-zero exit surfaces the command's stderr in the error.
pub fn run_captured(mut cmd: Command) -> Result<String, MeasureError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!(program = %program, args = ?cmd.get_args().collect::<Vec<_>>(), "Spawning installer");

    let output = cmd.output().map_err(|e| MeasureError::Invocation {
        program: program.clone(),
        status: "not started".to_string(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(program = %program, status = %output.status, "Installer exited unsuccessfully");
        return Err(MeasureError::Invocation {
            program,
            status: output.status.to_string(),
            stderr,
        });
    }

    debug!(program = %program, stdout_bytes = output.stdout.len(), "Installer finished");
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
