//! Measurement driver
//!
//! Installs each module in turn, records its size and cycle cost, then fits
//! cost against size. Processing is strictly sequential and the first failure
//! aborts the whole run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::MeasureError;
use crate::invoker::Installer;
use crate::parser::{Cycles, CyclesFormat};
use crate::regression::{linear_regression, Fit};

/// One measured module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub path: PathBuf,
    /// Module size in bytes
    pub size: u64,
    pub cycles: Cycles,
}

#[derive(Debug, Clone, Serialize)]
pub struct FittedSample {
    #[serde(flatten)]
    pub sample: Sample,
    pub fitted_cycles: f64,
}

/// Result of a full run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub target: String,
    pub samples: Vec<FittedSample>,
    pub fit: Fit,
}

/// How results are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per module followed by the fitted line
    #[default]
    Text,
    /// A single JSON report once every module is measured
    Json,
}

pub struct Measurer<I> {
    installer: I,
    target: String,
    cycles_format: CyclesFormat,
}

impl<I: Installer> Measurer<I> {
    pub fn new(installer: I, target: impl Into<String>) -> Self {
        Self {
            installer,
            target: target.into(),
            cycles_format: CyclesFormat::default(),
        }
    }

    pub fn with_cycles_format(mut self, format: CyclesFormat) -> Self {
        self.cycles_format = format;
        self
    }

    /// Install a single module and record its size and cost
    pub fn measure_file(&self, path: &Path) -> Result<Sample> {
        let size = fs::metadata(path)
            .map_err(|source| MeasureError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let output = self
            .installer
            .install(path, &self.target)
            .with_context(|| format!("Installing {} into {}", path.display(), self.target))?;

        let cycles = self
            .cycles_format
            .parse(&output)
            .with_context(|| format!("Reading install cost of {}", path.display()))?;

        info!(path = %path.display(), size, cycles = %cycles, "Measured module");
        Ok(Sample {
            path: path.to_path_buf(),
            size,
            cycles,
        })
    }

    /// Measure every module, then fit cycles against size
    pub fn run<W: Write>(
        &self,
        paths: &[PathBuf],
        out: &mut W,
        format: OutputFormat,
    ) -> Result<Report> {
        let mut samples = Vec::with_capacity(paths.len());

        for path in paths {
            let sample = self.measure_file(path).inspect_err(|e| {
                let kind = e
                    .downcast_ref::<MeasureError>()
                    .map(MeasureError::kind)
                    .unwrap_or("other");
                error!(path = %path.display(), kind, "Measurement aborted");
            })?;

            if format == OutputFormat::Text {
                writeln!(
                    out,
                    "{}: size={} bytes cycles={}",
                    sample.path.display(),
                    sample.size,
                    sample.cycles
                )?;
            }
            samples.push(sample);
        }

        let sizes: Vec<f64> = samples.iter().map(|s| s.size as f64).collect();
        let costs: Vec<f64> = samples.iter().map(|s| s.cycles as f64).collect();
        let fit = linear_regression(&sizes, &costs).context("Fitting cycles against module size")?;

        let report = Report {
            target: self.target.clone(),
            samples: samples
                .into_iter()
                .map(|sample| FittedSample {
                    fitted_cycles: fit.predict(sample.size as f64),
                    sample,
                })
                .collect(),
            fit,
        };

        match format {
            OutputFormat::Text => writeln!(out, "Linear approximation: {}", fit)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            }
        }

        Ok(report)
    }
}
