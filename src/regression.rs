//! Ordinary least squares over (size, cost) pairs

use serde::Serialize;
use std::fmt;

use crate::error::MeasureError;

/// Fitted line `cycles = slope * bytes + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fit {
    /// Approximate cost per byte
    pub slope: f64,
    pub intercept: f64,
}

impl Fit {
    pub fn predict(&self, bytes: f64) -> f64 {
        self.slope * bytes + self.intercept
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycles ~= {:.2} * bytes + {:.2}",
            self.slope, self.intercept
        )
    }
}

/// Fit `ys = slope * xs + intercept`
///
/// slope = cov(x, y) / var(x), intercept = mean(y) - slope * mean(x)
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<Fit, MeasureError> {
    if xs.len() != ys.len() {
        return Err(MeasureError::Data(format!(
            "length mismatch: {} sizes, {} costs",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(MeasureError::Data("no samples".to_string()));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (cov, var) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(cov, var), (x, y)| {
            let dx = x - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        });

    if var == 0.0 {
        return Err(MeasureError::Data(
            "zero variance: all module sizes are equal".to_string(),
        ));
    }

    let slope = cov / var;
    Ok(Fit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
