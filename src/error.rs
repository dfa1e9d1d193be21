use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while measuring install costs
#[derive(Debug, Error)]
pub enum MeasureError {
    /// The installer output did not carry a usable cycles figure
    #[error("Could not parse cycles from installer output: {0}")]
    Parse(String),

    /// The installer could not be started or exited unsuccessfully
    #[error("{program} failed ({status}): {stderr}")]
    Invocation {
        program: String,
        status: String,
        stderr: String,
    },

    /// Regression input was unusable
    #[error("Invalid regression input: {0}")]
    Data(String),

    /// A module file could not be inspected
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MeasureError {
    /// Stable name used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse_error",
            Self::Invocation { .. } => "invocation_error",
            Self::Data(_) => "data_error",
            Self::Io { .. } => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_carries_stderr() {
        let error = MeasureError::Invocation {
            program: "dfx".to_string(),
            status: "exit status: 255".to_string(),
            stderr: "Cannot find canister id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "dfx failed (exit status: 255): Cannot find canister id"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(MeasureError::Parse("x".to_string()).kind(), "parse_error");
        assert_eq!(MeasureError::Data("x".to_string()).kind(), "data_error");
        let io = MeasureError::Io {
            path: PathBuf::from("a.wasm"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io.kind(), "io_error");
        assert_eq!(io.to_string(), "Failed to read a.wasm: missing");
    }
}
