use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigReadFailed,
    ConfigParseError,
    InvalidWeights,
    InputReadFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigReadFailed => "E1001",
            Self::ConfigParseError => "E1002",
            Self::InvalidWeights => "E1003",
            Self::InputReadFailed => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigReadFailed => "Config file unreadable",
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidWeights => "Invalid scoring weights",
            Self::InputReadFailed => "Candidate input unreadable",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigReadFailed => {
                Some("Check the --config path or SIFT_CONFIG and file permissions.")
            }
            Self::ConfigParseError => Some("Fix syntax in the sift config file and retry."),
            Self::InvalidWeights => {
                Some("Use finite, non-negative [scoring] weights that sum to 1.0.")
            }
            Self::InputReadFailed => Some("Check that the candidate file exists and is UTF-8."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejected scoring weight vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    /// A weight is negative, infinite, or NaN.
    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    /// The weights do not sum to 1.0.
    #[error("weights must sum to 1.0, got {sum}")]
    BadSum { sum: f64 },
}

/// Failure to load a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid scoring weights in {}", .path.display())]
    InvalidWeights {
        path: PathBuf,
        #[source]
        source: WeightsError,
    },
}

impl ConfigError {
    /// The stable error code for this failure.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ConfigReadFailed,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
            Self::InvalidWeights { .. } => ErrorCode::InvalidWeights,
        }
    }
}
