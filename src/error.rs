use thiserror::Error;

/// Why a vehicle was turned away at the gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("parking lot is full ({capacity} spaces)")]
    LotFull { capacity: usize },

    #[error("vehicle {0} is already parked")]
    AlreadyParked(String),
}

impl AdmissionError {
    /// Stable machine-readable code for the rejection.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::LotFull { .. } => "lot_full",
            Self::AlreadyParked(_) => "already_parked",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("no parked vehicle with plate {0}")]
    NotFound(String),
}

impl ReleaseError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("capacity must be a positive integer, got {0}")]
    InvalidCapacity(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
