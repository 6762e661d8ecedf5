use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] marketpulse_core::ValidationError),

    #[error(transparent)]
    Config(#[from] marketpulse_core::ConfigError),

    #[error("environment variable {name}: {message}")]
    Environment { name: &'static str, message: String },

    #[error("backend probe failed: {0}")]
    Probe(#[from] marketpulse_core::FetchError),

    #[error(transparent)]
    Scheduler(#[from] marketpulse_core::SchedulerError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 2,
            Self::Environment { .. } => 2,
            Self::Probe(_) => 3,
            Self::Serialization(_) => 4,
            Self::Scheduler(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
