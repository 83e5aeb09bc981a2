use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(
        "PostgreSQL version '{0}' is not supported: at present only 9.1 is supported, \
         some values are known to be missing in 9.5+"
    )]
    UnsupportedVersion(String),

    #[error("Invalid memory value '{input}': {reason}")]
    InvalidMemory { input: String, reason: String },

    #[error("Invalid {name}: {value} (must be at least 1)")]
    InvalidArgument { name: &'static str, value: u32 },

    #[error("Host detection failed: {0}")]
    HostDetection(String),
}
