use tracing::debug;

use crate::error::AppError;
use crate::services::host::HostResources;
use crate::utils::memory::parse_memory_to_kilobytes;

pub const SUPPORTED_VERSION: &str = "9.1";

/// Calculation inputs, validated once up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Total memory budget in kilobytes
    pub memory_kb: f64,
    pub cpus: u32,
    pub connections: u32,
    pub databases: u32,
}

impl Settings {
    pub fn new(
        memory: &str,
        cpus: u32,
        connections: u32,
        databases: u32,
        version: &str,
    ) -> Result<Self, AppError> {
        check_version(version)?;
        let memory_kb = parse_memory_to_kilobytes(memory)?;
        Self::validated(memory_kb, cpus, connections, databases)
    }

    /// Use memory and CPU count of the running host.
    pub fn from_host(
        host: &HostResources,
        connections: u32,
        databases: u32,
        version: &str,
    ) -> Result<Self, AppError> {
        check_version(version)?;
        Self::validated(host.memory_kb, host.cpus, connections, databases)
    }

    fn validated(
        memory_kb: f64,
        cpus: u32,
        connections: u32,
        databases: u32,
    ) -> Result<Self, AppError> {
        // both are divisors further down
        if cpus == 0 {
            return Err(AppError::InvalidArgument {
                name: "CPU count",
                value: cpus,
            });
        }
        if connections == 0 {
            return Err(AppError::InvalidArgument {
                name: "connection count",
                value: connections,
            });
        }

        let settings = Self {
            memory_kb,
            cpus,
            connections,
            databases,
        };
        debug!(?settings, "Settings validated");
        Ok(settings)
    }
}

fn check_version(version: &str) -> Result<(), AppError> {
    if version.trim() != SUPPORTED_VERSION {
        return Err(AppError::UnsupportedVersion(version.trim().to_string()));
    }
    Ok(())
}
