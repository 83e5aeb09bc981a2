use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tracing::info;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct HostResources {
    pub memory_kb: f64,
    pub cpus: u32,
}

/// Read total memory and logical CPU count of the running machine.
pub fn detect_host() -> Result<HostResources, AppError> {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything()),
    );

    // sysinfo reports bytes
    let total_bytes = sys.total_memory();
    let cpus = sys.cpus().len() as u32;

    if total_bytes == 0 {
        return Err(AppError::HostDetection("total memory reported as 0".into()));
    }
    if cpus == 0 {
        return Err(AppError::HostDetection("no CPUs reported".into()));
    }

    let host = HostResources {
        memory_kb: (total_bytes / 1024) as f64,
        cpus,
    };
    info!(
        "Detected host: {} kB memory, {} CPUs",
        host.memory_kb, host.cpus
    );
    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_host() {
        let host = detect_host().unwrap();
        assert!(host.memory_kb > 0.0);
        assert!(host.cpus >= 1);
    }
}
