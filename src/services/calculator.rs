//! Recommended PostgreSQL 9.1 settings for a high load server.
//!
//! All memory amounts are kilobytes.

use tracing::debug;

use crate::config::Settings;
use crate::models::parameter::{Annotation, Parameter, SettingValue};
use crate::utils::memory::format_kilobytes;

/// WAL segment size, also the granularity of `wal_buffers`.
pub const WAL_SEGMENT_SIZE_KB: f64 = 16.0 * 1024.0;

/// 25% of RAM
pub fn shared_buffers_kb(memory_kb: f64) -> f64 {
    memory_kb / 4.0
}

/// RAM left after shared_buffers and the 5% maintenance share, split between connections.
pub fn work_mem_kb(memory_kb: f64, shared_buffers_kb: f64, connections: u32) -> f64 {
    (memory_kb - shared_buffers_kb - maintenance_share_kb(memory_kb)) / connections as f64
}

/// 3% of shared_buffers, floored to a whole number of WAL segments, at least one segment.
pub fn wal_buffers_kb(shared_buffers_kb: f64) -> f64 {
    let share = shared_buffers_kb / 100.0 * 3.0;
    let floored = (share / WAL_SEGMENT_SIZE_KB).floor() * WAL_SEGMENT_SIZE_KB;
    floored.max(WAL_SEGMENT_SIZE_KB)
}

pub fn maintenance_work_mem_kb(memory_kb: f64, autovacuum_workers: u32) -> f64 {
    maintenance_share_kb(memory_kb) / autovacuum_workers as f64
}

/// 70% of RAM
pub fn effective_cache_size_kb(memory_kb: f64) -> f64 {
    memory_kb / 100.0 * 70.0
}

/// 2 minutes per 5 databases per autovacuum worker, never below 1 minute.
pub fn autovacuum_naptime_minutes(databases: u32, autovacuum_workers: u32) -> u64 {
    let minutes = (databases as f64 / 5.0 * 2.0 / autovacuum_workers as f64).ceil();
    (minutes as u64).max(1)
}

fn maintenance_share_kb(memory_kb: f64) -> f64 {
    memory_kb / 100.0 * 5.0
}

fn floored_memory(kilobytes: f64) -> SettingValue {
    SettingValue::Memory {
        kilobytes,
        floor_to_mb: true,
    }
}

/// Compute every setting in output order.
pub fn calculate(settings: &Settings) -> Vec<Parameter> {
    let memory = settings.memory_kb;
    let shared_buffers = shared_buffers_kb(memory);
    let autovacuum_workers = settings.cpus;
    let segment = format_kilobytes(WAL_SEGMENT_SIZE_KB, false);

    debug!(
        memory_kb = memory,
        shared_buffers_kb = shared_buffers,
        autovacuum_workers,
        "Calculating settings"
    );

    vec![
        Parameter {
            name: "shared_buffers",
            value: floored_memory(shared_buffers),
            annotation: Annotation {
                description: "Memory for interprocess communication and caching.",
                default: "32MB".into(),
                limitations: Some("At least 128kB"),
                multipliers: None,
                recommended: "25% of RAM".into(),
                reference: "/9.1/static/runtime-config-resource.html#GUC-SHARED-BUFFERS",
            },
        },
        Parameter {
            name: "work_mem",
            value: floored_memory(work_mem_kb(memory, shared_buffers, settings.connections)),
            annotation: Annotation {
                description: "Memory for internal sort and hash operations.",
                default: "1MB".into(),
                limitations: None,
                multipliers: Some("Parallel running operations"),
                recommended: "RAM / connections".into(),
                reference: "/9.1/static/runtime-config-resource.html#GUC-WORK-MEM",
            },
        },
        Parameter {
            name: "wal_buffers",
            value: SettingValue::Memory {
                kilobytes: wal_buffers_kb(shared_buffers),
                floor_to_mb: false,
            },
            annotation: Annotation {
                description: "Memory for WAL data that has not yet been written to disk.",
                default: format!(
                    "1 equals to 3% of shared_buffers, but not more than {}",
                    segment
                ),
                limitations: Some("At least 64kB"),
                multipliers: None,
                recommended: format!("3% of shared_buffers, multiple of {}", segment),
                reference: "/9.1/static/runtime-config-wal.html#GUC-WAL-BUFFERS",
            },
        },
        // Removed in 9.5
        Parameter {
            name: "checkpoint_segments",
            value: SettingValue::Integer(120),
            annotation: Annotation {
                description: "Maximum number of log file segments between WAL checkpoints.",
                default: "3".into(),
                limitations: Some("Higher values minimize IO but slow down crash recovery"),
                multipliers: None,
                recommended: "120".into(),
                reference: "/9.1/static/runtime-config-wal.html#GUC-CHECKPOINT-SEGMENTS",
            },
        },
        Parameter {
            name: "checkpoint_timeout",
            value: SettingValue::Literal("1h"),
            annotation: Annotation {
                description: "Maximum time between automatic WAL checkpoints",
                default: "5min".into(),
                limitations: Some("Range between 30 seconds and one hour"),
                multipliers: None,
                recommended: "1h".into(),
                reference: "/9.1/static/runtime-config-wal.html#GUC-CHECKPOINT-TIMEOUT",
            },
        },
        Parameter {
            name: "autovacuum_max_workers",
            value: SettingValue::Integer(autovacuum_workers as u64),
            annotation: Annotation {
                description: "Maximum number of autovacuum workers running simultaneously.",
                default: "3".into(),
                limitations: None,
                multipliers: None,
                recommended: "Amount of CPUs".into(),
                reference: "/9.1/static/runtime-config-autovacuum.html#GUC-AUTOVACUUM-MAX-WORKERS",
            },
        },
        Parameter {
            name: "maintenance_work_mem",
            value: floored_memory(maintenance_work_mem_kb(memory, autovacuum_workers)),
            annotation: Annotation {
                description: "Memory to be used by maintenance operations (VACUUM, REINDEX, etc)",
                default: "16MB".into(),
                limitations: None,
                multipliers: Some("Running autovacuum workers or any maintenance operations"),
                recommended: "5% of RAM distributed between autovacuum workers".into(),
                reference: "/9.1/static/runtime-config-resource.html#GUC-MAINTENANCE-WORK-MEM",
            },
        },
        Parameter {
            name: "effective_cache_size",
            value: floored_memory(effective_cache_size_kb(memory)),
            annotation: Annotation {
                description: "Planner's assumption about the size of the disk cache.",
                default: "128MB".into(),
                limitations: Some("Less than [free + cached] values from `free` utility."),
                multipliers: None,
                recommended: "70% of RAM".into(),
                reference: "/9.1/static/runtime-config-query.html#GUC-EFFECTIVE-CACHE-SIZE",
            },
        },
        Parameter {
            name: "autovacuum_naptime",
            value: SettingValue::Minutes(autovacuum_naptime_minutes(
                settings.databases,
                autovacuum_workers,
            )),
            annotation: Annotation {
                description: "Minimum delay between autovacuum runs on any given database.",
                default: "1min".into(),
                limitations: None,
                multipliers: None,
                recommended: "2 minutes per 5 databases per 1 autovacuum worker".into(),
                reference: "/9.1/static/runtime-config-autovacuum.html#GUC-AUTOVACUUM-NAPTIME",
            },
        },
        Parameter {
            name: "checkpoint_completion_target",
            value: SettingValue::Literal("0.9"),
            annotation: Annotation {
                description: "Checkpoint completion, as a fraction of total time.",
                default: "0.5".into(),
                limitations: None,
                multipliers: None,
                recommended: "0.9".into(),
                reference: "/9.1/static/runtime-config-wal.html#GUC-CHECKPOINT-COMPLETION-TARGET",
            },
        },
        Parameter {
            name: "random_page_cost",
            value: SettingValue::Literal("2.0"),
            annotation: Annotation {
                description: "Planner's cost estimate of a non-sequential-fetch operation.",
                default: "4.0".into(),
                limitations: None,
                multipliers: None,
                recommended: "2.0".into(),
                reference: "/9.1/static/runtime-config-query.html#GUC-RANDOM-PAGE-COST",
            },
        },
    ]
}
