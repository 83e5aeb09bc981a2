//! End-to-end tests running the built `pgconf` binary.

use std::process::{Command, Output};

fn pgconf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pgconf"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pgconf")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// `name = value` lines of the generated configuration.
fn assignments(output: &Output) -> Vec<String> {
    stdout(output)
        .lines()
        .filter(|l| !l.starts_with('#') && !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_defaults() {
    let output = pgconf(&[]);
    assert!(output.status.success());
    assert_eq!(
        assignments(&output),
        vec![
            "shared_buffers = 256MB",
            "work_mem = 7MB",
            "wal_buffers = 16MB",
            "checkpoint_segments = 120",
            "checkpoint_timeout = 1h",
            "autovacuum_max_workers = 2",
            "maintenance_work_mem = 25MB",
            "effective_cache_size = 716MB",
            "autovacuum_naptime = 1min",
            "checkpoint_completion_target = 0.9",
            "random_page_cost = 2.0",
        ]
    );
}

#[test]
fn test_block_layout() {
    let output = pgconf(&[]);
    let text = stdout(&output);
    let first: Vec<&str> = text.lines().take(8).collect();
    assert_eq!(
        first,
        vec![
            "# Description: Memory for interprocess communication and caching.",
            "# Default:     32MB",
            "# Limitations: At least 128kB",
            "# Multipliers: N/A",
            "# Recommended: 25% of RAM",
            "# Reference:   https://www.postgresql.org/docs/9.1/static/runtime-config-resource.html#GUC-SHARED-BUFFERS",
            "shared_buffers = 256MB",
            "",
        ]
    );
    // 11 blocks of 8 lines
    assert_eq!(text.lines().count(), 88);
}

#[test]
fn test_custom_inputs() {
    let output = pgconf(&[
        "--memory", "16 gb", "--cpus", "8", "--connections", "200", "--databases", "20",
    ]);
    assert!(output.status.success());
    let lines = assignments(&output);
    assert!(lines.contains(&"shared_buffers = 4GB".to_string()));
    assert!(lines.contains(&"wal_buffers = 112MB".to_string()));
    assert!(lines.contains(&"autovacuum_max_workers = 8".to_string()));
    assert!(lines.contains(&"maintenance_work_mem = 102MB".to_string()));
}

#[test]
fn test_unitless_memory_is_gigabytes() {
    let plain = pgconf(&["-m", "4"]);
    let suffixed = pgconf(&["-m", "4GB"]);
    assert_eq!(stdout(&plain), stdout(&suffixed));
}

#[test]
fn test_unsupported_version_exits_without_output() {
    let output = pgconf(&["-v", "9.5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("only 9.1 is supported"));
    assert!(stderr.trim_end().ends_with("Exiting..."));
}

#[test]
fn test_invalid_memory_exits_without_output() {
    let output = pgconf(&["--memory", "lots"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid memory value 'lots'"));
}

#[test]
fn test_zero_connections_rejected() {
    let output = pgconf(&["-c", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_non_numeric_flag_rejected() {
    let output = pgconf(&["--cpus", "many"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_detect_conflicts_with_memory() {
    let output = pgconf(&["--detect", "--memory", "2GB"]);
    assert!(!output.status.success());
}

#[test]
fn test_detect_uses_host_resources() {
    let output = pgconf(&["--detect"]);
    assert!(output.status.success());
    let workers: u32 = assignments(&output)
        .iter()
        .find_map(|l| l.strip_prefix("autovacuum_max_workers = "))
        .and_then(|n| n.parse().ok())
        .expect("autovacuum_max_workers missing");
    assert!(workers >= 1);
    assert_eq!(assignments(&output).len(), 11);
}
