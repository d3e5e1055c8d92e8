// Constants for the crane simulator

/// Default memory budget for recorded snapshots (64 MiB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

/// Delay between automatic steps while the viewer is playing
pub const PLAY_INTERVAL_MS: u64 = 500;
