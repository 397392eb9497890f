// VaporLog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "VaporLog";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "VaporLog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Installation layout
// =============================================================================

/// Subdirectory of the installation root holding manifests and content.
pub const APPS_DIR_NAME: &str = "apps";

/// Subdirectory of `apps` holding per-title install directories.
pub const COMMON_DIR_NAME: &str = "common";

/// Glob pattern matched against filenames in the apps directory.
pub const MANIFEST_PATTERN: &str = "manifest_*.acf";

/// Subdirectory of `apps` holding compatibility-layer prefixes (Linux).
pub const COMPAT_DATA_DIR_NAME: &str = "compatdata";

/// Launcher executable names marking a valid root on Windows.
pub const WINDOWS_LAUNCHER_EXES: &[&str] = &["vapor.exe", "Vapor.exe"];

/// App bundle directory marking a valid root on macOS.
pub const MACOS_APP_BUNDLE: &str = "Vapor.app";

/// Launcher script/binary names marking a valid root on Linux.
pub const LINUX_LAUNCHER_NAMES: &[&str] = &["vapor", "vapor.sh"];

// =============================================================================
// Discovery limits
// =============================================================================

/// Default directory recursion depth when searching per-title data dirs.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Minimum sensible search depth (1 = the search dir itself).
pub const MIN_SEARCH_DEPTH: usize = 1;

/// Hard upper bound on search depth (prevents configuration mistakes).
pub const ABSOLUTE_MAX_SEARCH_DEPTH: usize = 10;

// =============================================================================
// Log file heuristics
// =============================================================================

/// A file whose lowercased name ends with one of these is log-like.
pub const LOG_EXTENSIONS: &[&str] = &[
    ".log", ".txt", ".out", ".err", ".crash", ".dmp", ".mdmp", ".rpt",
    ".debug", ".trace", ".console", ".output", ".error",
];

/// A file whose lowercased name contains one of these is log-like.
pub const LOG_NAME_HINTS: &[&str] = &[
    "log", "crash", "error", "debug", "console", "output", "stderr",
    "stdout", "trace", "dump", "report",
];

// =============================================================================
// Collection output
// =============================================================================

/// Collector subfolder created under the user's home directory.
pub const COLLECTOR_DIR_NAME: &str = "game-logs";

/// Plain-text manifest written alongside the copied files.
pub const SUMMARY_FILE_NAME: &str = "log_summary.txt";

/// Characters replaced with `_` when sanitising names for the filesystem.
pub const INVALID_FILENAME_CHARS: &[char] =
    &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Substitute used when sanitising reduces a name to nothing.
pub const UNTITLED_NAME: &str = "untitled";

// =============================================================================
// Timestamp formats
// =============================================================================

/// Fixed-width local-time format for modification times and summaries.
/// Zero-padded so lexicographic order equals chronological order.
pub const MODIFIED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact local-time format suffixed to output directory names.
pub const DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Logging / configuration
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration file name, looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
