// VaporLog - core/discovery.rs
//
// Candidate data-directory construction and recursive log file discovery.
//
// Traversal uses `walkdir` with a bounded depth and metadata-only reads
// (size, mtime); file contents are never opened. Per-entry I/O errors are
// non-fatal: the entry is logged and skipped, and the walk continues.
//
// Classification is deliberately high-recall/low-precision: the extension
// and substring sets below accept plenty of non-log files (`readme.txt`,
// `dialog.ini`) so that no real diagnostic file is missed. The user picks
// from the result.

use crate::core::model::{DiscoveredFile, LogKind, Title};
use crate::platform::paths::PlatformPaths;
use crate::util::constants;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// =============================================================================
// Candidate directories
// =============================================================================

/// Build the list of directories worth searching for a title's logs.
///
/// Always includes `root/apps/common/<install_subdir>`. Platform-convention
/// data directories are added for BOTH the title's display name and its
/// install folder name, since real titles vary in which one their data
/// directory is named after. The result is sorted and deduplicated by exact
/// path equality before any filesystem access, bounding the walking done by
/// `find_logs`.
pub fn candidate_data_dirs(
    platform: &dyn PlatformPaths,
    root: &Path,
    title: &Title,
) -> Vec<PathBuf> {
    let mut dirs = vec![root
        .join(constants::APPS_DIR_NAME)
        .join(constants::COMMON_DIR_NAME)
        .join(&title.install_subdir)];

    let mut guesses: Vec<String> = Vec::new();
    for guess in [title.name.as_str(), title.install_subdir.as_str()] {
        if !guess.is_empty() && !guesses.iter().any(|g| g == guess) {
            guesses.push(guess.to_string());
        }
    }

    dirs.extend(platform.title_data_dirs(root, &title.id, &guesses));

    dirs.sort();
    dirs.dedup();
    dirs
}

// =============================================================================
// Classification
// =============================================================================

/// Returns true if `filename` looks like a log or diagnostic file.
///
/// Matches when the lowercased name ends with a known extension OR
/// contains a known substring. An extension match alone is sufficient
/// (`readme.txt` qualifies even though no substring pattern fires).
pub fn is_log_like(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    constants::LOG_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        || constants::LOG_NAME_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Assign a kind by the first matching rule, in fixed priority order.
///
/// The order is significant: a name like `crash_errors.log` is a crash
/// log, not an error log.
pub fn classify_filename(filename: &str) -> LogKind {
    let lower = filename.to_lowercase();
    if lower.contains("crash") || lower.contains("dump") {
        LogKind::Crash
    } else if lower.contains("error") {
        LogKind::Error
    } else if lower.contains("debug") {
        LogKind::Debug
    } else if lower.contains("console") {
        LogKind::Console
    } else {
        LogKind::Game
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Walk one directory to `max_depth`, appending every log-like file found.
///
/// A missing or non-directory path is skipped silently apart from a trace
/// event; candidate lists routinely contain guesses that do not exist.
/// Inaccessible entries (permissions, broken links) are logged at debug
/// level and skipped without aborting the walk.
fn walk_dir(dir: &Path, max_depth: usize, out: &mut Vec<DiscoveredFile>) {
    if !dir.is_dir() {
        tracing::trace!(dir = %dir.display(), "Candidate directory absent; skipping");
        return;
    }

    tracing::debug!(dir = %dir.display(), max_depth, "Searching directory");

    for entry_result in walkdir::WalkDir::new(dir)
        .max_depth(max_depth)
        .follow_links(false)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "Cannot access entry; skipping");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!(
                path = %entry.path().display(),
                "Skipping non-UTF-8 filename"
            );
            continue;
        };

        if !is_log_like(name) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(
                    path = %entry.path().display(),
                    error = %e,
                    "Cannot read metadata; skipping"
                );
                continue;
            }
        };

        let modified = match metadata.modified() {
            Ok(mtime) => format_modified(mtime),
            Err(e) => {
                tracing::debug!(
                    path = %entry.path().display(),
                    error = %e,
                    "Cannot read modification time; skipping"
                );
                continue;
            }
        };

        let kind = classify_filename(name);
        let filename = name.to_string();
        tracing::debug!(
            file = %entry.path().display(),
            kind = %kind,
            "Log file found"
        );

        out.push(DiscoveredFile {
            filename,
            size: metadata.len(),
            modified,
            kind,
            path: entry.into_path(),
        });
    }
}

/// Render a filesystem mtime as the fixed-width local-time string used
/// throughout discovery and collection.
fn format_modified(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime)
        .format(constants::MODIFIED_TIME_FORMAT)
        .to_string()
}

/// Newest first. The modified string is zero-padded fixed-width local
/// time, so a plain string compare is a time compare.
fn sort_newest_first(files: &mut [DiscoveredFile]) {
    files.sort_by(|a, b| b.modified.cmp(&a.modified));
}

// =============================================================================
// Discovery entry point
// =============================================================================

/// Find every log-like file in the title's candidate data directories.
///
/// Results from overlapping candidate directories are NOT deduplicated by
/// path; the same physical file can appear twice (e.g. reached both
/// directly and through a symlinked parent). The output is sorted
/// non-increasing by modification time.
pub fn find_logs(
    platform: &dyn PlatformPaths,
    root: &Path,
    title: &Title,
    max_depth: usize,
) -> Vec<DiscoveredFile> {
    let dirs = candidate_data_dirs(platform, root, title);
    tracing::info!(
        title = %title.name,
        candidates = dirs.len(),
        "Searching for log files"
    );

    let mut files = Vec::new();
    for dir in &dirs {
        walk_dir(dir, max_depth, &mut files);
    }

    sort_newest_first(&mut files);

    tracing::info!(
        title = %title.name,
        found = files.len(),
        "Log discovery complete"
    );
    files
}

// =============================================================================
// Tests
// =============================================================================
