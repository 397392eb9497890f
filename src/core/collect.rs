// VaporLog - core/collect.rs
//
// One-shot collection of selected log files into a timestamped output
// directory, plus the plain-text summary written alongside them.
//
// A session moves Created -> DirReady -> Copying -> Completed (or fails
// terminally at directory creation). `copy_logs` consumes the session so
// a finished session cannot be reopened or reused. Individual copies are
// fire-and-forget: one unreadable source is logged and skipped, never
// aborting the batch.

use crate::core::model::DiscoveredFile;
use crate::platform::paths::PlatformPaths;
use crate::util::constants;
use crate::util::format::format_file_size;
use chrono::Local;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Name sanitising
// =============================================================================

/// Make a string safe to use as a file or directory name.
///
/// Filesystem-reserved characters and control characters below 0x20 are
/// replaced with `_`; leading/trailing spaces and dots are trimmed (both
/// are rejected or silently stripped by Windows). A name that sanitises
/// to nothing becomes `"untitled"`.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if constants::INVALID_FILENAME_CHARS.contains(&c) || (c as u32) < 32 {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() {
        constants::UNTITLED_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Collection session
// =============================================================================

/// A single collection run: one freshly created output directory and the
/// summary file inside it.
#[derive(Debug)]
pub struct CollectionSession {
    /// Timestamped directory the selected files are copied into.
    pub output_dir: PathBuf,

    /// Path of the `log_summary.txt` written by `copy_logs`.
    pub manifest_path: PathBuf,
}

impl CollectionSession {
    /// Create `<home>/game-logs/<sanitised-title>_<YYYYMMDD_HHMMSS>`.
    ///
    /// The collector base directory is created if absent; a pre-existing
    /// base counts as success. Any creation failure is logged and reported
    /// as `None` rather than raised.
    pub fn create(
        platform: &dyn PlatformPaths,
        title_name: &str,
    ) -> Option<CollectionSession> {
        let home = match platform.home_dir() {
            Some(home) => home,
            None => {
                tracing::error!("Cannot resolve a home directory for collection output");
                return None;
            }
        };

        let base = home.join(constants::COLLECTOR_DIR_NAME);
        if let Err(e) = fs::create_dir_all(&base) {
            tracing::error!(
                dir = %base.display(),
                error = %e,
                "Cannot create collector base directory"
            );
            return None;
        }

        let stamp = Local::now().format(constants::DIR_TIMESTAMP_FORMAT);
        let output_dir = base.join(format!("{}_{stamp}", sanitize_file_name(title_name)));
        if let Err(e) = fs::create_dir_all(&output_dir) {
            tracing::error!(
                dir = %output_dir.display(),
                error = %e,
                "Cannot create output directory"
            );
            return None;
        }

        tracing::info!(dir = %output_dir.display(), "Output directory created");
        Some(CollectionSession {
            manifest_path: output_dir.join(constants::SUMMARY_FILE_NAME),
            output_dir,
        })
    }

    /// Copy the selected files into the output directory and write the
    /// summary. Returns the number of successful copies.
    ///
    /// Destination names are `sanitize("<n>_" + sanitize(filename))` with a
    /// 1-based index, so identically named files from different source
    /// directories cannot collide; an existing destination is overwritten.
    /// Empty input returns 0 without touching the filesystem.
    pub fn copy_logs(self, files: &[DiscoveredFile], title_name: &str) -> usize {
        if files.is_empty() {
            tracing::info!("No files selected; nothing to copy");
            return 0;
        }

        let mut summary = String::new();
        summary.push_str(&format!("Log collection for: {title_name}\n"));
        summary.push_str(&format!(
            "Collected: {}\n",
            Local::now().format(constants::MODIFIED_TIME_FORMAT)
        ));
        summary.push_str(&format!("Files found: {}\n\n", files.len()));

        let mut copied = 0usize;
        for (i, file) in files.iter().enumerate() {
            let dest_name = sanitize_file_name(&format!(
                "{}_{}",
                i + 1,
                sanitize_file_name(&file.filename)
            ));
            let dest = self.output_dir.join(&dest_name);

            match fs::copy(&file.path, &dest) {
                Ok(_) => {
                    copied += 1;
                    tracing::debug!(
                        src = %file.path.display(),
                        dest = %dest.display(),
                        "Copied log file"
                    );
                    summary.push_str(&format!("{}\n", file.path.display()));
                    summary.push_str(&format!(
                        "    kind: {}  size: {}  modified: {}\n",
                        file.kind,
                        format_file_size(file.size),
                        file.modified
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        src = %file.path.display(),
                        error = %e,
                        "Failed to copy log file; skipping"
                    );
                }
            }
        }

        summary.push_str(&format!("\n{copied}/{} files copied\n", files.len()));

        if let Err(e) = fs::write(&self.manifest_path, &summary) {
            tracing::warn!(
                path = %self.manifest_path.display(),
                error = %e,
                "Failed to write collection summary"
            );
        }

        tracing::info!(
            copied,
            total = files.len(),
            dir = %self.output_dir.display(),
            "Collection complete"
        );
        copied
    }
}

// =============================================================================
// Tests
// =============================================================================
