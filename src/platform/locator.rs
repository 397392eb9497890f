// VaporLog - platform/locator.rs
//
// Installation-root location: probe the platform's ordered candidate
// list and return the first directory that passes the marker check.

use crate::platform::paths::PlatformPaths;
use std::path::PathBuf;

/// Find the installation root for the current platform.
///
/// Candidates are probed in the order `candidate_roots()` returns them;
/// the first one that exists as a directory AND passes the per-OS marker
/// check wins, with no scoring among later candidates. `None` means "not
/// installed here", which callers treat as a normal outcome rather than
/// an error.
pub fn find_installation_root(platform: &dyn PlatformPaths) -> Option<PathBuf> {
    tracing::info!(os = %platform.os(), "Searching for an installation root");

    for candidate in platform.candidate_roots() {
        tracing::debug!(path = %candidate.display(), "Checking candidate root");

        if !candidate.is_dir() {
            continue;
        }

        if platform.is_install_root(&candidate) {
            tracing::info!(path = %candidate.display(), "Installation root found");
            return Some(candidate);
        }

        tracing::debug!(
            path = %candidate.display(),
            "Directory exists but is not a valid installation root"
        );
    }

    tracing::warn!("No installation root found in any known location");
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::paths::OsFamily;
    use std::fs;
    use std::path::Path;

    /// Fake platform with a scripted candidate list; a root is valid when
    /// it contains a `launcher` marker file.
    struct ScriptedPlatform {
        roots: Vec<PathBuf>,
    }

    impl PlatformPaths for ScriptedPlatform {
        fn os(&self) -> OsFamily {
            OsFamily::Linux
        }

        fn home_dir(&self) -> Option<PathBuf> {
            None
        }

        fn candidate_roots(&self) -> Vec<PathBuf> {
            self.roots.clone()
        }

        fn is_install_root(&self, path: &Path) -> bool {
            path.join("launcher").is_file()
        }

        fn title_data_dirs(
            &self,
            _root: &Path,
            _title_id: &str,
            _guesses: &[String],
        ) -> Vec<PathBuf> {
            Vec::new()
        }
    }

    #[test]
    fn test_first_valid_candidate_wins() {
        let missing = PathBuf::from("/nonexistent/vaporlog-locator-test");
        let invalid = tempfile::tempdir().unwrap(); // exists, no marker
        let valid_a = tempfile::tempdir().unwrap();
        let valid_b = tempfile::tempdir().unwrap();
        fs::write(valid_a.path().join("launcher"), b"").unwrap();
        fs::write(valid_b.path().join("launcher"), b"").unwrap();

        let platform = ScriptedPlatform {
            roots: vec![
                missing,
                invalid.path().to_path_buf(),
                valid_a.path().to_path_buf(),
                valid_b.path().to_path_buf(),
            ],
        };

        let found = find_installation_root(&platform).expect("root");
        assert_eq!(found, valid_a.path(), "first match must win");
    }

    #[test]
    fn test_no_valid_candidate_is_not_an_error() {
        let invalid = tempfile::tempdir().unwrap();
        let platform = ScriptedPlatform {
            roots: vec![invalid.path().to_path_buf()],
        };
        assert!(find_installation_root(&platform).is_none());
    }

    #[test]
    fn test_a_marker_file_alone_is_not_enough() {
        // The candidate itself must be a directory; a file at the
        // candidate path is skipped before the marker check runs.
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("not_a_dir");
        fs::write(&candidate, b"").unwrap();

        let platform = ScriptedPlatform {
            roots: vec![candidate],
        };
        assert!(find_installation_root(&platform).is_none());
    }
}
