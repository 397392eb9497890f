// VaporLog - platform/paths.rs
//
// The PlatformPaths capability: one implementation per OS family,
// selected once at startup by `native()` and injected everywhere paths
// are platform-dependent (root location, root validation, per-title data
// directories). Tests inject fakes instead of branching on the host OS.
//
// All methods are read-only with respect to the filesystem; candidate
// lists are built by literal path joins with no existence filtering.

use crate::util::constants;
use std::path::{Path, PathBuf};

// =============================================================================
// OS family
// =============================================================================

/// Operating-system family the process is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

impl OsFamily {
    /// Human-readable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "macOS",
            OsFamily::Linux => "Linux",
            OsFamily::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Capability trait
// =============================================================================

/// Platform-specific path conventions.
///
/// Implementations must be pure apart from environment-variable reads and
/// read-only existence checks; nothing here writes to the filesystem.
pub trait PlatformPaths {
    /// The OS family this implementation describes.
    fn os(&self) -> OsFamily;

    /// The user's home directory: the platform profile environment
    /// variable first, then the OS user database. `None` when both fail.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Ordered candidate installation roots. Order is significant and the
    /// list is never sorted or existence-filtered here; the locator probes
    /// candidates front to back and stops at the first valid one.
    fn candidate_roots(&self) -> Vec<PathBuf>;

    /// Returns true if `path` is a genuine installation root, judged by
    /// the per-OS launcher marker.
    fn is_install_root(&self, path: &Path) -> bool;

    /// Platform-convention data directories where a title may keep logs,
    /// built from the folder-name `guesses` (title name and install
    /// folder) and, where the convention is keyed that way, the title id.
    fn title_data_dirs(
        &self,
        root: &Path,
        title_id: &str,
        guesses: &[String],
    ) -> Vec<PathBuf>;
}

/// Select the implementation for the build target. Called once at startup.
pub fn native() -> Box<dyn PlatformPaths> {
    if cfg!(target_os = "windows") {
        Box::new(WindowsPaths)
    } else if cfg!(target_os = "macos") {
        Box::new(MacPaths)
    } else if cfg!(target_os = "linux") {
        Box::new(LinuxPaths)
    } else {
        Box::new(UnknownPlatform)
    }
}

/// Shared home-directory resolution: named environment variable first,
/// then the `directories` crate (which consults the OS user database).
fn home_from_env(var: &str) -> Option<PathBuf> {
    match std::env::var_os(var) {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()),
    }
}

// =============================================================================
// Windows
// =============================================================================

pub struct WindowsPaths;

impl PlatformPaths for WindowsPaths {
    fn os(&self) -> OsFamily {
        OsFamily::Windows
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home_from_env("USERPROFILE")
    }

    fn candidate_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();

        // A registry-recorded install path beats every well-known guess.
        #[cfg(target_os = "windows")]
        if let Some(path) = registry_install_path() {
            roots.push(path);
        }

        for drive in ["C:", "D:"] {
            roots.push(PathBuf::from(format!(
                "{drive}\\Program Files (x86)\\Vapor"
            )));
            roots.push(PathBuf::from(format!("{drive}\\Program Files\\Vapor")));
        }

        if let Some(home) = self.home_dir() {
            roots.push(home.join("AppData").join("Local").join("Vapor"));
            roots.push(home.join("Vapor"));
        }

        roots
    }

    fn is_install_root(&self, path: &Path) -> bool {
        constants::WINDOWS_LAUNCHER_EXES
            .iter()
            .any(|exe| path.join(exe).is_file())
    }

    fn title_data_dirs(
        &self,
        _root: &Path,
        _title_id: &str,
        guesses: &[String],
    ) -> Vec<PathBuf> {
        let Some(home) = self.home_dir() else {
            return Vec::new();
        };

        let mut dirs = Vec::new();
        for guess in guesses {
            dirs.push(home.join("AppData").join("Local").join(guess));
            dirs.push(home.join("AppData").join("LocalLow").join(guess));
            dirs.push(home.join("AppData").join("Roaming").join(guess));
            dirs.push(home.join("Documents").join("My Games").join(guess));
        }
        dirs
    }
}

/// Read the launcher's recorded install path from the registry.
/// The 32-bit-view key is tried first, matching the launcher's installer.
#[cfg(target_os = "windows")]
fn registry_install_path() -> Option<PathBuf> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    for key_path in [r"SOFTWARE\WOW6432Node\Vapor", r"SOFTWARE\Vapor"] {
        let Ok(key) = hklm.open_subkey(key_path) else {
            continue;
        };
        match key.get_value::<String, _>("InstallPath") {
            Ok(path) if !path.is_empty() => {
                tracing::debug!(key = key_path, path = %path, "Registry install path");
                return Some(PathBuf::from(path));
            }
            _ => {}
        }
    }
    None
}

// =============================================================================
// macOS
// =============================================================================

pub struct MacPaths;

impl PlatformPaths for MacPaths {
    fn os(&self) -> OsFamily {
        OsFamily::MacOs
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home_from_env("HOME")
    }

    fn candidate_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if let Some(home) = self.home_dir() {
            roots.push(home.join("Library").join("Application Support").join("Vapor"));
            roots.push(home.join(".vapor"));
            roots.push(home.join(".local").join("share").join("Vapor"));
        }
        roots.push(PathBuf::from("/Applications/Vapor.app/Contents/MacOS"));
        roots
    }

    fn is_install_root(&self, path: &Path) -> bool {
        path.join(constants::MACOS_APP_BUNDLE).is_dir()
            || path.join(constants::APPS_DIR_NAME).is_dir()
    }

    fn title_data_dirs(
        &self,
        _root: &Path,
        _title_id: &str,
        guesses: &[String],
    ) -> Vec<PathBuf> {
        let Some(home) = self.home_dir() else {
            return Vec::new();
        };

        let library = home.join("Library");
        let mut dirs = Vec::new();
        for guess in guesses {
            dirs.push(library.join("Application Support").join(guess));
            dirs.push(library.join("Logs").join(guess));
            dirs.push(library.join("Caches").join(guess));
        }
        dirs
    }
}

// =============================================================================
// Linux
// =============================================================================

pub struct LinuxPaths;

impl PlatformPaths for LinuxPaths {
    fn os(&self) -> OsFamily {
        OsFamily::Linux
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home_from_env("HOME")
    }

    fn candidate_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if let Some(home) = self.home_dir() {
            roots.push(home.join(".vapor").join("vapor"));
            roots.push(home.join(".vapor"));
            roots.push(home.join(".local").join("share").join("Vapor"));
            roots.push(home.join("snap").join("vapor").join("common").join(".vapor"));
            roots.push(
                home.join(".var")
                    .join("app")
                    .join("com.vaporworks.Vapor")
                    .join(".vapor"),
            );
        }
        roots.push(PathBuf::from("/usr/share/vapor"));
        roots.push(PathBuf::from("/opt/vapor"));
        roots
    }

    fn is_install_root(&self, path: &Path) -> bool {
        constants::LINUX_LAUNCHER_NAMES
            .iter()
            .any(|name| path.join(name).is_file())
            || path.join(constants::APPS_DIR_NAME).is_dir()
    }

    fn title_data_dirs(
        &self,
        root: &Path,
        title_id: &str,
        guesses: &[String],
    ) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(home) = self.home_dir() {
            for guess in guesses {
                dirs.push(home.join(".config").join(guess));
                dirs.push(home.join(".local").join("share").join(guess));
            }
        }

        // Windows-native titles run inside a per-title compatibility
        // prefix keyed by id; their logs land in the emulated user tree.
        let compat_user = root
            .join(constants::APPS_DIR_NAME)
            .join(constants::COMPAT_DATA_DIR_NAME)
            .join(title_id)
            .join("pfx")
            .join("drive_c")
            .join("users")
            .join("default");
        dirs.push(compat_user.join("AppData").join("Local"));
        dirs.push(compat_user.join("AppData").join("Roaming"));
        dirs.push(compat_user.join("Documents").join("My Games"));

        dirs
    }
}

// =============================================================================
// Unknown
// =============================================================================

/// Fallback for unrecognised build targets: no known conventions, no
/// valid roots.
pub struct UnknownPlatform;

impl PlatformPaths for UnknownPlatform {
    fn os(&self) -> OsFamily {
        OsFamily::Unknown
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home_from_env("HOME")
    }

    fn candidate_roots(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn is_install_root(&self, _path: &Path) -> bool {
        false
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

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_windows_root_marker() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!WindowsPaths.is_install_root(dir.path()));

        fs::write(dir.path().join("vapor.exe"), b"").unwrap();
        assert!(WindowsPaths.is_install_root(dir.path()));
    }

    #[test]
    fn test_macos_root_markers() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!MacPaths.is_install_root(dir.path()));

        fs::create_dir(dir.path().join("Vapor.app")).unwrap();
        assert!(MacPaths.is_install_root(dir.path()));

        let other = tempfile::tempdir().unwrap();
        fs::create_dir(other.path().join("apps")).unwrap();
        assert!(MacPaths.is_install_root(other.path()));
    }

    #[test]
    fn test_linux_root_markers() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!LinuxPaths.is_install_root(dir.path()));

        fs::write(dir.path().join("vapor.sh"), b"#!/bin/sh").unwrap();
        assert!(LinuxPaths.is_install_root(dir.path()));

        let other = tempfile::tempdir().unwrap();
        fs::create_dir(other.path().join("apps")).unwrap();
        assert!(LinuxPaths.is_install_root(other.path()));
    }

    #[test]
    fn test_a_plain_file_is_not_a_bundle_marker() {
        let dir = tempfile::tempdir().unwrap();
        // The bundle marker is a directory; a stray file of the same name
        // does not qualify.
        fs::write(dir.path().join("Vapor.app"), b"").unwrap();
        assert!(!MacPaths.is_install_root(dir.path()));
    }

    #[test]
    fn test_unknown_platform_is_never_valid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vapor.exe"), b"").unwrap();
        fs::create_dir(dir.path().join("apps")).unwrap();
        assert!(!UnknownPlatform.is_install_root(dir.path()));
        assert!(UnknownPlatform.candidate_roots().is_empty());
    }

    #[test]
    fn test_linux_compat_prefix_keyed_by_id() {
        let root = PathBuf::from("/tmp/install");
        let dirs = LinuxPaths.title_data_dirs(&root, "10", &["Sample".into()]);

        let expected_prefix = root.join("apps/compatdata/10/pfx/drive_c/users/default");
        assert!(
            dirs.iter().any(|d| d.starts_with(&expected_prefix)),
            "got {dirs:?}"
        );
    }

    #[test]
    fn test_guesses_expand_per_convention_dir() {
        let root = PathBuf::from("/tmp/install");
        let guesses = vec!["Sample".to_string(), "SampleDir".to_string()];
        let dirs = WindowsPaths.title_data_dirs(&root, "10", &guesses);

        // Four convention dirs per guess when a home is resolvable.
        if !dirs.is_empty() {
            assert_eq!(dirs.len(), 8, "got {dirs:?}");
            assert!(dirs
                .iter()
                .any(|d| d.ends_with(Path::new("AppData/Local/Sample"))));
            assert!(dirs
                .iter()
                .any(|d| d.ends_with(Path::new("My Games/SampleDir"))));
        }
    }

    #[test]
    fn test_candidate_roots_are_unfiltered() {
        // Candidates are literal joins; nothing checks existence here.
        let roots = LinuxPaths.candidate_roots();
        assert!(roots.contains(&PathBuf::from("/opt/vapor")));
        assert!(roots.contains(&PathBuf::from("/usr/share/vapor")));
        // System locations come after the home-relative ones.
        let opt_pos = roots.iter().position(|p| p == Path::new("/opt/vapor"));
        assert_eq!(opt_pos, Some(roots.len() - 1));
    }

    #[test]
    fn test_native_matches_build_target() {
        let platform = native();
        #[cfg(target_os = "linux")]
        assert_eq!(platform.os(), OsFamily::Linux);
        #[cfg(target_os = "windows")]
        assert_eq!(platform.os(), OsFamily::Windows);
        #[cfg(target_os = "macos")]
        assert_eq!(platform.os(), OsFamily::MacOs);
    }
}
