// VaporLog - core/catalog.rs
//
// Enumeration of installed titles from the manifests under
// `<root>/apps/`, and name-based lookup.
//
// The manifest format is a flat sequence of `"key"  "value"` lines with
// optional nested blocks. Only top-level scalar extraction is needed here,
// so the parser is a deliberate line scanner: it never tracks nesting and
// must not be upgraded to a recursive key-value parser.

use crate::core::model::Title;
use crate::util::constants;
use std::fs;
use std::path::Path;

/// Enumerate installed titles by reading every `manifest_*.acf` under
/// `root/apps`.
///
/// Titles whose manifest did not yield both a name and an id are dropped.
/// An unreadable apps directory is logged and yields an empty list.
/// Iteration order follows filesystem enumeration order and is not stable;
/// callers must treat the result as a set.
pub fn list_titles(root: &Path) -> Vec<Title> {
    let apps_dir = root.join(constants::APPS_DIR_NAME);

    let pattern = match glob::Pattern::new(constants::MANIFEST_PATTERN) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(
                pattern = constants::MANIFEST_PATTERN,
                error = %e,
                "Manifest pattern failed to compile"
            );
            return Vec::new();
        }
    };

    let entries = match fs::read_dir(&apps_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                dir = %apps_dir.display(),
                error = %e,
                "Cannot read apps directory"
            );
            return Vec::new();
        }
    };

    let mut titles = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !pattern.matches(name) {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }

        let title = parse_manifest(&entry.path());
        if title.is_complete() {
            tracing::debug!(
                id = %title.id,
                name = %title.name,
                "Title found"
            );
            titles.push(title);
        } else {
            tracing::warn!(
                manifest = %entry.path().display(),
                "Manifest missing a name or id; skipping"
            );
        }
    }

    tracing::info!(
        root = %root.display(),
        count = titles.len(),
        "Installed titles enumerated"
    );
    titles
}

/// Parse one manifest file into a `Title`.
///
/// Scans line by line: each trimmed line beginning with the quoted key
/// `"id"`, `"name"`, or `"installdir"` contributes the value found between
/// the next two double quotes. An unreadable file or a file with no
/// matching lines yields a `Title` with empty fields, which the caller
/// filters out.
pub fn parse_manifest(path: &Path) -> Title {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(
                manifest = %path.display(),
                error = %e,
                "Cannot read manifest"
            );
            return Title::default();
        }
    };

    let mut title = Title::default();
    for line in content.lines() {
        let line = line.trim();
        if let Some(value) = quoted_value(line, "id") {
            title.id = value;
        } else if let Some(value) = quoted_value(line, "name") {
            title.name = value;
        } else if let Some(value) = quoted_value(line, "installdir") {
            title.install_subdir = value;
        }
    }
    title
}

/// If `line` starts with the quoted `key`, return the value between the
/// next two double quotes after it.
fn quoted_value(line: &str, key: &str) -> Option<String> {
    let rest = line.strip_prefix('"')?.strip_prefix(key)?.strip_prefix('"')?;
    let open = rest.find('"')?;
    let value = &rest[open + 1..];
    let close = value.find('"')?;
    Some(value[..close].to_string())
}

/// Find a title by name, case-insensitively.
///
/// An exact (case-insensitive) match anywhere in the list wins over any
/// substring match; otherwise the first title whose name contains the
/// query is returned. No ranking is applied among multiple substring
/// matches — "Game" can resolve to either "Game" or "Game 2" depending on
/// enumeration order, and that ambiguity is accepted.
pub fn find_by_name<'a>(titles: &'a [Title], query: &str) -> Option<&'a Title> {
    let query_lower = query.to_lowercase();

    if let Some(title) = titles
        .iter()
        .find(|t| t.name.to_lowercase() == query_lower)
    {
        tracing::debug!(name = %title.name, "Exact title match");
        return Some(title);
    }

    let title = titles
        .iter()
        .find(|t| t.name.to_lowercase().contains(&query_lower));
    match title {
        Some(t) => tracing::debug!(name = %t.name, query, "Substring title match"),
        None => tracing::debug!(query, "No title match"),
    }
    title
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE_MANIFEST: &str = r#"
"AppState"
{
	"id"		"123"
	"name"		"Example"
	"installdir"		"Example"
	"StateFlags"		"4"
}
"#;

    fn write_manifest(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).expect("write manifest");
    }

    fn make_root(dir: &TempDir) -> std::path::PathBuf {
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("apps")).expect("mkdir apps");
        root
    }

    #[test]
    fn test_parse_manifest_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "manifest_123.acf", SAMPLE_MANIFEST);

        let title = parse_manifest(&dir.path().join("manifest_123.acf"));
        assert_eq!(title.id, "123");
        assert_eq!(title.name, "Example");
        assert_eq!(title.install_subdir, "Example");
        assert!(title.is_complete());
    }

    #[test]
    fn test_parse_manifest_missing_installdir() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            "manifest_7.acf",
            "\"id\" \"7\"\n\"name\" \"NoInstallDir\"\n",
        );

        let title = parse_manifest(&dir.path().join("manifest_7.acf"));
        assert_eq!(title.install_subdir, "");
        // Still complete: only name and id are required.
        assert!(title.is_complete());
    }

    #[test]
    fn test_parse_manifest_unreadable_yields_empty() {
        let title = parse_manifest(Path::new("/nonexistent/manifest_1.acf"));
        assert!(!title.is_complete());
        assert_eq!(title, Title::default());
    }

    #[test]
    fn test_parse_manifest_ignores_similar_keys() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            "manifest_9.acf",
            "\"idx\" \"999\"\n\"id\" \"9\"\n\"name\" \"Keyed\"\n",
        );

        let title = parse_manifest(&dir.path().join("manifest_9.acf"));
        assert_eq!(title.id, "9", "\"idx\" must not match the \"id\" key");
    }

    #[test]
    fn test_list_titles_filters_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let root = make_root(&dir);
        let apps = root.join("apps");

        write_manifest(&apps, "manifest_10.acf", SAMPLE_MANIFEST);
        // Missing name: must be dropped.
        write_manifest(&apps, "manifest_20.acf", "\"id\" \"20\"\n");
        // Wrong filename: must be ignored entirely.
        write_manifest(&apps, "notes.txt", SAMPLE_MANIFEST);

        let titles = list_titles(&root);
        assert_eq!(titles.len(), 1, "got {titles:?}");
        assert_eq!(titles[0].id, "123");
    }

    #[test]
    fn test_list_titles_missing_apps_dir() {
        let dir = tempfile::tempdir().unwrap();
        let titles = list_titles(dir.path());
        assert!(titles.is_empty());
    }

    #[test]
    fn test_find_by_name_exact_beats_substring() {
        let titles = vec![
            Title {
                name: "Game 2".into(),
                id: "2".into(),
                install_subdir: "Game2".into(),
            },
            Title {
                name: "Game".into(),
                id: "1".into(),
                install_subdir: "Game".into(),
            },
        ];

        // "Game 2" contains "game" and comes first, but the exact match on
        // the second entry must win.
        let hit = find_by_name(&titles, "game").expect("match");
        assert_eq!(hit.id, "1");
    }

    #[test]
    fn test_find_by_name_substring_first_hit() {
        let titles = vec![
            Title {
                name: "Portal Stories".into(),
                id: "1".into(),
                install_subdir: String::new(),
            },
            Title {
                name: "Portal Tales".into(),
                id: "2".into(),
                install_subdir: String::new(),
            },
        ];

        // No exact match for "portal": the first substring hit in iteration
        // order is returned, with no ranking between the two candidates.
        let hit = find_by_name(&titles, "portal").expect("match");
        assert_eq!(hit.id, "1");
    }

    #[test]
    fn test_find_by_name_not_found() {
        let titles = vec![Title {
            name: "Example".into(),
            id: "1".into(),
            install_subdir: String::new(),
        }];
        assert!(find_by_name(&titles, "missing").is_none());
    }
}
