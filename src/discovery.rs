//! Testcase discovery and filtering.
//!
//! A testcase is one regular file in the input directory; its `name` is the
//! filename with a trailing `.sql` stripped and is what the `--run` and
//! `--approve` filters are matched against. Discovery is flat (subdirectories
//! are skipped) and the result is sorted by filename so execution order is
//! deterministic for a given directory snapshot.

use std::io;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use crate::errors::SqltestError;

/// One unit of work: a SQL script paired (by filename) with a golden file.
///
/// Constructed once during discovery and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testcase {
    /// Filename minus its `.sql` suffix; used for filter matching and reporting.
    pub name: String,
    /// Original filename; locates the script, the golden file, and the
    /// actual-output file.
    pub filename: String,
}

impl Testcase {
    fn from_filename(filename: String) -> Self {
        let name = filename
            .strip_suffix(".sql")
            .unwrap_or(&filename)
            .to_string();
        Testcase { name, filename }
    }
}

/// Scans `dir_in` for testcases, one per regular file, sorted by filename.
pub fn load_testcases(dir_in: &Path) -> Result<Vec<Testcase>, SqltestError> {
    let mut testcases = Vec::new();
    for entry in WalkDir::new(dir_in).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| SqltestError::Discovery {
            path: dir_in.to_path_buf(),
            source: io::Error::from(e),
        })?;

        // Everything that is not a directory counts, so symlinked scripts
        // are picked up too.
        if entry.file_type().is_dir() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        testcases.push(Testcase::from_filename(filename));
    }
    testcases.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(testcases)
}

/// Compiles a `--run`/`--approve` filter, mapping syntax errors to
/// [`SqltestError::Pattern`].
pub fn compile_filter(pattern: &str) -> Result<Regex, SqltestError> {
    Regex::new(pattern).map_err(|e| SqltestError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Keeps the testcases whose `name` the filter finds a match in
/// (search semantics, not full-match).
pub fn filter_testcases(testcases: Vec<Testcase>, filter: &Regex) -> Vec<Testcase> {
    testcases
        .into_iter()
        .filter(|testcase| filter.is_match(&testcase.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_files_sorted_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("joins.sql"), "SELECT 1;").unwrap();
        fs::write(dir.path().join("aggregates.sql"), "SELECT 2;").unwrap();
        fs::create_dir(dir.path().join("fixtures")).unwrap();

        let testcases = load_testcases(dir.path()).unwrap();
        let names: Vec<_> = testcases.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["aggregates", "joins"]);
        assert_eq!(testcases[0].filename, "aggregates.sql");
    }

    #[test]
    fn non_sql_files_keep_their_full_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let testcases = load_testcases(dir.path()).unwrap();
        assert_eq!(testcases[0].name, "notes.txt");
        assert_eq!(testcases[0].filename, "notes.txt");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_scripts_are_discovered() {
        let source = tempfile::tempdir().unwrap();
        fs::write(source.path().join("shared.sql"), "SELECT 1;").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            source.path().join("shared.sql"),
            dir.path().join("shared.sql"),
        )
        .unwrap();

        let testcases = load_testcases(dir.path()).unwrap();
        assert_eq!(testcases.len(), 1);
        assert_eq!(testcases[0].name, "shared");
    }

    #[test]
    fn missing_directory_is_a_discovery_error() {
        let err = load_testcases(Path::new("/nonexistent/sqltest-in")).unwrap_err();
        assert!(matches!(err, SqltestError::Discovery { .. }));
    }

    #[test]
    fn filter_uses_search_semantics() {
        let testcases = vec![
            Testcase::from_filename("math.sql".into()),
            Testcase::from_filename("strings.sql".into()),
        ];
        let filter = compile_filter("at").unwrap();
        let kept = filter_testcases(testcases, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "math");
    }

    #[test]
    fn match_all_filter_keeps_everything() {
        let testcases = vec![
            Testcase::from_filename("a.sql".into()),
            Testcase::from_filename("b.sql".into()),
        ];
        let filter = compile_filter(".").unwrap();
        assert_eq!(filter_testcases(testcases, &filter).len(), 2);
    }

    #[test]
    fn invalid_pattern_is_a_pattern_error() {
        let err = compile_filter("(").unwrap_err();
        assert!(matches!(err, SqltestError::Pattern { .. }));
    }
}
