use globset::GlobBuilder;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::model::{Key, Value};
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Resolve the raw token of a file option.
///
/// Without `allow_glob` the value is the path itself (checked for existence when `must_exist`).
/// With `allow_glob` the value is the sorted list of matching paths.
pub(crate) fn resolve(
    key: &Key,
    raw: Value,
    must_exist: bool,
    allow_glob: bool,
) -> Result<Value, ParseError> {
    let path = match raw {
        Value::Str(path) => path,
        other => {
            return Err(ParseError::TypeMismatch {
                option: key.clone(),
                expected: "string",
                found: other,
            });
        }
    };

    if allow_glob {
        let matches = expand(key, &path)?;

        #[cfg(feature = "tracing_debug")]
        debug!("Glob '{path}' matched {count} file(s).", count = matches.len());

        if must_exist && matches.is_empty() {
            return Err(ParseError::FileNotFound {
                option: key.clone(),
                path,
            });
        }

        Ok(Value::List(matches.into_iter().map(Value::Str).collect()))
    } else if must_exist && !Path::new(&path).exists() {
        Err(ParseError::FileNotFound {
            option: key.clone(),
            path,
        })
    } else {
        Ok(Value::Str(path))
    }
}

fn expand(key: &Key, pattern: &str) -> Result<Vec<String>, ParseError> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|_| ParseError::ValidationFailed {
            option: key.clone(),
            value: Value::from(pattern),
        })?
        .compile_matcher();

    let base = literal_prefix(pattern);
    let root = if base.as_os_str().is_empty() {
        Path::new(".")
    } else if base.is_dir() {
        base.as_path()
    } else {
        return Ok(Vec::default());
    };

    let mut walker = WalkDir::new(root).min_depth(1).follow_links(true);

    if let Some(depth) = walk_depth(pattern, &base) {
        walker = walker.max_depth(depth);
    }

    // Unreadable entries and link cycles simply contribute no matches.
    let mut matches: Vec<String> = walker
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| {
            if base.as_os_str().is_empty() {
                entry
                    .path()
                    .strip_prefix(".")
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| entry.path().to_path_buf())
            } else {
                entry.into_path()
            }
        })
        .filter(|path| matcher.is_match(path))
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    matches.sort();
    Ok(matches)
}

/// The leading directories of `pattern` which contain no glob syntax.
fn literal_prefix(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut prefix = PathBuf::new();
    let components: Vec<Component> = path.components().collect();

    // The final component is always matched, never walked into.
    for component in components.iter().take(components.len().saturating_sub(1)) {
        if component.as_os_str().to_string_lossy().contains(GLOB_META) {
            break;
        }

        prefix.push(component);
    }

    prefix
}

/// How deep below `base` the `pattern` can match; `None` when `**` makes it unbounded.
fn walk_depth(pattern: &str, base: &Path) -> Option<usize> {
    if pattern.contains("**") {
        return None;
    }

    let total = Path::new(pattern).components().count();
    Some(total.saturating_sub(base.components().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("a.txt"), "a").unwrap();
        fs::write(directory.path().join("b.txt"), "b").unwrap();
        fs::write(directory.path().join("c.log"), "c").unwrap();
        fs::create_dir(directory.path().join("nested")).unwrap();
        fs::write(directory.path().join("nested").join("d.txt"), "d").unwrap();
        fs::create_dir(directory.path().join("nested").join("deeper")).unwrap();
        fs::write(
            directory.path().join("nested").join("deeper").join("e.txt"),
            "e",
        )
        .unwrap();
        directory
    }

    fn pattern(directory: &TempDir, tail: &str) -> String {
        directory.path().join(tail).to_string_lossy().into_owned()
    }

    #[test]
    fn plain_existing() {
        let directory = fixture();
        let path = pattern(&directory, "a.txt");

        assert_eq!(
            resolve(&Key::from("f"), Value::from(path.clone()), true, false).unwrap(),
            Value::Str(path)
        );
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn plain_missing(#[case] must_exist: bool) {
        let directory = fixture();
        let path = pattern(&directory, "missing.txt");
        let result = resolve(&Key::from("f"), Value::from(path.clone()), must_exist, false);

        if must_exist {
            assert_matches!(result, Err(ParseError::FileNotFound { path: p, .. }) if p == path);
        } else {
            assert_eq!(result.unwrap(), Value::Str(path));
        }
    }

    #[test]
    fn glob_matches_sorted() {
        let directory = fixture();

        assert_eq!(
            resolve(
                &Key::from("f"),
                Value::from(pattern(&directory, "*.txt")),
                true,
                true
            )
            .unwrap(),
            Value::List(vec![
                Value::Str(pattern(&directory, "a.txt")),
                Value::Str(pattern(&directory, "b.txt")),
            ])
        );
    }

    #[test]
    fn glob_nested() {
        let directory = fixture();

        assert_eq!(
            resolve(
                &Key::from("f"),
                Value::from(pattern(&directory, "*/*.txt")),
                true,
                true
            )
            .unwrap(),
            Value::List(vec![Value::Str(pattern(&directory, "nested/d.txt"))])
        );
    }

    #[test]
    fn glob_recursive() {
        let directory = fixture();

        assert_eq!(
            resolve(
                &Key::from("f"),
                Value::from(pattern(&directory, "**/*.txt")),
                true,
                true
            )
            .unwrap(),
            Value::List(vec![
                Value::Str(pattern(&directory, "a.txt")),
                Value::Str(pattern(&directory, "b.txt")),
                Value::Str(pattern(&directory, "nested/d.txt")),
                Value::Str(pattern(&directory, "nested/deeper/e.txt")),
            ])
        );
    }

    #[cfg(unix)]
    #[test]
    fn glob_follows_symlinks() {
        let directory = fixture();
        std::os::unix::fs::symlink(
            directory.path().join("nested"),
            directory.path().join("linked"),
        )
        .unwrap();

        assert_eq!(
            resolve(
                &Key::from("f"),
                Value::from(pattern(&directory, "*/d.txt")),
                true,
                true
            )
            .unwrap(),
            Value::List(vec![
                Value::Str(pattern(&directory, "linked/d.txt")),
                Value::Str(pattern(&directory, "nested/d.txt")),
            ])
        );
    }

    #[rstest]
    #[case("/*.txt", Some(1))]
    #[case("*.txt", Some(1))]
    #[case("a/b/*.txt", Some(1))]
    #[case("a/*/c.txt", Some(2))]
    #[case("a/**/c.txt", None)]
    fn depth(#[case] glob: &str, #[case] expected: Option<usize>) {
        assert_eq!(walk_depth(glob, &literal_prefix(glob)), expected);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn glob_empty(#[case] must_exist: bool) {
        let directory = fixture();
        let result = resolve(
            &Key::from("f"),
            Value::from(pattern(&directory, "*.csv")),
            must_exist,
            true,
        );

        if must_exist {
            assert_matches!(result, Err(ParseError::FileNotFound { .. }));
        } else {
            assert_eq!(result.unwrap(), Value::List(vec![]));
        }
    }

    #[test]
    fn glob_invalid() {
        assert_matches!(
            resolve(&Key::from("f"), Value::from("a[b"), false, true),
            Err(ParseError::ValidationFailed { .. })
        );
    }

    #[test]
    fn non_string() {
        assert_matches!(
            resolve(&Key::from("f"), Value::Int(1), false, false),
            Err(ParseError::TypeMismatch { expected: "string", .. })
        );
    }

    #[test]
    fn prefix() {
        assert_eq!(literal_prefix("a/b/*.txt"), PathBuf::from("a/b"));
        assert_eq!(literal_prefix("a/*/c.txt"), PathBuf::from("a"));
        assert_eq!(literal_prefix("*.txt"), PathBuf::new());
        assert_eq!(literal_prefix("/*.txt"), PathBuf::from("/"));
    }
}
