//! Markdown discovery module
//!
//! Walks the llms directory depth-first and collects every `.md` file.
//! Unreadable directories and symlink loops never abort the walk; they are
//! reported back to the caller next to whatever was found elsewhere.

use crate::error::LlmsError;
use crate::logger;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Extension every served or copied document carries
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Result of a directory scan
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Markdown files in depth-first order
    pub files: Vec<PathBuf>,
    /// Subtrees or entries that could not be read, including symlink loops
    pub failures: Vec<LlmsError>,
}

/// Scan `dir` for markdown files, keeping every failure
///
/// Symlinks are followed; a link back to one of its ancestors is reported as
/// a failure instead of being walked again.
pub fn scan(dir: &Path) -> ScanReport {
    let mut report = ScanReport::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_string_lossy()
                        .ends_with(MARKDOWN_EXTENSION)
                {
                    report.files.push(entry.into_path());
                }
            }
            Err(e) => report.failures.push(LlmsError::Walk(e)),
        }
    }

    report
}

/// Scan `dir` for markdown files, logging failures instead of returning them
pub fn find_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let report = scan(dir);
    for failure in &report.failures {
        logger::log_warning(&format!("Skipping unreadable path: {failure}"));
    }
    report.files
}

/// Route of `file` relative to `root`: `/`-separated with a leading `/`
///
/// Fails when `file` is not inside `root` or a path component is not valid
/// UTF-8; such files are never renamed into a route.
pub fn route_for(root: &Path, file: &Path) -> Result<String, LlmsError> {
    let outside = || LlmsError::OutsideRoot(file.display().to_string());
    let relative = file.strip_prefix(root).map_err(|_| outside())?;

    let mut route = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| LlmsError::NonUtf8Path(file.to_path_buf()))?;
                route.push('/');
                route.push_str(part);
            }
            Component::CurDir => {}
            _ => return Err(outside()),
        }
    }

    if route.is_empty() {
        Err(outside())
    } else {
        Ok(route)
    }
}

/// Routes of every markdown file under `root`
///
/// Files without a route are logged and left out.
pub fn markdown_routes(root: &Path) -> Vec<String> {
    find_markdown_files(root)
        .iter()
        .filter_map(|file| match route_for(root, file) {
            Ok(route) => Some(route),
            Err(e) => {
                logger::log_warning(&format!("Skipping file without a route: {e}"));
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "llms.txt", "# Site\n");
        write(dir.path(), "a.md", "a");
        write(dir.path(), "notes.txt", "not markdown");
        write(dir.path(), "sub/b.md", "b");
        write(dir.path(), "sub/deeper/c.md", "c");
        write(dir.path(), "sub/deeper/style.css", "body {}");
        write(dir.path(), "z.md", "z");
        dir
    }

    #[test]
    fn test_finds_every_markdown_file_once() {
        let dir = fixture();
        let files = find_markdown_files(dir.path());

        assert_eq!(files.len(), 4);
        let unique: HashSet<_> = files.iter().collect();
        assert_eq!(unique.len(), files.len());
        for file in &files {
            assert!(file.is_absolute());
            assert!(file.to_string_lossy().ends_with(".md"));
        }
    }

    #[test]
    fn test_depth_first_order() {
        let dir = fixture();
        let routes = markdown_routes(dir.path());
        assert_eq!(routes, vec!["/a.md", "/sub/b.md", "/sub/deeper/c.md", "/z.md"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let report = scan(&missing);
        assert!(report.files.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].is_not_found());

        assert!(find_markdown_files(&missing).is_empty());
    }

    #[test]
    fn test_empty_directory_has_no_failures() {
        let dir = tempfile::tempdir().unwrap();
        let report = scan(dir.path());
        assert!(report.files.is_empty());
        assert!(report.failures.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_hide_siblings() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken.md")).unwrap();

        let report = scan(dir.path());
        assert_eq!(report.files.len(), 4);
        assert_eq!(report.failures.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "a");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("x")).unwrap();

        let report = scan(dir.path());
        assert_eq!(report.files, vec![dir.path().join("a.md")]);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(&report.failures[0], LlmsError::Walk(e) if e.loop_ancestor().is_some()));
    }

    #[cfg(unix)]
    #[test]
    fn test_two_symlink_loops_terminate() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "a");
        write(dir.path(), "sub/b.md", "b");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("x")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/y")).unwrap();

        let report = scan(dir.path());
        assert_eq!(
            report.files,
            vec![dir.path().join("a.md"), dir.path().join("sub/b.md")]
        );
        assert_eq!(report.failures.len(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_has_no_route() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "a");
        fs::write(dir.path().join(OsStr::from_bytes(b"\xff.md")), "A").unwrap();

        assert_eq!(find_markdown_files(dir.path()).len(), 2);
        assert_eq!(markdown_routes(dir.path()), vec!["/a.md"]);

        let odd = dir.path().join(OsStr::from_bytes(b"\xff.md"));
        assert!(matches!(route_for(dir.path(), &odd), Err(LlmsError::NonUtf8Path(_))));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = fixture();
        assert_eq!(find_markdown_files(dir.path()), find_markdown_files(dir.path()));
    }

    #[test]
    fn test_route_for() {
        let root = Path::new("/srv/llms");
        assert_eq!(
            route_for(root, Path::new("/srv/llms/docs/guide.md")).unwrap(),
            "/docs/guide.md"
        );
        assert!(matches!(
            route_for(root, Path::new("/elsewhere/x.md")),
            Err(LlmsError::OutsideRoot(_))
        ));
        assert!(route_for(root, root).is_err());
    }
}
