//! Production build host
//!
//! Prepares the output directory, then hands it to the plugin's
//! `write_bundle` hook exactly once.

use crate::bundle::OutputDir;
use crate::error::LlmsError;
use crate::logger;
use crate::plugin::Plugin;
use std::path::Path;

/// Run the bundle-complete hook of `plugin` against `out_dir`
///
/// Returns the number of assets the plugin wrote. Plugin failures are the
/// plugin's to report; only an unusable output directory fails the build.
pub fn run_build<P: Plugin>(plugin: &P, out_dir: &Path) -> Result<usize, LlmsError> {
    std::fs::create_dir_all(out_dir).map_err(|source| LlmsError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut output = OutputDir::new(out_dir);
    plugin.write_bundle(&mut output);

    let count = output.written().len();
    logger::log_build_complete(output.root(), count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{LlmsOptions, LlmsRouting};
    use std::fs;

    fn plugin_for(root: &Path) -> LlmsRouting {
        LlmsRouting::new(LlmsOptions {
            llms_dir: root.to_path_buf(),
        })
    }

    #[test]
    fn test_build_mirrors_tree() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("llms.txt"), "# Index\n").unwrap();
        fs::write(src.path().join("a.md"), "alpha").unwrap();
        fs::create_dir_all(src.path().join("sub")).unwrap();
        fs::write(src.path().join("sub/b.md"), "beta").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dist = out.path().join("dist");
        let count = run_build(&plugin_for(src.path()), &dist).unwrap();

        assert_eq!(count, 3);
        assert_eq!(fs::read(dist.join("llms.txt")).unwrap(), b"# Index\n");
        assert_eq!(fs::read(dist.join("a.md")).unwrap(), b"alpha");
        assert_eq!(fs::read(dist.join("sub/b.md")).unwrap(), b"beta");
    }

    #[test]
    fn test_build_without_manifest_succeeds_empty() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.md"), "alpha").unwrap();

        let out = tempfile::tempdir().unwrap();
        let count = run_build(&plugin_for(src.path()), out.path()).unwrap();

        assert_eq!(count, 0);
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_failure_mid_pass_is_swallowed() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("llms.txt"), "# Index\n").unwrap();
        fs::write(src.path().join("a.md"), "alpha").unwrap();
        fs::create_dir_all(src.path().join("sub")).unwrap();
        fs::write(src.path().join("sub/b.md"), "beta").unwrap();
        fs::write(src.path().join("z.md"), "zeta").unwrap();

        let out = tempfile::tempdir().unwrap();
        fs::write(out.path().join("sub"), "a file where a directory belongs").unwrap();

        let count = run_build(&plugin_for(src.path()), out.path()).unwrap();

        // llms.txt and a.md land before sub/b.md fails; z.md is never reached
        assert_eq!(count, 2);
        assert_eq!(fs::read(out.path().join("llms.txt")).unwrap(), b"# Index\n");
        assert_eq!(fs::read(out.path().join("a.md")).unwrap(), b"alpha");
        assert!(out.path().join("sub").is_file());
        assert!(!out.path().join("z.md").exists());
    }

    #[test]
    fn test_unusable_output_dir_fails() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let blocker = out.path().join("dist");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let err = run_build(&plugin_for(src.path()), &blocker).unwrap_err();
        assert!(matches!(err, LlmsError::OutputDir { .. }));
    }
}
