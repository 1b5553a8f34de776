//! Keeps `tests/unit` in step with `src`: one unit test file per module,
//! importing the module it is named after

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const CRATE_NAME: &str = "neuroview";

    /// Module files below `root`, relative to it, skipping module organization files
    fn module_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                let is_rust = path.extension().is_some_and(|ext| ext == "rs");
                let is_organizational = path
                    .file_name()
                    .is_some_and(|name| name == "mod.rs" || name == "lib.rs" || name == "main.rs");
                if is_rust && !is_organizational {
                    if let Ok(relative) = path.strip_prefix(root) {
                        found.insert(relative.to_path_buf());
                    }
                }
            }
        }

        Ok(found)
    }

    /// `view/engine.rs` -> `neuroview::view::engine`
    fn module_path(relative: &Path) -> String {
        let segments: Vec<String> = relative
            .with_extension("")
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        format!("{CRATE_NAME}::{}", segments.join("::"))
    }

    fn source_modules() -> BTreeSet<PathBuf> {
        module_files(Path::new("src")).unwrap_or_else(|error| {
            unreachable!("src must be readable from the package root: {error}")
        })
    }

    fn unit_test_files() -> BTreeSet<PathBuf> {
        module_files(Path::new("tests/unit")).unwrap_or_default()
    }

    fn report(header: &str, paths: &[String]) -> String {
        format!("{header}:\n  - {}", paths.join("\n  - "))
    }

    // Tests that every source module has a unit test file at the same relative path
    // Verified by deleting tests/unit/view/engine.rs
    #[test]
    fn test_every_module_has_unit_tests() {
        let tests = unit_test_files();
        let missing: Vec<String> = source_modules()
            .into_iter()
            .filter(|module| !tests.contains(module))
            .map(|module| format!("src/{0} -> tests/unit/{0}", module.display()))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Modules without unit tests", &missing)
        );
    }

    // Tests that every unit test file mirrors an existing source module
    // Verified by renaming src/labels/renumber.rs
    #[test]
    fn test_every_unit_test_has_a_module() {
        let modules = source_modules();
        let orphaned: Vec<String> = unit_test_files()
            .into_iter()
            .filter(|test| !modules.contains(test))
            .map(|test| format!("tests/unit/{}", test.display()))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit tests without a source module", &orphaned)
        );
    }

    // Tests that each unit test file imports the module it mirrors
    // Verified by importing cartesian::permutations through its re-export
    #[test]
    fn test_unit_tests_import_their_module() {
        let root = Path::new("tests/unit");
        let unrelated: Vec<String> = unit_test_files()
            .into_iter()
            .filter(|test| {
                fs::read_to_string(root.join(test))
                    .map_or(true, |content| !content.contains(&module_path(test)))
            })
            .map(|test| format!("tests/unit/{} should use {}", test.display(), module_path(&test)))
            .collect();

        assert!(
            unrelated.is_empty(),
            "{}",
            report("Unit tests not importing their module", &unrelated)
        );
    }

    // Tests that no test source file is left without a test function
    // Verified by removing #[test] from tests/pipeline.rs
    #[test]
    fn test_every_test_file_has_tests() {
        let root = Path::new("tests");
        let empty: Vec<String> = module_files(root)
            .unwrap_or_default()
            .into_iter()
            .filter(|file| {
                fs::read_to_string(root.join(file))
                    .map_or(true, |content| !content.contains("#[test]"))
            })
            .map(|file| format!("tests/{}", file.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without #[test] functions", &empty)
        );
    }
}
