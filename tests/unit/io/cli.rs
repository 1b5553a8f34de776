//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ndarray::arr2;
    use neuroview::ArrayError;
    use neuroview::io::cli::{Cli, FileProcessor};
    use neuroview::io::image::{load_label_image, save_label_image};
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn processor_for(target: &Path, extra: &[&str]) -> FileProcessor {
        let mut args = vec!["program".to_string(), target.display().to_string()];
        args.extend(extra.iter().map(ToString::to_string));
        FileProcessor::new(Cli::parse_from(args))
    }

    // Tests CLI parsing with only required target file argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "labels.png"]);

        assert_eq!(cli.target, PathBuf::from("labels.png"));
        assert!(!cli.quiet);
        assert!(!cli.no_skip);
        assert_eq!(cli.verbose, 0);
    }

    // Tests CLI parsing with all available arguments
    // Verified by counting only the first -v flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from(["program", "dir", "--quiet", "--no-skip", "-vvv"]);

        assert_eq!(cli.target, PathBuf::from("dir"));
        assert!(cli.quiet);
        assert!(cli.no_skip);
        assert_eq!(cli.verbose, 3);
    }

    // Tests file skip behavior based on --no-skip flag
    // Verified by inverting boolean logic in skip_existing method
    #[test]
    fn test_skip_existing_logic() {
        assert!(Cli::parse_from(["program", "a.png"]).skip_existing());
        assert!(!Cli::parse_from(["program", "a.png", "-n"]).skip_existing());
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(Cli::parse_from(["program", "a.png"]).should_show_progress());
        assert!(!Cli::parse_from(["program", "a.png", "-q"]).should_show_progress());
    }

    // Tests output path naming
    // Verified by dropping the suffix
    #[test]
    fn test_get_output_path() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("/data/cells.png")),
            PathBuf::from("/data/cells_relabeled.png")
        );
        assert_eq!(
            FileProcessor::get_output_path(Path::new("cells.png")),
            PathBuf::from("cells_relabeled.png")
        );
    }

    // Tests relabeling a single file end to end
    // Verified by saving the input labels unchanged
    #[test]
    fn test_process_single_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cells.png");
        save_label_image(&arr2(&[[0_u16, 40], [40, 900]]), &input).unwrap();

        let reports = processor_for(&input, &["-q"]).process().unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].label_count, 2);
        let output = load_label_image(&dir.path().join("cells_relabeled.png")).unwrap();
        assert_eq!(output, arr2(&[[0, 1], [1, 2]]));
    }

    // Tests directory processing skips outputs and existing results
    // Verified by reprocessing files that carry the output suffix
    #[test]
    fn test_process_directory_skips() {
        let dir = tempdir().unwrap();
        let labels = arr2(&[[7_u16, 0], [0, 9]]);
        save_label_image(&labels, &dir.path().join("a.png")).unwrap();
        save_label_image(&labels, &dir.path().join("b.png")).unwrap();
        save_label_image(&labels, &dir.path().join("b_relabeled.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let reports = processor_for(dir.path(), &["-q"]).process().unwrap();
        let inputs: Vec<_> = reports.iter().map(|r| r.input.clone()).collect();
        assert_eq!(inputs, vec![dir.path().join("a.png")]);

        let reports = processor_for(dir.path(), &["-q", "--no-skip"]).process().unwrap();
        assert_eq!(reports.len(), 2);
        assert!(!dir.path().join("a_relabeled_relabeled.png").exists());
    }

    // Tests invalid targets
    // Verified by accepting any existing file
    #[test]
    fn test_process_invalid_target() {
        let dir = tempdir().unwrap();
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "x").unwrap();

        assert!(matches!(
            processor_for(&text, &["-q"]).process(),
            Err(ArrayError::InvalidArgument { .. })
        ));
        assert!(matches!(
            processor_for(&dir.path().join("missing"), &["-q"]).process(),
            Err(ArrayError::InvalidArgument { .. })
        ));
    }

    // Tests that an empty directory is not an error
    // Verified by failing on empty file lists
    #[test]
    fn test_process_empty_directory() {
        let dir = tempdir().unwrap();
        let reports = processor_for(dir.path(), &[]).process().unwrap();
        assert!(reports.is_empty());
    }
}
