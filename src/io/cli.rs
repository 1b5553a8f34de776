//! Command-line interface for batch relabeling of PNG label images

use crate::io::configuration::{LABEL_IMAGE_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{ArrayError, Result, invalid_argument};
use crate::io::image::{load_label_image, save_label_image};
use crate::io::progress::ProgressManager;
use crate::labels::renumber_label_image;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "neuroview")]
#[command(
    author,
    version,
    about = "Renumber label images to consecutive labels starting at 1"
)]
/// Command-line arguments for the relabeling tool
pub struct Cli {
    /// Input PNG label image or directory of label images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Result of relabeling a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Input label image
    pub input: PathBuf,
    /// Written output image
    pub output: PathBuf,
    /// Number of distinct non-zero labels found
    pub label_count: usize,
}

/// Orchestrates batch relabeling with progress tracking
pub struct FileProcessor {
    cli: Cli,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&self) -> Result<Vec<FileReport>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            info!(target = %self.cli.target.display(), "nothing to relabel");
            return Ok(Vec::new());
        }

        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(files.len()));

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            if let Some(pm) = &progress {
                pm.start_file(file);
            }

            reports.push(Self::process_file(file)?);

            if let Some(pm) = &progress {
                pm.complete_file();
            }
        }

        if let Some(pm) = &progress {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if Self::is_label_image(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_argument(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| ArrayError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if Self::is_label_image(&path)
                    && !Self::is_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_argument(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn is_label_image(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(LABEL_IMAGE_EXTENSION)
    }

    fn is_output(path: &Path) -> bool {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            warn!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(input_path: &Path) -> Result<FileReport> {
        let output_path = Self::get_output_path(input_path);

        let labels = load_label_image(input_path)?;
        let relabeled = renumber_label_image(&labels)?;
        let label_count = relabeled.iter().copied().max().map_or(0, usize::from);
        save_label_image(&relabeled, &output_path)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            labels = label_count,
            "relabeled"
        );

        Ok(FileReport {
            input: input_path.to_path_buf(),
            output: output_path,
            label_count,
        })
    }

    /// Output path for an input label image: `<stem>_relabeled.<ext>`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
