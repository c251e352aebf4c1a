// actchat - app/batch.rs
//
// Batch runner: processes every input file in order, sequentially, and
// collects one result per file. Never short-circuits; any trigger (CLI,
// programmatic call) goes through `run_batch`.
//
// Within one batch each transcript path is claimed by the first file that
// writes (or would write) it. A later file mapping to the same path, such as
// the same stem in two directories with --output-dir, reports Conflict even
// under --force.

use crate::app::process;
use crate::core::export;
use crate::core::model::{FileStatus, ParseOptions, ProcessResult};
use crate::util::constants;
use std::collections::HashSet;
use std::path::PathBuf;

/// Ordered per-file results of one run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<ProcessResult>,
}

impl BatchReport {
    /// Files that were written or processed in dry-run mode.
    pub fn succeeded(&self) -> usize {
        self.count(|s| s.is_success())
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed(_)))
    }

    pub fn conflicts(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Conflict { .. }))
    }

    pub fn parse_skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::ParseSkipped { .. }))
    }

    /// Total lines kept across all files.
    pub fn lines_kept(&self) -> u64 {
        self.results.iter().map(|r| r.lines_kept).sum()
    }

    /// Process exit code for this run.
    ///
    /// Failures outrank conflicts and unparseable inputs.
    pub fn exit_code(&self) -> i32 {
        if self.failed() > 0 {
            constants::EXIT_FAILURE
        } else if self.conflicts() > 0 || self.parse_skipped() > 0 {
            constants::EXIT_INCOMPLETE
        } else {
            constants::EXIT_OK
        }
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Run the whole batch described by `options`.
pub fn run_batch(options: &ParseOptions) -> BatchReport {
    tracing::info!(
        files = options.files.len(),
        group = %options.group.key,
        include_emotes = options.include_emotes,
        dry_run = options.dry_run,
        "Batch started"
    );

    let mut report = BatchReport {
        results: Vec::with_capacity(options.files.len()),
    };

    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for path in &options.files {
        let output = export::output_path(path, &options.output);
        let result = if claimed.contains(&output) {
            ProcessResult::claimed_output(path, output)
        } else {
            let result = process::process_file(path, options);
            if result.status.is_success() {
                claimed.insert(output);
            }
            result
        };
        log_result(&result);
        report.results.push(result);
    }

    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        conflicts = report.conflicts(),
        parse_skipped = report.parse_skipped(),
        lines_kept = report.lines_kept(),
        "Batch complete"
    );

    report
}

fn log_result(result: &ProcessResult) {
    let file = result.input.display();
    match &result.status {
        FileStatus::Written { output } | FileStatus::DryRun { output } => tracing::info!(
            file = %file,
            output = %output.display(),
            status = result.status.label(),
            kept = result.lines_kept,
            malformed = result.lines_malformed,
            "File processed"
        ),
        FileStatus::Conflict { existing } => tracing::warn!(
            file = %file,
            existing = %existing.display(),
            "Transcript already exists or was written earlier in this batch; not overwriting"
        ),
        FileStatus::ParseSkipped { lines } => tracing::warn!(
            file = %file,
            malformed = lines,
            "No valid ACT log records found; file skipped"
        ),
        FileStatus::Failed(e) => tracing::error!(
            file = %file,
            error = %e,
            "File processing failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Group;
    use crate::util::error::FileError;
    use std::io;

    fn result(status: FileStatus) -> ProcessResult {
        ProcessResult {
            input: PathBuf::from("in.log"),
            status,
            lines_read: 10,
            lines_kept: 4,
            lines_malformed: 0,
        }
    }

    #[test]
    fn test_exit_code_precedence() {
        let ok = BatchReport {
            results: vec![result(FileStatus::Written {
                output: PathBuf::from("a.txt"),
            })],
        };
        assert_eq!(ok.exit_code(), constants::EXIT_OK);
        assert_eq!(ok.lines_kept(), 4);

        let conflict = BatchReport {
            results: vec![
                result(FileStatus::DryRun {
                    output: PathBuf::from("a.txt"),
                }),
                result(FileStatus::Conflict {
                    existing: PathBuf::from("b.txt"),
                }),
            ],
        };
        assert_eq!(conflict.exit_code(), constants::EXIT_INCOMPLETE);

        let failed = BatchReport {
            results: vec![
                result(FileStatus::Conflict {
                    existing: PathBuf::from("b.txt"),
                }),
                result(FileStatus::Failed(FileError::Read {
                    path: PathBuf::from("c.log"),
                    source: io::Error::new(io::ErrorKind::NotFound, "gone"),
                })),
            ],
        };
        assert_eq!(failed.exit_code(), constants::EXIT_FAILURE);
    }

    #[test]
    fn test_batch_continues_past_failures_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.log");
        std::fs::write(
            &good,
            "00|2024-01-15T20:16:42.0000000-05:00|000A|Jane Doe|Hi|a1\n",
        )
        .unwrap();
        let missing = dir.path().join("missing.log");

        let options = ParseOptions::new(
            Group::everyone(),
            vec![missing.clone(), good.clone(), missing.clone()],
        );
        let report = run_batch(&options);

        let inputs: Vec<_> = report.results.iter().map(|r| r.input.clone()).collect();
        assert_eq!(inputs, vec![missing.clone(), good, missing]);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.succeeded(), 1);
    }

    #[test]
    fn test_duplicate_output_path_is_conflict_even_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let line = "00|2024-01-15T20:16:42.0000000-05:00|000A|Jane Doe|Hi|a1\n";
        let first = dir.path().join("a").join("Network_1.log");
        let second = dir.path().join("b").join("Network_1.log");
        for (path, body) in [(&first, line), (&second, "")] {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
        let out_dir = dir.path().join("out");

        let mut options = ParseOptions::new(Group::everyone(), vec![first, second]);
        options.force_replace = true;
        options.output.directory = Some(out_dir.clone());
        let report = run_batch(&options);

        let transcript = out_dir.join("Network_1.txt");
        assert!(report.results[0].status.is_success());
        assert!(matches!(
            report.results[1].status,
            FileStatus::Conflict { existing: ref e } if *e == transcript
        ));
        assert_eq!(std::fs::read_to_string(&transcript).unwrap(), line);
        assert_eq!(report.exit_code(), constants::EXIT_INCOMPLETE);
    }

    #[test]
    fn test_same_file_twice_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Network_1.log");
        std::fs::write(&input, "00|2024-01-15T20:16:42.0000000-05:00|000A|Jane Doe|Hi|a1\n")
            .unwrap();

        let mut options = ParseOptions::new(Group::everyone(), vec![input.clone(), input]);
        options.force_replace = true;
        let report = run_batch(&options);

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.conflicts(), 1);
    }
}
