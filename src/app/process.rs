// actchat - app/process.rs
//
// File processor: owns one input file's lifecycle.
//
//   open -> stream lines through classify + is_kept -> accumulate kept lines
//        -> ParseSkipped | DryRun | Conflict | Written
//
// Every failure here is scoped to the file; nothing returns an error to the
// batch.

use crate::core::export;
use crate::core::filter;
use crate::core::model::{ChatCodes, FileStatus, Group, MessageKind, ParseOptions, ProcessResult};
use crate::core::parser;
use crate::platform::fs::{self, WriteOutcome};
use crate::util::constants;
use crate::util::error::FileError;
use std::io::{self, BufRead};
use std::path::Path;

/// Lines gathered from one input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Kept lines, byte for byte as read, in input order.
    pub kept: Vec<Vec<u8>>,
    pub lines_read: u64,
    pub lines_blank: u64,
    pub lines_malformed: u64,
    /// Lines classified as `Other`.
    pub lines_other: u64,
}

impl FilterOutcome {
    /// True when the input had content but none of it was a valid record.
    pub fn all_malformed(&self) -> bool {
        self.lines_malformed > 0 && self.lines_malformed == self.lines_read - self.lines_blank
    }
}

/// Stream `reader` line by line and keep the lines that pass the filter.
///
/// Lines are split on `\n` with a trailing `\r` removed. Classification
/// runs on a lossy UTF-8 view of each line, but kept lines hold the original
/// bytes, so non-UTF-8 text (e.g. CP1252 names) reaches the transcript
/// unchanged. Malformed lines are counted and skipped; only a read error
/// ends the stream early.
pub fn filter_lines<R: BufRead>(
    mut reader: R,
    group: &Group,
    include_emotes: bool,
    codes: &ChatCodes,
    source: &Path,
) -> io::Result<FilterOutcome> {
    let mut outcome = FilterOutcome::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        outcome.lines_read += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            outcome.lines_blank += 1;
            continue;
        }

        match parser::classify(&line, codes) {
            Ok(parsed) => {
                if parsed.kind == MessageKind::Other {
                    outcome.lines_other += 1;
                } else if filter::is_kept(&parsed, group, include_emotes) {
                    tracing::trace!(
                        line_number = outcome.lines_read,
                        kind = %parsed.kind,
                        speaker = %parsed.speaker,
                        "Line kept"
                    );
                    outcome.kept.push(buf.clone());
                }
            }
            Err(e) => {
                outcome.lines_malformed += 1;
                if outcome.lines_malformed as usize <= constants::MAX_PARSE_ERRORS_PER_FILE {
                    let preview: String =
                        line.chars().take(constants::DEBUG_MAX_LINE_PREVIEW).collect();
                    tracing::debug!(
                        file = %source.display(),
                        line_number = outcome.lines_read,
                        error = %e,
                        preview = %preview,
                        "Skipping malformed line"
                    );
                }
            }
        }
    }

    Ok(outcome)
}

/// Process one input file under `options`.
pub fn process_file(path: &Path, options: &ParseOptions) -> ProcessResult {
    let reader = match fs::open_log(path) {
        Ok(r) => r,
        Err(e) => return ProcessResult::failed(path, e),
    };

    let outcome = match filter_lines(
        reader,
        &options.group,
        options.include_emotes,
        &options.codes,
        path,
    ) {
        Ok(o) => o,
        Err(source) => {
            return ProcessResult::failed(
                path,
                FileError::Read {
                    path: path.to_path_buf(),
                    source,
                },
            )
        }
    };

    let status = decide_output(path, options, &outcome);

    ProcessResult {
        input: path.to_path_buf(),
        status,
        lines_read: outcome.lines_read,
        lines_kept: outcome.kept.len() as u64,
        lines_malformed: outcome.lines_malformed,
    }
}

/// Turn a finished filter pass into a status, writing the transcript when
/// the options allow it.
fn decide_output(path: &Path, options: &ParseOptions, outcome: &FilterOutcome) -> FileStatus {
    if outcome.all_malformed() {
        return FileStatus::ParseSkipped {
            lines: outcome.lines_malformed,
        };
    }

    let output = export::output_path(path, &options.output);

    if options.dry_run {
        return FileStatus::DryRun { output };
    }

    if let Some(dir) = &options.output.directory {
        if let Err(e) = fs::ensure_dir(dir) {
            return FileStatus::Failed(e);
        }
    }

    match fs::write_lines(&output, &outcome.kept, options.force_replace) {
        Ok(WriteOutcome::Written(_)) => FileStatus::Written { output },
        Ok(WriteOutcome::AlreadyExists) => FileStatus::Conflict { existing: output },
        Err(e) => FileStatus::Failed(e),
    }
}
