// actchat - app/report.rs
//
// Renders batch results for the command line: one human-readable line per
// file, or one JSON object per file.

use crate::app::batch::BatchReport;
use crate::core::model::{FileStatus, ProcessResult};
use serde::Serialize;
use std::path::Path;

/// Serialisable view of a `ProcessResult`.
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub input: &'a Path,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'a Path>,
    pub lines_read: u64,
    pub lines_kept: u64,
    pub lines_malformed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<'a> From<&'a ProcessResult> for FileReport<'a> {
    fn from(result: &'a ProcessResult) -> Self {
        let (output, detail) = match &result.status {
            FileStatus::Written { output } | FileStatus::DryRun { output } => {
                (Some(output.as_path()), None)
            }
            FileStatus::Conflict { existing } => (
                Some(existing.as_path()),
                Some("transcript already exists".to_string()),
            ),
            FileStatus::ParseSkipped { lines } => {
                (None, Some(format!("{lines} malformed lines, no ACT records")))
            }
            FileStatus::Failed(e) => (None, Some(e.to_string())),
        };
        Self {
            input: &result.input,
            status: result.status.label(),
            output,
            lines_read: result.lines_read,
            lines_kept: result.lines_kept,
            lines_malformed: result.lines_malformed,
            detail,
        }
    }
}

/// One JSON object (single line) for a file result.
pub fn render_json(result: &ProcessResult) -> serde_json::Result<String> {
    serde_json::to_string(&FileReport::from(result))
}

/// One human-readable line for a file result.
pub fn render_text(result: &ProcessResult) -> String {
    let input = result.input.display();
    match &result.status {
        FileStatus::Written { output } => format!(
            "written   {input} -> {} ({} lines kept)",
            output.display(),
            result.lines_kept
        ),
        FileStatus::DryRun { output } => format!(
            "dry-run   {input} -> {} ({} lines would be kept)",
            output.display(),
            result.lines_kept
        ),
        FileStatus::Conflict { existing } => format!(
            "conflict  {input}: '{}' already exists or belongs to an earlier input",
            existing.display()
        ),
        FileStatus::ParseSkipped { lines } => {
            format!("skipped   {input}: not an ACT network log ({lines} malformed lines)")
        }
        FileStatus::Failed(e) => format!("failed    {input}: {e}"),
    }
}

/// Closing summary line for the whole batch.
pub fn render_summary(report: &BatchReport) -> String {
    format!(
        "{} file(s): {} ok, {} conflict, {} skipped, {} failed; {} lines kept",
        report.results.len(),
        report.succeeded(),
        report.conflicts(),
        report.parse_skipped(),
        report.failed(),
        report.lines_kept()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn written() -> ProcessResult {
        ProcessResult {
            input: PathBuf::from("Network_1.log"),
            status: FileStatus::Written {
                output: PathBuf::from("Network_1.txt"),
            },
            lines_read: 120,
            lines_kept: 7,
            lines_malformed: 1,
        }
    }

    #[test]
    fn test_render_text_written() {
        let text = render_text(&written());
        assert!(text.starts_with("written"));
        assert!(text.contains("Network_1.txt"));
        assert!(text.contains("7 lines kept"));
    }

    #[test]
    fn test_render_json_fields() {
        let json = render_json(&written()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "written");
        assert_eq!(value["output"], "Network_1.txt");
        assert_eq!(value["lines_kept"], 7);
        assert!(value.get("detail").is_none());
    }

    #[test]
    fn test_render_json_parse_skipped_has_detail() {
        let result = ProcessResult {
            input: PathBuf::from("notes.log"),
            status: FileStatus::ParseSkipped { lines: 3 },
            lines_read: 3,
            lines_kept: 0,
            lines_malformed: 3,
        };
        let value: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(value["status"], "parse-skipped");
        assert!(value.get("output").is_none());
        assert!(value["detail"].as_str().unwrap().contains("3 malformed"));
    }

    #[test]
    fn test_render_summary() {
        let report = BatchReport {
            results: vec![written()],
        };
        assert_eq!(
            render_summary(&report),
            "1 file(s): 1 ok, 0 conflict, 0 skipped, 0 failed; 7 lines kept"
        );
    }
}
