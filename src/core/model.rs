// actchat - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::FileError;
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// =============================================================================
// Classified log line
// =============================================================================

/// What a chat line represents once its chat code has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Spoken dialogue (say, shout, yell).
    Say,
    /// A non-spoken action such as "waves".
    Emote,
    /// System messages, combat records, and every other record type.
    /// Never written to a transcript.
    Other,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Say => "Say",
            MessageKind::Emote => "Emote",
            MessageKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single classified log line.
///
/// Borrows from the raw line so that classification allocates only for the
/// normalised speaker name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    /// The original line exactly as read, without its line terminator.
    pub raw_text: &'a str,

    /// Timestamp with the offset recorded in the log.
    pub timestamp: DateTime<FixedOffset>,

    /// Upper-cased chat code (e.g. `000A`). Empty for non-chat records.
    pub code: String,

    /// Normalised full name of the speaker. Empty when the line has none.
    pub speaker: String,

    pub kind: MessageKind,

    /// Free-text message field.
    pub body: &'a str,
}

// =============================================================================
// Chat code tables
// =============================================================================

/// Chat-code tables the classifier uses to decide message kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCodes {
    /// Upper-cased codes classified as `Say`.
    pub say: HashSet<String>,

    /// Upper-cased codes classified as `Emote`.
    pub emote: HashSet<String>,

    /// Prefixes that turn a say-channel message into an emote
    /// (roleplay convention such as `*waves*`). Empty by default.
    pub emote_markers: Vec<String>,
}

impl Default for ChatCodes {
    fn default() -> Self {
        Self {
            say: constants::DEFAULT_SAY_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            emote: constants::DEFAULT_EMOTE_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            emote_markers: Vec::new(),
        }
    }
}

// =============================================================================
// Groups
// =============================================================================

/// Who a group admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// Sentinel membership that admits every speaker.
    Everyone,
    /// Exact, case-sensitive full names.
    Members(HashSet<String>),
}

/// A named set of participants used to filter a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Short name used on the command line and in config (`[groups.<key>]`).
    pub key: String,

    /// Human-readable label.
    pub label: String,

    pub membership: Membership,
}

impl Group {
    /// The sentinel group matching every speaker.
    pub fn everyone() -> Self {
        Self {
            key: constants::EVERYONE_GROUP_KEY.to_string(),
            label: constants::EVERYONE_GROUP_LABEL.to_string(),
            membership: Membership::Everyone,
        }
    }

    /// Build a group from a list of member names.
    pub fn with_members<I, S>(key: &str, label: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            membership: Membership::Members(members.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_everyone(&self) -> bool {
        matches!(self.membership, Membership::Everyone)
    }

    /// Number of explicit members; `None` for the sentinel group.
    pub fn member_count(&self) -> Option<usize> {
        match &self.membership {
            Membership::Everyone => None,
            Membership::Members(m) => Some(m.len()),
        }
    }
}

// =============================================================================
// Run options
// =============================================================================

/// Where and how transcripts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    /// Transcript extension without the leading dot.
    pub extension: String,

    /// Directory for transcripts. `None` writes next to each input file.
    pub directory: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            extension: constants::DEFAULT_TRANSCRIPT_EXTENSION.to_string(),
            directory: None,
        }
    }
}

/// Resolved parameters for one batch run. Read-only to the core.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Process and report without writing anything.
    pub dry_run: bool,

    /// Overwrite existing transcripts.
    pub force_replace: bool,

    /// Keep emote lines as well as spoken lines.
    pub include_emotes: bool,

    pub group: Group,
    pub codes: ChatCodes,
    pub output: OutputSettings,

    /// Input files, processed in this order.
    pub files: Vec<PathBuf>,
}

impl ParseOptions {
    /// Options with defaults for everything except the group and the files.
    pub fn new(group: Group, files: Vec<PathBuf>) -> Self {
        Self {
            dry_run: false,
            force_replace: false,
            include_emotes: false,
            group,
            codes: ChatCodes::default(),
            output: OutputSettings::default(),
            files,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of processing one input file.
#[derive(Debug)]
pub enum FileStatus {
    /// Transcript written to `output`.
    Written { output: PathBuf },

    /// Processed in dry-run mode; `output` is where it would have gone.
    DryRun { output: PathBuf },

    /// A transcript already exists and overwriting was not permitted, or an
    /// earlier file in the same batch already claimed the path.
    Conflict { existing: PathBuf },

    /// Every non-blank line was malformed; nothing was written.
    ParseSkipped { lines: u64 },

    /// Reading the input or writing the transcript failed.
    Failed(FileError),
}

impl FileStatus {
    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Written { .. } => "written",
            FileStatus::DryRun { .. } => "dry-run",
            FileStatus::Conflict { .. } => "conflict",
            FileStatus::ParseSkipped { .. } => "parse-skipped",
            FileStatus::Failed(_) => "failed",
        }
    }

    /// True for `Written` and `DryRun`.
    pub fn is_success(&self) -> bool {
        matches!(self, FileStatus::Written { .. } | FileStatus::DryRun { .. })
    }
}

/// Per-file result produced by the file processor.
#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    pub status: FileStatus,

    /// Lines read from the input, including blank and malformed ones.
    pub lines_read: u64,

    /// Lines written (or that would be written) to the transcript.
    pub lines_kept: u64,

    /// Lines skipped because they could not be classified.
    pub lines_malformed: u64,
}

impl ProcessResult {
    /// Result for a file that could not be processed at all.
    pub fn failed(input: &Path, error: FileError) -> Self {
        Self {
            input: input.to_path_buf(),
            status: FileStatus::Failed(error),
            lines_read: 0,
            lines_kept: 0,
            lines_malformed: 0,
        }
    }

    /// Result for a file whose transcript path was already taken by an
    /// earlier file in the same batch. The file is not read.
    pub fn claimed_output(input: &Path, existing: PathBuf) -> Self {
        Self {
            input: input.to_path_buf(),
            status: FileStatus::Conflict { existing },
            lines_read: 0,
            lines_kept: 0,
            lines_malformed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codes_are_uppercase() {
        let codes = ChatCodes::default();
        assert!(codes.say.contains("000A"));
        assert!(codes.emote.contains("001D"));
        assert!(codes.say.is_disjoint(&codes.emote));
    }

    #[test]
    fn test_everyone_group_has_no_member_count() {
        let group = Group::everyone();
        assert!(group.is_everyone());
        assert_eq!(group.member_count(), None);

        let party = Group::with_members("party", "Party", ["Jane Doe", "John Smith"]);
        assert!(!party.is_everyone());
        assert_eq!(party.member_count(), Some(2));
    }

    #[test]
    fn test_status_success_classification() {
        let written = FileStatus::Written {
            output: PathBuf::from("a.txt"),
        };
        let conflict = FileStatus::Conflict {
            existing: PathBuf::from("a.txt"),
        };
        assert!(written.is_success());
        assert!(!conflict.is_success());
        assert_eq!(conflict.label(), "conflict");
    }
}
