// actchat - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "actchat";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "actchat";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// ACT network log layout
// =============================================================================

/// Field separator used by every ACT network log record.
pub const FIELD_DELIMITER: char = '|';

/// Record type of chat lines. Every other record type (combat, zone change,
/// plugin diagnostics) is classified as `Other`.
pub const CHAT_RECORD_TYPE: &str = "00";

/// Minimum fields for any record: type and timestamp.
pub const MIN_RECORD_FIELDS: usize = 2;

/// Minimum fields for a chat record: type, timestamp, code, name, body.
/// The trailing checksum field is optional.
pub const MIN_CHAT_FIELDS: usize = 5;

pub const FIELD_TYPE: usize = 0;
pub const FIELD_TIMESTAMP: usize = 1;
pub const FIELD_CODE: usize = 2;
pub const FIELD_NAME: usize = 3;
pub const FIELD_BODY: usize = 4;

/// chrono format of the timestamp field, e.g.
/// `2024-01-15T20:16:42.0000000-05:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Chat codes spoken aloud: Say, Shout, Yell.
pub const DEFAULT_SAY_CODES: &[&str] = &["000A", "000B", "001E"];

/// Chat codes for emotes: custom (`/em`) and standard (`/wave`).
pub const DEFAULT_EMOTE_CODES: &[&str] = &["001C", "001D"];

/// Number of words in a character's full name (`First Last`).
pub const NAME_WORDS: usize = 2;

// =============================================================================
// Groups
// =============================================================================

/// Key of the sentinel group that matches every speaker.
pub const EVERYONE_GROUP_KEY: &str = "everyone";

/// Display label of the sentinel group.
pub const EVERYONE_GROUP_LABEL: &str = "Everyone";

// =============================================================================
// Output
// =============================================================================

/// Default transcript file extension (without the dot).
pub const DEFAULT_TRANSCRIPT_EXTENSION: &str = "txt";

/// Suffix added to the file stem when the input already carries the
/// transcript extension, so a transcript never replaces its own source.
pub const TRANSCRIPT_STEM_SUFFIX: &str = "chat";

// =============================================================================
// Parsing limits
// =============================================================================

/// Maximum number of malformed lines logged individually per file.
/// Further malformed lines are still counted.
pub const MAX_PARSE_ERRORS_PER_FILE: usize = 1_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Valid values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Exit codes
// =============================================================================

/// Every file was written (or processed in dry-run mode).
pub const EXIT_OK: i32 = 0;

/// Configuration error, or at least one file failed.
pub const EXIT_FAILURE: i32 = 1;

/// No failures, but at least one file was left unwritten (conflict or not an
/// ACT log). Exit code 2 is left to clap for usage errors.
pub const EXIT_INCOMPLETE: i32 = 3;
