// actchat - core/export.rs
//
// Transcript output: path derivation and line writing.
// Core layer: writes to any Write trait object.

use crate::core::model::OutputSettings;
use crate::util::constants::TRANSCRIPT_STEM_SUFFIX;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Derive the transcript path for `input`.
///
/// Same stem as the input with the transcript extension, in the configured
/// output directory or next to the input. When the input already carries the
/// transcript extension the stem gains a `.chat` suffix so the transcript
/// never replaces its own source (`notes.txt` -> `notes.chat.txt`).
pub fn output_path(input: &Path, settings: &OutputSettings) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| OsStr::new("transcript"));
    let same_extension = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&settings.extension));

    let mut file_name = OsString::from(stem);
    if same_extension {
        file_name.push(".");
        file_name.push(TRANSCRIPT_STEM_SUFFIX);
    }
    if !settings.extension.is_empty() {
        file_name.push(".");
        file_name.push(&settings.extension);
    }

    let dir = match &settings.directory {
        Some(dir) => dir.as_path(),
        None => input.parent().unwrap_or_else(|| Path::new("")),
    };
    dir.join(file_name)
}

/// Write kept lines, one per line, each terminated by `\n`.
///
/// Lines are raw bytes and are written exactly as read, whatever their
/// encoding. Returns the number of lines written.
pub fn write_transcript<W: Write>(lines: &[Vec<u8>], mut writer: W) -> io::Result<usize> {
    for line in lines {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_swaps_extension() {
        let out = output_path(
            Path::new("/logs/Network_20240115.log"),
            &OutputSettings::default(),
        );
        assert_eq!(out, PathBuf::from("/logs/Network_20240115.txt"));
    }

    #[test]
    fn test_output_path_uses_configured_directory() {
        let settings = OutputSettings {
            directory: Some(PathBuf::from("/transcripts")),
            ..OutputSettings::default()
        };
        let out = output_path(Path::new("/logs/Network_20240115.log"), &settings);
        assert_eq!(out, PathBuf::from("/transcripts/Network_20240115.txt"));
    }

    #[test]
    fn test_output_path_never_equals_input() {
        let input = Path::new("/logs/session.TXT");
        let out = output_path(input, &OutputSettings::default());
        assert_eq!(out, PathBuf::from("/logs/session.chat.txt"));
        assert_ne!(out, input);
    }

    #[test]
    fn test_output_path_without_extension() {
        let out = output_path(Path::new("Network"), &OutputSettings::default());
        assert_eq!(out, PathBuf::from("Network.txt"));
    }

    #[test]
    fn test_write_transcript_verbatim() {
        let lines = vec![b"first|line".to_vec(), b"second  line ".to_vec()];
        let mut buf = Vec::new();
        let count = write_transcript(&lines, &mut buf).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), "first|line\nsecond  line \n");
    }

    #[test]
    fn test_write_transcript_keeps_non_utf8_bytes() {
        let lines = vec![b"Hi Zo\xEB|abc".to_vec()];
        let mut buf = Vec::new();
        write_transcript(&lines, &mut buf).unwrap();
        assert_eq!(buf, b"Hi Zo\xEB|abc\n");
    }

    #[test]
    fn test_write_empty_transcript() {
        let mut buf = Vec::new();
        assert_eq!(write_transcript(&[], &mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }
}
