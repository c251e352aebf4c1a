// actchat - platform/fs.rs
//
// Filesystem operations used by the file processor: opening input logs,
// creating the output directory, and writing transcripts under the
// overwrite policy.

use crate::core::export;
use crate::util::error::FileError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// Result of attempting to write a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The transcript was written; carries the number of lines.
    Written(usize),
    /// A file already exists at the path and replacing was not allowed.
    /// Nothing was touched.
    AlreadyExists,
}

/// Open an input log for buffered, line-oriented reading.
pub fn open_log(path: &Path) -> Result<BufReader<File>, FileError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), FileError> {
    fs::create_dir_all(dir).map_err(|source| FileError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `lines` to `path`.
///
/// With `replace` the file is created or truncated. Without it the file is
/// opened with create-new semantics, so an existing file (including one that
/// appeared after any earlier existence check) is reported as
/// `AlreadyExists` and left unchanged.
pub fn write_lines(path: &Path, lines: &[Vec<u8>], replace: bool) -> Result<WriteOutcome, FileError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if replace {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let file = match options.open(path) {
        Ok(f) => f,
        Err(e) if !replace && e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(WriteOutcome::AlreadyExists);
        }
        Err(source) => {
            return Err(FileError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    export::write_transcript(lines, BufWriter::new(file))
        .map(WriteOutcome::Written)
        .map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })
}
