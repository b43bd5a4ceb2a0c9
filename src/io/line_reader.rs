//! Streaming reader for initial load files
//!
//! Provides an iterator over the non-blank lines of a command file, together
//! with their 1-based line numbers.
//!
//! # Error Handling
//!
//! - Failing to open the file is returned from `open()`
//! - Bytes that are not valid UTF-8 are replaced with U+FFFD; such a line is
//!   yielded like any other and left for the parser to reject
//! - A read failure in the middle of the file is yielded once as an `Err`,
//!   after which the iterator is exhausted; lines read before the failure have
//!   already been yielded and stay applied by the caller

use crate::types::{LineKind, TrackerError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A non-blank line and its position in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLine {
    pub number: usize,
    pub text: String,
}

/// Line iterator over one command file
#[derive(Debug)]
pub struct LineReader {
    reader: BufReader<File>,
    buf: Vec<u8>,
    kind: LineKind,
    path: String,
    line_num: usize,
    failed: bool,
}

impl LineReader {
    /// Open a command file of the given kind
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileLoad` naming the file and the I/O error.
    pub fn open(path: &Path, kind: LineKind) -> Result<Self, TrackerError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| TrackerError::file_load(kind, &display, &e))?;

        Ok(Self {
            reader: BufReader::with_capacity(8 * 1024, file),
            buf: Vec::new(),
            kind,
            path: display,
            line_num: 0,
            failed: false,
        })
    }
}

impl Iterator for LineReader {
    type Item = Result<NumberedLine, TrackerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_num += 1;
                    let text = String::from_utf8_lossy(&self.buf);
                    let text = text.trim_end_matches(['\n', '\r']);
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok(NumberedLine {
                        number: self.line_num,
                        text: text.to_string(),
                    }));
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(TrackerError::file_load(self.kind, &self.path, &e)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary command file for testing
    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_open_fails_on_missing_file() {
        let err = LineReader::open(Path::new("notExistingInitialPackages.txt"), LineKind::Package)
            .unwrap_err();

        match err {
            TrackerError::FileLoad { kind, path, .. } => {
                assert_eq!(kind, LineKind::Package);
                assert_eq!(path, "notExistingInitialPackages.txt");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_skips_blank_lines_and_keeps_numbers() {
        let file = create_temp_file(b"3.4 08801\n\n   \n2 90005\n");

        let lines: Vec<NumberedLine> = LineReader::open(file.path(), LineKind::Package)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            lines,
            vec![
                NumberedLine {
                    number: 1,
                    text: "3.4 08801".to_string()
                },
                NumberedLine {
                    number: 4,
                    text: "2 90005".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let file = create_temp_file(b"");
        let reader = LineReader::open(file.path(), LineKind::Fee).unwrap();
        assert_eq!(reader.count(), 0);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_reading() {
        let file = create_temp_file(b"10 5.00\r\n\xff\xfe 1.00\n3 2.00");

        let lines: Vec<NumberedLine> = LineReader::open(file.path(), LineKind::Fee)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            lines,
            vec![
                NumberedLine {
                    number: 1,
                    text: "10 5.00".to_string()
                },
                NumberedLine {
                    number: 2,
                    text: "\u{FFFD}\u{FFFD} 1.00".to_string()
                },
                NumberedLine {
                    number: 3,
                    text: "3 2.00".to_string()
                },
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_read_error_is_yielded_once() {
        // opening a directory succeeds on Linux, reading it does not
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut reader = LineReader::open(dir.path(), LineKind::Fee).unwrap();

        assert!(matches!(
            reader.next(),
            Some(Err(TrackerError::FileLoad {
                kind: LineKind::Fee,
                ..
            }))
        ));
        assert!(reader.next().is_none());
    }
}
