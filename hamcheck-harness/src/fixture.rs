//! Fixture file parsing.

use crate::error::HarnessError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One invocation/expected-output pair read from a fixture file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureRecord {
    /// Arguments to pass to the external program. The fixture's first
    /// token is a placeholder for the program itself and is dropped;
    /// the actual program path comes from [`crate::RunnerConfig`].
    pub args: Vec<String>,
    /// Expected stdout block, with interior newlines intact. The
    /// terminating blank line (if any) is included; comparison trims
    /// both sides, so it contributes nothing observable.
    pub expected: String,
}

/// Sequential reader over one open fixture file.
///
/// Records are consumed through a shared cursor: successive calls to
/// [`FixtureFile::next_record`] observe records in file order without
/// overlap, and the cursor never rewinds.
pub struct FixtureFile {
    path: PathBuf,
    reader: BufReader<File>,
    line: usize,
}

impl FixtureFile {
    /// Opens the fixture file at the given path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HarnessError> {
        let path = path.into();
        let file = File::open(&path).map_err(|source| HarnessError::FixtureIo {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            reader: BufReader::new(file),
            line: 0,
        })
    }

    /// Returns the path of the underlying fixture file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the next record, advancing the cursor. Returns `Ok(None)`
    /// once the file is exhausted.
    pub fn next_record(&mut self) -> Result<Option<FixtureRecord>, HarnessError> {
        let Some(invocation_line) = self.read_line()? else {
            return Ok(None);
        };

        let mut tokens = invocation_line.split_whitespace();

        // The first token is the program placeholder; a boundary line
        // with no tokens at all means the fixture is malformed.
        if tokens.next().is_none() {
            return Err(HarnessError::MalformedFixture {
                path: self.path.clone(),
                line: self.line,
            });
        }

        let args: Vec<String> = tokens.map(String::from).collect();

        // Accumulate the expected block up to the blank separator line
        // or EOF; the separator itself is appended before stopping.
        let mut expected = String::new();
        while let Some(line) = self.read_line()? {
            let is_separator = line == "\n";
            expected.push_str(&line);
            if is_separator {
                break;
            }
        }

        tracing::debug!(
            fixture = %self.path.display(),
            ?args,
            expected_len = expected.len(),
            "parsed fixture record"
        );

        Ok(Some(FixtureRecord { args, expected }))
    }

    /// Reads one raw line including its trailing newline; `None` at EOF.
    fn read_line(&mut self) -> Result<Option<String>, HarnessError> {
        let mut buf = String::new();
        let n = self
            .reader
            .read_line(&mut buf)
            .map_err(|source| HarnessError::FixtureIo {
                path: self.path.clone(),
                source,
            })?;

        if n == 0 {
            Ok(None)
        } else {
            self.line += 1;
            Ok(Some(buf))
        }
    }
}
