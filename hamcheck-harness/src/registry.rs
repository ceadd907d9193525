//! The ordered registry of conformance cases.

use crate::error::HarnessError;
use std::path::Path;

/// Case identifiers for the standard suite, in run order. Each maps to
/// a fixture file named `<id>.out` under the fixtures directory.
pub const DEFAULT_CASES: &[&str] = &[
    "2-node1", "2-node2", "3-node1", "3-node2", "3-node3", "3-node4", "3-node5", "3-node6",
    "4-node1", "4-node2", "4-node3", "4-node4", "4-node5", "4-node6", "4-node7", "4-node8",
    "4-node9",
];

/// An ordered list of case identifiers to run.
#[derive(Clone, Debug)]
pub struct CaseRegistry {
    cases: Vec<String>,
}

impl CaseRegistry {
    /// Returns the registry holding the standard built-in suite.
    pub fn standard() -> Self {
        Self {
            cases: DEFAULT_CASES.iter().map(|s| String::from(*s)).collect(),
        }
    }

    /// Builds a registry by discovering `*.out` fixture files under the
    /// given directory, sorted by identifier for a deterministic order.
    pub fn discover(fixtures_dir: &Path) -> Result<Self, HarnessError> {
        let pattern = fixtures_dir.join("*.out").to_string_lossy().to_string();

        let entries = glob::glob(pattern.as_ref()).map_err(|source| HarnessError::FixtureIo {
            path: fixtures_dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, source),
        })?;

        let mut cases = vec![];
        for entry in entries {
            let entry = entry.map_err(|source| HarnessError::FixtureIo {
                path: fixtures_dir.to_path_buf(),
                source: source.into(),
            })?;

            if let Some(stem) = entry.file_stem() {
                cases.push(stem.to_string_lossy().to_string());
            }
        }

        cases.sort();

        Ok(Self { cases })
    }

    /// Returns the case identifiers in run order.
    pub fn cases(&self) -> &[String] {
        &self.cases
    }

    /// Returns the number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
