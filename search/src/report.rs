//! Deterministic JSON rendering of a search result.
//!
//! A [`SearchReport`] keeps only what is reproducible across runs and
//! processes: the termination reason, state fingerprints (hex of each
//! state's stable hash), `Debug`-rendered operations and the counters.
//! Wall-clock time is held separately and never enters the canonical bytes.
//!
//! Canonical bytes are `serde_json`'s compact output. Object keys come out
//! sorted because `serde_json::Map` is a `BTreeMap` without the
//! `preserve_order` feature, and every number in a report is an integer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

use lodestar_kernel::capability::SearchState;
use lodestar_kernel::hash::{digest_hex, HashDomain};

use crate::outcome::{SearchResult, SearchStats, TerminationReason};

/// Schema tag written into every report.
pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The path part of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSummary {
    /// Lowercase hex of each state's stable hash, start first.
    pub fingerprints: Vec<String>,
    /// `Debug` rendering of each operation; the first is always `None`.
    pub operations: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub algorithm: String,
    pub termination: TerminationReason,
    pub path: Option<PathSummary>,
    pub stats: SearchStats,
}

impl SearchReport {
    /// Summarize `result` as produced by `algorithm`.
    #[must_use]
    pub fn new<S: SearchState>(algorithm: &str, result: &SearchResult<S>) -> Self {
        let path = result.path.as_ref().map(|path| PathSummary {
            fingerprints: path
                .states
                .iter()
                .map(|state| fingerprint(state.stable_hash()))
                .collect(),
            operations: path
                .operations
                .iter()
                .map(|op| op.as_ref().map(|op| format!("{op:?}")))
                .collect(),
        });
        Self {
            algorithm: algorithm.to_owned(),
            termination: result.termination,
            path,
            stats: result.stats.clone(),
        }
    }

    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.termination == TerminationReason::GoalReached
    }

    /// Moves on the reported path, if there is one.
    #[must_use]
    pub fn moves(&self) -> Option<usize> {
        self.path
            .as_ref()
            .map(|path| path.fingerprints.len().saturating_sub(1))
    }

    /// Wall-clock time of the run. Not part of the JSON.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let path = self.path.as_ref().map_or(Value::Null, |path| {
            json!({
                "fingerprints": path.fingerprints,
                "operations": path.operations,
            })
        });
        json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "algorithm": self.algorithm,
            "termination": self.termination.as_str(),
            "goal_reached": self.goal_reached(),
            "path": path,
            "stats": {
                "searched_nodes": self.stats.searched_nodes,
                "generated_nodes": self.stats.generated_nodes,
                "generated_unique_nodes": self.stats.generated_unique_nodes,
                "max_open_size": self.stats.max_open_size,
                "max_closed_size": self.stats.max_closed_size,
                "heuristic_param": self.stats.heuristic_param,
            },
        })
    }

    /// # Errors
    ///
    /// [`ReportError::Serialize`] if `serde_json` rejects the value.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, ReportError> {
        Ok(serde_json::to_vec(&self.to_json_value())?)
    }

    /// SHA-256 of the canonical bytes under the report hash domain.
    ///
    /// # Errors
    ///
    /// See [`SearchReport::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<String, ReportError> {
        Ok(digest_hex(HashDomain::Report, &self.to_canonical_json_bytes()?))
    }

    /// Write the canonical bytes to `path`.
    ///
    /// # Errors
    ///
    /// [`ReportError::Io`] if the file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let bytes = self.to_canonical_json_bytes()?;
        std::fs::write(path, bytes).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn fingerprint(hash: u32) -> String {
    hex::encode(hash.to_be_bytes())
}
