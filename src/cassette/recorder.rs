//! Collects LLM exchanges and writes them as a cassette.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{Cassette, Exchange, Outcome};
use crate::ports::llm::{CompletionRequest, CompletionResponse, PortError};

/// Accumulates exchanges in memory until [`save`](Self::save).
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    exchanges: Vec<Exchange>,
}

impl CassetteRecorder {
    /// Starts a recording destined for `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), exchanges: Vec::new() }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of exchanges captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Appends one exchange; `seq` is assigned here.
    pub fn record(
        &mut self,
        request: &CompletionRequest,
        result: &Result<CompletionResponse, PortError>,
    ) {
        let outcome = match result {
            Ok(response) => Outcome::Reply(response.clone()),
            Err(e) => Outcome::Failure(e.to_string()),
        };
        let seq = self.exchanges.len() as u64;
        self.exchanges.push(Exchange { seq, request: request.clone(), outcome });
    }

    /// Writes everything captured so far to disk, replacing any earlier write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> std::io::Result<&Path> {
        let cassette = Cassette {
            name: self.name.clone(),
            recorded_at: Utc::now(),
            exchanges: self.exchanges.clone(),
        };
        cassette.save(&self.path)?;
        Ok(&self.path)
    }
}
