//! Cassette data structures for recorded LLM exchanges.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionRequest, CompletionResponse};

/// What the backend answered for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A completion came back.
    Reply(CompletionResponse),
    /// The call failed with this message.
    Failure(String),
}

/// One request/outcome pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Position in the recording, starting at zero.
    pub seq: u64,
    /// Request sent to the backend.
    pub request: CompletionRequest,
    /// What came back.
    pub outcome: Outcome,
}

/// An ordered recording of LLM exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Exchanges in call order.
    #[serde(default)]
    pub exchanges: Vec<Exchange>,
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a message naming the path when the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read cassette {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("failed to parse cassette {}: {e}", path.display()))
    }

    /// Writes the cassette as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_and_replies_survive_a_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/run.cassette.yaml");
        let cassette = Cassette {
            name: "analyze".into(),
            recorded_at: Utc::now(),
            exchanges: vec![
                Exchange {
                    seq: 0,
                    request: CompletionRequest {
                        system: "sys".into(),
                        prompt: "hi".into(),
                        structured: true,
                    },
                    outcome: Outcome::Failure("timeout".into()),
                },
                Exchange {
                    seq: 1,
                    request: CompletionRequest {
                        system: "sys".into(),
                        prompt: "hi".into(),
                        structured: true,
                    },
                    outcome: Outcome::Reply(CompletionResponse {
                        text: "{}".into(),
                        prompt_tokens: 12,
                        completion_tokens: 1,
                    }),
                },
            ],
        };

        cassette.save(&path).unwrap();
        assert_eq!(Cassette::load(&path).unwrap(), cassette);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Cassette::load(Path::new("/nonexistent/x.cassette.yaml")).unwrap_err();
        assert!(err.contains("/nonexistent/x.cassette.yaml"));
    }
}
