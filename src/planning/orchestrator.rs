//! Strategy selection: AI first when asked, rule-based otherwise or on failure.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

use super::ai::AiAnalyzer;
use super::model::Analysis;
use super::rules;

/// Which strategy produced a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// The language model.
    #[serde(rename = "ai")]
    Ai,
    /// The built-in topic templates.
    #[serde(rename = "rule-based")]
    RuleBased,
}

impl Method {
    /// Wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::RuleBased => "rule-based",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller preferences for one decomposition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecomposeOptions {
    /// Try the AI analyzer before the rules.
    pub use_ai: bool,
    /// Extra context handed to the AI analyzer.
    pub context: Option<String>,
}

impl DecomposeOptions {
    /// Rule-based only.
    #[must_use]
    pub fn rules_only() -> Self {
        Self::default()
    }

    /// AI first, with optional context.
    #[must_use]
    pub fn ai(context: Option<String>) -> Self {
        Self { use_ai: true, context }
    }
}

/// An analysis tagged with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Tasks, suggestions, and complexity.
    #[serde(flatten)]
    pub analysis: Analysis,
    /// Strategy that produced `analysis`.
    pub method: Method,
}

/// Decomposes `requirements`, falling back to the rules whenever the AI path fails.
///
/// Results never mix strategies: either every task came from the model or
/// every task came from the templates.
///
/// # Errors
///
/// AI failures are absorbed. Any other error kind from the AI path would be
/// surfaced, though the analyzer currently produces none.
pub async fn decompose(
    analyzer: &AiAnalyzer<'_>,
    requirements: &str,
    options: &DecomposeOptions,
) -> Result<Decomposition> {
    if options.use_ai {
        match analyzer.analyze(requirements, options.context.as_deref()).await {
            Ok(analysis) => {
                info!(tasks = analysis.tasks.len(), "decomposed with AI");
                return Ok(Decomposition { analysis, method: Method::Ai });
            }
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "AI decomposition failed, falling back to rule-based");
            }
            Err(err) => return Err(err),
        }
    }

    let analysis = rules::analyze(requirements);
    info!(tasks = analysis.tasks.len(), "decomposed with rules");
    Ok(Decomposition { analysis, method: Method::RuleBased })
}
