//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so every setting here can
//! come from either place.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Azure OpenAI API key.
pub const API_KEY_VAR: &str = "OPEN_AI_API_KEY";
/// Azure OpenAI resource endpoint, e.g. `https://my-resource.openai.azure.com`.
pub const ENDPOINT_VAR: &str = "OPEN_AI_AZURE_ENDPOINT";
/// Azure OpenAI REST API version.
pub const API_VERSION_VAR: &str = "OPEN_AI_API_VERSION";
/// Name of the model deployment to call.
pub const DEPLOYMENT_VAR: &str = "OPEN_AI_DEPLOYMENT_NAME";
/// Optional request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "OPEN_AI_TIMEOUT_SECS";

/// Request timeout when [`TIMEOUT_VAR`] is unset or unparseable.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(60);

/// Every variable the AI backend needs.
pub const AI_ENV_VARS: [&str; 4] = [API_KEY_VAR, ENDPOINT_VAR, API_VERSION_VAR, DEPLOYMENT_VAR];

/// Directory holding stored plans.
pub const STORE_VAR: &str = "PLANWRIGHT_STORE";
/// Cassette file to record LLM exchanges into.
pub const RECORD_VAR: &str = "PLANWRIGHT_RECORD";
/// Cassette file to replay LLM exchanges from.
pub const REPLAY_VAR: &str = "PLANWRIGHT_REPLAY";

const DEFAULT_STORE: &str = ".planwright";

/// Connection settings for the Azure OpenAI backend.
#[derive(Clone, PartialEq, Eq)]
pub struct AiSettings {
    /// API key sent in the `api-key` header.
    pub api_key: String,
    /// Resource endpoint without a trailing slash.
    pub endpoint: String,
    /// Value for the `api-version` query parameter.
    pub api_version: String,
    /// Deployment name used in the request path.
    pub deployment: String,
    /// Upper bound on one completion call, connect to last byte.
    pub timeout: Duration,
}

impl AiSettings {
    /// Chat-completions URL for this deployment.
    #[must_use]
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

// Keep the key out of logs.
impl fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Everything the CLI needs to wire a service context.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend settings, present only when every AI variable is set.
    pub ai: Option<AiSettings>,
    /// AI variables that were absent or blank.
    pub missing_ai_vars: Vec<&'static str>,
    /// Root directory of the YAML plan store.
    pub store_root: PathBuf,
    /// Where to write a cassette of LLM exchanges, if recording.
    pub record_path: Option<PathBuf>,
    /// Cassette to serve LLM exchanges from instead of the network.
    pub replay_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let missing_ai_vars: Vec<&'static str> =
            AI_ENV_VARS.into_iter().filter(|name| get(*name).is_none()).collect();

        let timeout = get(TIMEOUT_VAR)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_AI_TIMEOUT, Duration::from_secs);

        let ai = match (get(API_KEY_VAR), get(ENDPOINT_VAR), get(API_VERSION_VAR), get(DEPLOYMENT_VAR)) {
            (Some(api_key), Some(endpoint), Some(api_version), Some(deployment)) => {
                Some(AiSettings { api_key, endpoint, api_version, deployment, timeout })
            }
            _ => None,
        };

        Self {
            ai,
            missing_ai_vars,
            store_root: get(STORE_VAR).map_or_else(|| PathBuf::from(DEFAULT_STORE), PathBuf::from),
            record_path: get(RECORD_VAR).map(PathBuf::from),
            replay_path: get(REPLAY_VAR).map(PathBuf::from),
        }
    }
}
