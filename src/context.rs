//! Service context bundling all port trait objects.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::adapters::live::{LiveClock, LiveIdGenerator, LiveLlmClient};
use crate::adapters::recording::RecordingLlmClient;
use crate::adapters::replaying::ReplayingLlmClient;
use crate::adapters::{MemoryPlanStore, YamlPlanStore};
use crate::cassette::{Cassette, CassetteRecorder};
use crate::config::AppConfig;
use crate::ports::{Clock, IdGenerator, LlmClient, PlanStore};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for timestamps.
    pub clock: Box<dyn Clock>,
    /// Source of plan and task ids.
    pub id_gen: Box<dyn IdGenerator>,
    /// Language model, absent when no backend is configured.
    pub llm: Option<Box<dyn LlmClient>>,
    /// Where plans live.
    pub store: Box<dyn PlanStore>,
    /// Cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Assembles a context from explicit adapters.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        id_gen: Box<dyn IdGenerator>,
        llm: Option<Box<dyn LlmClient>>,
        store: Box<dyn PlanStore>,
    ) -> Self {
        Self { clock, id_gen, llm, store, recorder: None }
    }

    /// Live clock and ids with an in-memory store.
    #[must_use]
    pub fn in_memory(llm: Option<Box<dyn LlmClient>>) -> Self {
        Self::new(Box::new(LiveClock), Box::new(LiveIdGenerator), llm, Box::new(MemoryPlanStore::new()))
    }

    /// Wires the context the CLI runs with.
    ///
    /// The language model is, in order of preference: the replay cassette,
    /// the Azure deployment, or nothing. A record path wraps whichever client
    /// was chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if the replay cassette cannot be read or parsed.
    pub fn live(config: &AppConfig) -> Result<Self, String> {
        let llm: Option<Box<dyn LlmClient>> = if let Some(path) = &config.replay_path {
            let cassette = Cassette::load(path)?;
            info!(path = %path.display(), exchanges = cassette.exchanges.len(), "replaying LLM cassette");
            Some(Box::new(ReplayingLlmClient::from_cassette(&cassette)))
        } else if let Some(settings) = &config.ai {
            debug!(settings = ?settings, "AI backend configured");
            Some(Box::new(LiveLlmClient::new(settings.clone()).map_err(|e| e.to_string())?))
        } else {
            debug!(missing = ?config.missing_ai_vars, "AI backend not configured");
            None
        };

        let mut ctx = Self::new(
            Box::new(LiveClock),
            Box::new(LiveIdGenerator),
            llm,
            Box::new(YamlPlanStore::new(&config.store_root)),
        );
        if let Some(path) = &config.record_path {
            ctx = ctx.recording(CassetteRecorder::new(path, "planwright-session"));
        }
        Ok(ctx)
    }

    /// Routes every LLM call through `recorder`; the cassette is written on drop.
    #[must_use]
    pub fn recording(mut self, recorder: CassetteRecorder) -> Self {
        let Some(inner) = self.llm.take() else {
            warn!(path = %recorder.path().display(), "recording requested without an LLM backend; nothing to record");
            return self;
        };
        let recorder = Arc::new(Mutex::new(recorder));
        self.llm = Some(Box::new(RecordingLlmClient::new(inner, Arc::clone(&recorder))));
        self.recorder = Some(recorder);
        self
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let recorder = recorder.lock().unwrap_or_else(PoisonError::into_inner);
            match recorder.save() {
                Ok(path) => info!(path = %path.display(), exchanges = recorder.len(), "wrote LLM cassette"),
                Err(e) => warn!(error = %e, "failed to write cassette"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::ports::CompletionRequest;

    fn config(pairs: &[(&str, String)]) -> AppConfig {
        AppConfig::from_lookup(|name| {
            pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn no_ai_vars_means_no_llm() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live(&config(&[(
            crate::config::STORE_VAR,
            dir.path().display().to_string(),
        )]))
        .unwrap();
        assert!(ctx.llm.is_none());
    }

    #[test]
    fn missing_replay_cassette_is_an_error() {
        let result = ServiceContext::live(&config(&[(
            crate::config::REPLAY_VAR,
            "/nonexistent/replay.cassette.yaml".to_string(),
        )]));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn recording_context_writes_cassette_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.cassette.yaml");

        let llm = ReplayingLlmClient::from_replies(vec![Ok("recorded".into())]);
        let ctx = ServiceContext::in_memory(Some(Box::new(llm)))
            .recording(CassetteRecorder::new(&path, "session"));

        let request = CompletionRequest { system: "s".into(), prompt: "p".into(), structured: false };
        let reply = ctx.llm.as_ref().unwrap().complete(&request).await.unwrap();
        assert_eq!(reply.text, "recorded");
        drop(ctx);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.exchanges.len(), 1);
        assert_eq!(cassette.exchanges[0].request, request);
    }
}
