//! Replaying adapters that serve recorded interactions.

pub mod llm;

pub use llm::ReplayingLlmClient;
