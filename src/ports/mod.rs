//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the planning engine and something it does not
//! own: time, identity, the language-model backend, and plan storage.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod id_gen;
pub mod llm;
pub mod plan_store;

pub use clock::Clock;
pub use id_gen::IdGenerator;
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient, PortError};
pub use plan_store::PlanStore;
