//! Live adapters for real external interactions.

pub mod clock;
pub mod id_gen;
pub mod llm;

pub use clock::LiveClock;
pub use id_gen::LiveIdGenerator;
pub use llm::LiveLlmClient;
