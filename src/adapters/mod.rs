//! Adapter implementations for the port traits.
//!
//! - `live`: real network, system clock, random ids.
//! - `recording` / `replaying`: cassette capture and playback of LLM exchanges.
//! - `fixed`: deterministic clock and ids.
//! - `memory` / `yaml_store`: plan storage.

pub mod fixed;
pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
pub mod yaml_store;

pub use memory::MemoryPlanStore;
pub use yaml_store::YamlPlanStore;
