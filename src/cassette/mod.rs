//! Cassette format for recording and replaying LLM exchanges.
//!
//! Set `PLANWRIGHT_RECORD=<file>` to capture every completion made during a
//! run, then `PLANWRIGHT_REPLAY=<file>` to serve them back without a network.

pub mod format;
pub mod recorder;

pub use format::{Cassette, Exchange, Outcome};
pub use recorder::CassetteRecorder;
