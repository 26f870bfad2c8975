//! Scenario compiler
//!
//! Turns a free-text scenario description into typed automation steps and
//! renders them as a Cypress test:
//! - sentence segmentation (UAX #29 sentence bounds)
//! - an ordered list of intent matchers, one per instruction category
//! - action sequence assembly with a placeholder fallback
//! - a fixed-template test source emitter
//!
//! Everything in this crate is synchronous and free of I/O.

pub mod builder;
pub mod emitter;
pub mod errors;
pub mod matchers;
pub mod segmenter;

pub use builder::{build_actions, CompiledScenario, ScenarioCompiler};
pub use emitter::{render_recording_skeleton, TestEmitter, DEFAULT_SUITE_TITLE};
pub use errors::{CompileError, CompileResult};
pub use matchers::{IntentMatcher, SentenceView, DEFAULT_MATCHERS};
pub use segmenter::{segment, Sentences};
