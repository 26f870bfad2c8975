//! Scenario playback: runs compiled steps and one-line commands against an
//! automation session

pub mod command;
pub mod errors;
pub mod executor;
pub mod types;

pub use command::EngineCommand;
pub use errors::{FlowError, FlowResult};
pub use executor::{DefaultFlowExecutor, FlowExecutor};
pub use types::*;
