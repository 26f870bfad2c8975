//! Action primitives - resilient building blocks for browser automation
//!
//! - [`AutomationEngine`]: the boundary a browser driver implements
//! - [`wait_and_get`]: poll until an element exists and is visible
//! - [`retry`]: bounded attempts with a fixed pause between them
//! - [`AutomationSession`]: an engine plus retry, timeout and error policy

pub mod engine;
pub mod errors;
pub mod retry;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod waiting;

pub use engine::*;
pub use errors::*;
pub use retry::*;
pub use session::*;
pub use waiting::*;
