//! Shared types and logic for the Roasted home roasting tracker
//!
//! Everything in this crate is free of I/O. The backend drives the roast
//! timer with real instants and stores the records; the WASM bundle reuses
//! the display helpers in the browser.

pub mod format;
pub mod models;
pub mod timer;
pub mod types;
pub mod validation;

pub use format::*;
pub use models::*;
pub use timer::*;
pub use types::*;
pub use validation::*;
