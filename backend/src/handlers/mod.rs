//! HTTP request handlers

pub mod access;
pub mod beans;
pub mod health;
pub mod roasts;
pub mod timer;

pub use access::*;
pub use beans::*;
pub use health::*;
pub use roasts::*;
pub use timer::*;
