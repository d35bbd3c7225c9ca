//! Domain records for beans and roasts

mod bean;
mod history;
mod roast;

pub use bean::*;
pub use history::*;
pub use roast::*;
