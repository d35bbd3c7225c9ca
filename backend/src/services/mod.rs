//! Business logic services

pub mod bean;
pub mod clock;
pub mod roast;
pub mod timer;

pub use bean::BeanService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use roast::RoastService;
pub use timer::RoastTimerService;
