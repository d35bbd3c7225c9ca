//! Display helpers derived from timer state and bean weights
//!
//! These are recomputed on every read; nothing here is cached alongside the
//! values it is derived from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::timer::RoastPhase;

/// Grams in one avoirdupois pound
pub fn grams_per_pound() -> Decimal {
    Decimal::new(453_592, 3)
}

/// Format whole seconds as `MM:SS`
///
/// Minutes are not rolled over into hours, so a 61 minute roast reads
/// `61:01`. Negative input is treated as zero.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Colour of the big timer readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerDisplayColor {
    Orange,
    Cyan,
    Green,
    White,
}

impl TimerDisplayColor {
    pub fn for_phase(phase: RoastPhase) -> Self {
        match phase {
            RoastPhase::Roasting => TimerDisplayColor::Orange,
            RoastPhase::Cooling => TimerDisplayColor::Cyan,
            RoastPhase::Complete => TimerDisplayColor::Green,
            RoastPhase::Ready => TimerDisplayColor::White,
        }
    }

    /// Colour for a phase given by name; unknown names get the neutral colour
    pub fn for_phase_str(phase: &str) -> Self {
        phase
            .parse::<RoastPhase>()
            .map(Self::for_phase)
            .unwrap_or(TimerDisplayColor::White)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerDisplayColor::Orange => "orange",
            TimerDisplayColor::Cyan => "cyan",
            TimerDisplayColor::Green => "green",
            TimerDisplayColor::White => "white",
        }
    }
}

impl std::fmt::Display for TimerDisplayColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caption shown under the timer
pub fn phase_description(phase: RoastPhase) -> &'static str {
    match phase {
        RoastPhase::Ready => "Ready to start roasting",
        RoastPhase::Roasting => "Roasting in progress",
        RoastPhase::Cooling => "Cooling beans",
        RoastPhase::Complete => "Roast complete",
    }
}

/// Caption for a phase given by name; anything unrecognised yields `""`
pub fn phase_description_str(phase: &str) -> &'static str {
    phase
        .parse::<RoastPhase>()
        .map(phase_description)
        .unwrap_or("")
}

/// Convert grams to pounds
pub fn grams_to_pounds(grams: Decimal) -> Decimal {
    grams / grams_per_pound()
}

/// Round a pound quantity to three decimal places
pub fn normalize_pounds(pounds: Decimal) -> Decimal {
    pounds.round_dp(3)
}

/// Round a price to whole cents, as the beans table stores it
pub fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp(2)
}
