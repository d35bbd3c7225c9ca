//! Roast timer state machine
//!
//! A session moves `ready -> roasting -> cooling -> complete`, with a reset
//! edge from any phase back to `ready`. Three clocks run off the session:
//! total time from the start of the roast, development time from first crack
//! until the beans are dropped, and cooling time from the drop until cooling
//! ends.
//!
//! Every operation takes the current instant explicitly. The machine never
//! reads a clock itself, so the backend can drive it with wall-clock time and
//! tests can drive it with fixed instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{format_elapsed, phase_description, TimerDisplayColor};

/// Phase of the roast timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastPhase {
    #[default]
    Ready,
    Roasting,
    Cooling,
    Complete,
}

impl RoastPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoastPhase::Ready => "ready",
            RoastPhase::Roasting => "roasting",
            RoastPhase::Cooling => "cooling",
            RoastPhase::Complete => "complete",
        }
    }
}

/// Returned when a string does not name one of the four phases
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown roast phase: {0}")]
pub struct UnknownPhase(pub String);

impl std::str::FromStr for RoastPhase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(RoastPhase::Ready),
            "roasting" => Ok(RoastPhase::Roasting),
            "cooling" => Ok(RoastPhase::Cooling),
            "complete" => Ok(RoastPhase::Complete),
            other => Err(UnknownPhase(other.to_string())),
        }
    }
}

impl std::fmt::Display for RoastPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milestones written to the event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoastEventKind {
    FirstCrack,
    DevelopmentComplete,
    BeansToCooler,
    CoolingComplete,
}

impl RoastEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            RoastEventKind::FirstCrack => "First Crack",
            RoastEventKind::DevelopmentComplete => "Development Complete",
            RoastEventKind::BeansToCooler => "Beans to Cooler",
            RoastEventKind::CoolingComplete => "Cooling Complete",
        }
    }
}

/// One entry in the session's event log
///
/// Entries are immutable once appended. `lap_seconds` is only present for
/// events that close a sub-interval (development or cooling).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastEvent {
    pub kind: RoastEventKind,
    pub name: String,
    /// Wall-clock time of the event, `HH:MM:SS`
    pub time: String,
    pub recorded_at: DateTime<Utc>,
    pub elapsed_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lap_seconds: Option<i64>,
}

impl RoastEvent {
    fn new(
        kind: RoastEventKind,
        now: DateTime<Utc>,
        elapsed_seconds: i64,
        lap_seconds: Option<i64>,
    ) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            time: now.format("%H:%M:%S").to_string(),
            recorded_at: now,
            elapsed_seconds,
            lap_seconds,
        }
    }

    pub fn has_lap_time(&self) -> bool {
        self.lap_seconds.is_some()
    }
}

/// Event log entry as presented to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub name: String,
    pub time: String,
    pub elapsed_seconds: i64,
    pub elapsed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lap_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lap: Option<String>,
}

impl From<&RoastEvent> for EventView {
    fn from(event: &RoastEvent) -> Self {
        Self {
            name: event.name.clone(),
            time: event.time.clone(),
            elapsed_seconds: event.elapsed_seconds,
            elapsed: format_elapsed(event.elapsed_seconds),
            lap_seconds: event.lap_seconds,
            lap: event.lap_seconds.map(format_elapsed),
        }
    }
}

/// Read-only view of the timer, with every derived display value filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: RoastPhase,
    pub is_active: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub total_elapsed_seconds: i64,
    pub formatted_total_time: String,
    pub first_crack_logged: bool,
    pub development_elapsed_seconds: i64,
    /// Present once first crack has been logged
    pub formatted_development_time: Option<String>,
    pub cooling_elapsed_seconds: i64,
    /// Present while the beans are in the cooler
    pub formatted_cooling_time: Option<String>,
    pub timer_display_color: TimerDisplayColor,
    pub phase_description: String,
    pub events: Vec<EventView>,
}

/// Instants captured by a finished session, ready to be stored as a roast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedSession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub first_crack_time: Option<DateTime<Utc>>,
    pub development_start_time: Option<DateTime<Utc>>,
    pub cooling_start_time: DateTime<Utc>,
    pub cooling_end_time: DateTime<Utc>,
    pub total_elapsed_seconds: i64,
    pub development_elapsed_seconds: i64,
    pub cooling_elapsed_seconds: i64,
    pub events: Vec<RoastEvent>,
}

/// Live state of one roast session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoastTimer {
    phase: RoastPhase,
    is_active: bool,
    start_time: Option<DateTime<Utc>>,
    total_elapsed_seconds: i64,
    first_crack_logged: bool,
    development_start_time: Option<DateTime<Utc>>,
    development_elapsed_seconds: i64,
    cooling_start_time: Option<DateTime<Utc>>,
    cooling_elapsed_seconds: i64,
    roast_end_time: Option<DateTime<Utc>>,
    cooling_end_time: Option<DateTime<Utc>>,
    events: Vec<RoastEvent>,
}

/// Whole seconds from `since` to `now`, never negative
fn seconds_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_seconds().max(0)
}

impl RoastTimer {
    /// A fresh timer in the `ready` phase
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RoastPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn total_elapsed_seconds(&self) -> i64 {
        self.total_elapsed_seconds
    }

    pub fn first_crack_logged(&self) -> bool {
        self.first_crack_logged
    }

    pub fn development_start_time(&self) -> Option<DateTime<Utc>> {
        self.development_start_time
    }

    pub fn development_elapsed_seconds(&self) -> i64 {
        self.development_elapsed_seconds
    }

    pub fn cooling_start_time(&self) -> Option<DateTime<Utc>> {
        self.cooling_start_time
    }

    pub fn cooling_elapsed_seconds(&self) -> i64 {
        self.cooling_elapsed_seconds
    }

    pub fn events(&self) -> &[RoastEvent] {
        &self.events
    }

    /// Begin roasting. Ignored unless the timer is `ready`.
    pub fn start_roast(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase != RoastPhase::Ready {
            return false;
        }

        *self = Self {
            phase: RoastPhase::Roasting,
            is_active: true,
            start_time: Some(now),
            ..Self::default()
        };
        true
    }

    /// Mark first crack and start the development clock.
    /// Ignored unless roasting and first crack has not been logged yet.
    pub fn log_first_crack(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase != RoastPhase::Roasting || self.first_crack_logged {
            return false;
        }

        self.tick(now);
        self.events.push(RoastEvent::new(
            RoastEventKind::FirstCrack,
            now,
            self.total_elapsed_seconds,
            None,
        ));
        self.first_crack_logged = true;
        self.development_start_time = Some(now);
        self.development_elapsed_seconds = 0;
        true
    }

    /// Drop the beans into the cooler. Ignored unless roasting.
    pub fn end_roast(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase != RoastPhase::Roasting {
            return false;
        }

        self.tick(now);
        if self.first_crack_logged {
            self.events.push(RoastEvent::new(
                RoastEventKind::DevelopmentComplete,
                now,
                self.total_elapsed_seconds,
                Some(self.development_elapsed_seconds),
            ));
        }
        self.events.push(RoastEvent::new(
            RoastEventKind::BeansToCooler,
            now,
            self.total_elapsed_seconds,
            None,
        ));
        self.phase = RoastPhase::Cooling;
        self.roast_end_time = Some(now);
        self.cooling_start_time = Some(now);
        self.cooling_elapsed_seconds = 0;
        true
    }

    /// Finish cooling and stop all clocks. Ignored unless cooling.
    pub fn end_cooling(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase != RoastPhase::Cooling {
            return false;
        }

        self.tick(now);
        self.events.push(RoastEvent::new(
            RoastEventKind::CoolingComplete,
            now,
            self.total_elapsed_seconds,
            Some(self.cooling_elapsed_seconds),
        ));
        self.phase = RoastPhase::Complete;
        self.is_active = false;
        self.cooling_end_time = Some(now);
        true
    }

    /// Return every field to its initial value, from any phase
    pub fn reset_roast(&mut self) {
        *self = Self::default();
    }

    /// Recompute the running clocks from `now`.
    ///
    /// Returns `false` without touching anything when the session is not
    /// active or has no start time; a tick loop should stop on `false`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let start = match (self.is_active, self.start_time) {
            (true, Some(start)) => start,
            _ => return false,
        };

        self.total_elapsed_seconds = seconds_between(start, now);

        match self.phase {
            RoastPhase::Roasting => {
                if let Some(development_start) = self.development_start_time {
                    self.development_elapsed_seconds = seconds_between(development_start, now);
                }
            }
            RoastPhase::Cooling => {
                if let Some(cooling_start) = self.cooling_start_time {
                    self.cooling_elapsed_seconds = seconds_between(cooling_start, now);
                }
            }
            RoastPhase::Ready | RoastPhase::Complete => {}
        }
        true
    }

    /// Everything the UI shows, derived from the current fields
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            is_active: self.is_active,
            start_time: self.start_time,
            total_elapsed_seconds: self.total_elapsed_seconds,
            formatted_total_time: format_elapsed(self.total_elapsed_seconds),
            first_crack_logged: self.first_crack_logged,
            development_elapsed_seconds: self.development_elapsed_seconds,
            formatted_development_time: self
                .first_crack_logged
                .then(|| format_elapsed(self.development_elapsed_seconds)),
            cooling_elapsed_seconds: self.cooling_elapsed_seconds,
            formatted_cooling_time: (self.phase == RoastPhase::Cooling)
                .then(|| format_elapsed(self.cooling_elapsed_seconds)),
            timer_display_color: TimerDisplayColor::for_phase(self.phase),
            phase_description: phase_description(self.phase).to_string(),
            events: self.events.iter().map(EventView::from).collect(),
        }
    }

    /// The finished session, once the timer has reached `complete`
    pub fn completed_session(&self) -> Option<CompletedSession> {
        if self.phase != RoastPhase::Complete {
            return None;
        }

        Some(CompletedSession {
            start_time: self.start_time?,
            end_time: self.roast_end_time?,
            first_crack_time: self.development_start_time,
            development_start_time: self.development_start_time,
            cooling_start_time: self.cooling_start_time?,
            cooling_end_time: self.cooling_end_time?,
            total_elapsed_seconds: self.total_elapsed_seconds,
            development_elapsed_seconds: self.development_elapsed_seconds,
            cooling_elapsed_seconds: self.cooling_elapsed_seconds,
            events: self.events.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 30, 0).unwrap() + Duration::seconds(seconds)
    }

    fn names(timer: &RoastTimer) -> Vec<&str> {
        timer.events().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_new_timer_is_ready() {
        let timer = RoastTimer::new();
        assert_eq!(timer.phase(), RoastPhase::Ready);
        assert!(!timer.is_active());
        assert!(timer.start_time().is_none());
        assert!(timer.events().is_empty());
    }

    #[test]
    fn test_start_roast_initialises_session() {
        let mut timer = RoastTimer::new();
        assert!(timer.start_roast(t(0)));

        assert_eq!(timer.phase(), RoastPhase::Roasting);
        assert!(timer.is_active());
        assert_eq!(timer.start_time(), Some(t(0)));
        assert_eq!(timer.total_elapsed_seconds(), 0);
        assert_eq!(timer.development_elapsed_seconds(), 0);
        assert_eq!(timer.cooling_elapsed_seconds(), 0);
        assert!(!timer.first_crack_logged());
        assert!(timer.events().is_empty());
    }

    #[test]
    fn test_start_roast_outside_ready_changes_nothing() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.tick(t(42));
        timer.log_first_crack(t(42));
        let before = timer.clone();

        assert!(!timer.start_roast(t(50)));
        assert_eq!(timer, before);

        timer.end_roast(t(60));
        let before = timer.clone();
        assert!(!timer.start_roast(t(61)));
        assert_eq!(timer, before);
    }

    #[test]
    fn test_first_crack_only_logged_once() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.tick(t(300));

        assert!(timer.log_first_crack(t(300)));
        assert!(!timer.log_first_crack(t(310)));

        assert_eq!(names(&timer), vec!["First Crack"]);
        assert_eq!(timer.development_start_time(), Some(t(300)));
        assert_eq!(timer.events()[0].elapsed_seconds, 300);
        assert!(!timer.events()[0].has_lap_time());
    }

    #[test]
    fn test_first_crack_requires_roasting() {
        let mut timer = RoastTimer::new();
        assert!(!timer.log_first_crack(t(0)));
        assert!(timer.events().is_empty());
        assert!(!timer.first_crack_logged());
    }

    #[test]
    fn test_end_roast_with_first_crack_logs_development_then_cooler() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.log_first_crack(t(480));
        timer.tick(t(570));

        assert!(timer.end_roast(t(570)));

        assert_eq!(
            names(&timer),
            vec!["First Crack", "Development Complete", "Beans to Cooler"]
        );
        let development = &timer.events()[1];
        assert_eq!(development.lap_seconds, Some(90));
        assert_eq!(development.elapsed_seconds, 570);
        assert!(!timer.events()[2].has_lap_time());
        assert_eq!(timer.phase(), RoastPhase::Cooling);
        assert_eq!(timer.cooling_start_time(), Some(t(570)));
        assert_eq!(timer.cooling_elapsed_seconds(), 0);
    }

    #[test]
    fn test_end_roast_without_first_crack_skips_development_event() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));

        assert!(timer.end_roast(t(600)));
        assert_eq!(names(&timer), vec!["Beans to Cooler"]);
        assert_eq!(timer.events()[0].elapsed_seconds, 600);
    }

    #[test]
    fn test_end_roast_requires_roasting() {
        let mut timer = RoastTimer::new();
        assert!(!timer.end_roast(t(0)));
        assert_eq!(timer, RoastTimer::new());
    }

    #[test]
    fn test_end_cooling_completes_and_deactivates() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.end_roast(t(600));

        assert!(timer.end_cooling(t(840)));

        assert_eq!(timer.phase(), RoastPhase::Complete);
        assert!(!timer.is_active());
        let last = timer.events().last().unwrap();
        assert_eq!(last.name, "Cooling Complete");
        assert_eq!(last.lap_seconds, Some(240));
        assert_eq!(last.elapsed_seconds, 840);

        assert!(!timer.end_cooling(t(900)));
    }

    #[test]
    fn test_no_ticks_after_complete() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.end_roast(t(10));
        timer.end_cooling(t(20));
        let before = timer.clone();

        assert!(!timer.tick(t(10_000)));
        assert_eq!(timer, before);
    }

    #[test]
    fn test_tick_on_ready_timer_is_rejected() {
        let mut timer = RoastTimer::new();
        assert!(!timer.tick(t(5)));
        assert_eq!(timer.total_elapsed_seconds(), 0);
    }

    #[test]
    fn test_tick_clamps_clock_going_backwards() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(100));
        timer.tick(t(90));
        assert_eq!(timer.total_elapsed_seconds(), 0);
    }

    #[test]
    fn test_reset_from_every_phase() {
        let mut timer = RoastTimer::new();
        timer.reset_roast();
        assert_eq!(timer, RoastTimer::new());

        timer.start_roast(t(0));
        timer.log_first_crack(t(5));
        timer.reset_roast();
        assert_eq!(timer, RoastTimer::new());

        timer.start_roast(t(0));
        timer.end_roast(t(5));
        timer.reset_roast();
        assert_eq!(timer, RoastTimer::new());

        timer.start_roast(t(0));
        timer.end_roast(t(5));
        timer.end_cooling(t(9));
        timer.reset_roast();
        assert_eq!(timer, RoastTimer::new());
        assert!(timer.events().is_empty());
    }

    #[test]
    fn test_full_roast_scenario() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));

        timer.tick(t(5));
        assert_eq!(timer.total_elapsed_seconds(), 5);

        timer.log_first_crack(t(5));
        assert_eq!(timer.development_elapsed_seconds(), 0);

        timer.tick(t(20));
        assert_eq!(timer.total_elapsed_seconds(), 20);
        assert_eq!(timer.development_elapsed_seconds(), 15);

        timer.end_roast(t(20));
        assert_eq!(timer.phase(), RoastPhase::Cooling);
        assert_eq!(timer.development_elapsed_seconds(), 15);
        assert_eq!(timer.cooling_elapsed_seconds(), 0);

        timer.tick(t(30));
        assert_eq!(timer.total_elapsed_seconds(), 30);
        assert_eq!(timer.cooling_elapsed_seconds(), 10);
        assert_eq!(timer.development_elapsed_seconds(), 15);

        timer.end_cooling(t(30));
        assert_eq!(timer.phase(), RoastPhase::Complete);
        assert!(!timer.is_active());
        assert_eq!(timer.cooling_elapsed_seconds(), 10);

        timer.tick(t(90));
        assert_eq!(timer.cooling_elapsed_seconds(), 10);
        assert_eq!(timer.total_elapsed_seconds(), 30);
    }

    #[test]
    fn test_snapshot_gates_sub_timers() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.tick(t(65));

        let snapshot = timer.snapshot();
        assert_eq!(snapshot.formatted_total_time, "01:05");
        assert_eq!(snapshot.formatted_development_time, None);
        assert_eq!(snapshot.formatted_cooling_time, None);
        assert_eq!(snapshot.timer_display_color, TimerDisplayColor::Orange);
        assert_eq!(snapshot.phase_description, "Roasting in progress");

        timer.log_first_crack(t(65));
        timer.tick(t(125));
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.formatted_development_time.as_deref(), Some("01:00"));

        timer.end_roast(t(125));
        timer.tick(t(130));
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.formatted_cooling_time.as_deref(), Some("00:05"));
        assert_eq!(snapshot.timer_display_color, TimerDisplayColor::Cyan);
        assert_eq!(snapshot.events.len(), 3);
        assert_eq!(snapshot.events[1].lap.as_deref(), Some("01:00"));
        assert_eq!(snapshot.events[2].lap, None);

        timer.end_cooling(t(130));
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.formatted_cooling_time, None);
        assert_eq!(snapshot.timer_display_color, TimerDisplayColor::Green);
    }

    #[test]
    fn test_event_wall_clock_time() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.log_first_crack(t(61));
        assert_eq!(timer.events()[0].time, "07:31:01");
    }

    #[test]
    fn test_event_serialization_omits_missing_lap() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.log_first_crack(t(10));
        timer.end_roast(t(20));

        let json = serde_json::to_value(timer.events()).unwrap();
        assert_eq!(json[0]["name"], "First Crack");
        assert!(json[0].get("lap_seconds").is_none());
        assert_eq!(json[1]["lap_seconds"], 10);
        assert_eq!(json[1]["kind"], "development_complete");
    }

    #[test]
    fn test_completed_session_only_when_complete() {
        let mut timer = RoastTimer::new();
        timer.start_roast(t(0));
        timer.log_first_crack(t(400));
        timer.end_roast(t(500));
        assert!(timer.completed_session().is_none());

        timer.end_cooling(t(740));
        let session = timer.completed_session().unwrap();
        assert_eq!(session.start_time, t(0));
        assert_eq!(session.first_crack_time, Some(t(400)));
        assert_eq!(session.end_time, t(500));
        assert_eq!(session.cooling_start_time, t(500));
        assert_eq!(session.cooling_end_time, t(740));
        assert_eq!(session.development_elapsed_seconds, 100);
        assert_eq!(session.cooling_elapsed_seconds, 240);
        assert_eq!(session.events.len(), 4);
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!("cooling".parse::<RoastPhase>(), Ok(RoastPhase::Cooling));
        assert!("burnt".parse::<RoastPhase>().is_err());
        assert_eq!(RoastPhase::Complete.to_string(), "complete");
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start,
        FirstCrack,
        EndRoast,
        EndCooling,
        Reset,
        Tick,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Start),
            Just(Op::FirstCrack),
            Just(Op::EndRoast),
            Just(Op::EndCooling),
            Just(Op::Reset),
            Just(Op::Tick),
        ]
    }

    fn rank(phase: RoastPhase) -> u8 {
        match phase {
            RoastPhase::Ready => 0,
            RoastPhase::Roasting => 1,
            RoastPhase::Cooling => 2,
            RoastPhase::Complete => 3,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Phases only advance one step at a time, except reset back to ready
        #[test]
        fn prop_phase_moves_forward_or_resets(
            ops in prop::collection::vec((op_strategy(), 0i64..120), 1..40)
        ) {
            let mut timer = RoastTimer::new();
            let mut clock = 0i64;

            for (op, step) in ops {
                clock += step;
                let before = timer.phase();
                let events_before = timer.events().len();
                let development_before = timer.development_elapsed_seconds();
                let cooling_before = timer.cooling_elapsed_seconds();
                match op {
                    Op::Start => { timer.start_roast(t(clock)); }
                    Op::FirstCrack => { timer.log_first_crack(t(clock)); }
                    Op::EndRoast => { timer.end_roast(t(clock)); }
                    Op::EndCooling => { timer.end_cooling(t(clock)); }
                    Op::Reset => { timer.reset_roast(); }
                    Op::Tick => { timer.tick(t(clock)); }
                }
                let after = timer.phase();

                match op {
                    Op::Reset => prop_assert_eq!(after, RoastPhase::Ready),
                    _ => prop_assert!(after == before || rank(after) == rank(before) + 1),
                }

                // events only disappear on reset or a fresh start
                if !matches!(op, Op::Reset | Op::Start) {
                    prop_assert!(timer.events().len() >= events_before);
                }

                // a tick only moves the sub-timer of the phase it runs in
                if matches!(op, Op::Tick) {
                    if before != RoastPhase::Roasting {
                        prop_assert_eq!(timer.development_elapsed_seconds(), development_before);
                    }
                    if before != RoastPhase::Cooling {
                        prop_assert_eq!(timer.cooling_elapsed_seconds(), cooling_before);
                    }
                }
                prop_assert_eq!(timer.is_active(), matches!(timer.phase(), RoastPhase::Roasting | RoastPhase::Cooling));
            }
        }
    }
}
