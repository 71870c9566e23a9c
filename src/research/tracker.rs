//! Tool-call tracking for a single research run
//!
//! Owns everything about one run's tool usage, so concurrent runs never share
//! state. The caller feeds it explicitly tagged events and polls it for
//! progress notices.

use super::tools::ToolKind;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Seconds after which a "still researching" notice is due
pub const PROGRESS_INTERVALS: [u64; 4] = [10, 25, 40, 60];

/// Seconds after which the search reminder is due if no search has started
pub const SEARCH_REMINDER_SECS: u64 = 15;

/// Something observed in the agent's event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEvent {
    /// The agent invoked a tool
    Called(ToolKind),
    /// A tool returned its output
    Output(ToolKind),
    /// The agent produced its final answer
    FinalOutput,
}

/// Where a run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    QueriesIssued,
    SearchIssued,
    Complete,
}

/// Progress message due at some point of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The run has been going for longer than this many seconds
    StillResearching(u64),
    /// Queries exist but the agent has not started searching yet
    SearchReminder,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StillResearching(secs) => {
                write!(f, "Still researching... (taking longer than {} seconds)", secs)
            }
            Self::SearchReminder => f.write_str("The agent is now searching the web for information..."),
        }
    }
}

/// Tool usage and progress state of one research run
#[derive(Debug, Clone)]
pub struct ToolCallTracker {
    state: TrackerState,
    usage: HashMap<ToolKind, u32>,
    /// Tools in the order of their first call
    history: Vec<ToolKind>,
    intervals_fired: Vec<bool>,
    reminder_fired: bool,
}

impl ToolCallTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
            usage: HashMap::new(),
            history: Vec::new(),
            intervals_fired: vec![false; PROGRESS_INTERVALS.len()],
            reminder_fired: false,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Advance the state machine with one event
    pub fn record(&mut self, event: ToolEvent) {
        match event {
            ToolEvent::Called(tool) => self.record_call(tool),
            ToolEvent::Output(tool) => debug!(tool = tool.name(), "tool output received"),
            ToolEvent::FinalOutput => {
                if self.state != TrackerState::SearchIssued {
                    warn!(state = ?self.state, "final output before a search completed");
                }
                self.state = TrackerState::Complete;
            }
        }
    }

    fn record_call(&mut self, tool: ToolKind) {
        let count = self.usage.entry(tool).or_insert(0);
        *count += 1;
        if *count > 1 {
            warn!(tool = tool.name(), uses = *count, "tool called again");
        }
        if !self.history.contains(&tool) {
            self.history.push(tool);
        }

        self.state = match (self.state, tool) {
            (TrackerState::Complete, _) => TrackerState::Complete,
            (_, ToolKind::CreateQuery) => TrackerState::QueriesIssued,
            (_, ToolKind::TargetSearch) => TrackerState::SearchIssued,
        };
    }

    /// How many times `tool` was called
    pub fn usage(&self, tool: ToolKind) -> u32 {
        self.usage.get(&tool).copied().unwrap_or(0)
    }

    /// Tools in the order they were first called
    pub fn history(&self) -> &[ToolKind] {
        &self.history
    }

    /// Tools called more than once
    pub fn repeated(&self) -> Vec<ToolKind> {
        ToolKind::ALL
            .into_iter()
            .filter(|tool| self.usage(*tool) > 1)
            .collect()
    }

    /// Each tool called exactly once, query creation first
    pub fn is_optimal(&self) -> bool {
        ToolKind::ALL.iter().all(|tool| self.usage(*tool) == 1) && self.history == ToolKind::ALL
    }

    /// Notices that became due by `elapsed`; each is returned only once
    pub fn due_notices(&mut self, elapsed: Duration) -> Vec<Notice> {
        let mut due = Vec::new();

        for (secs, fired) in PROGRESS_INTERVALS.iter().zip(self.intervals_fired.iter_mut()) {
            if !*fired && elapsed > Duration::from_secs(*secs) {
                *fired = true;
                due.push(Notice::StillResearching(*secs));
            }
        }

        if !self.reminder_fired
            && self.state == TrackerState::QueriesIssued
            && elapsed > Duration::from_secs(SEARCH_REMINDER_SECS)
        {
            self.reminder_fired = true;
            due.push(Notice::SearchReminder);
        }

        due
    }
}

impl Default for ToolCallTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_is_optimal() {
        let mut tracker = ToolCallTracker::new();
        assert_eq!(tracker.state(), TrackerState::Idle);

        tracker.record(ToolEvent::Called(ToolKind::CreateQuery));
        tracker.record(ToolEvent::Output(ToolKind::CreateQuery));
        assert_eq!(tracker.state(), TrackerState::QueriesIssued);

        tracker.record(ToolEvent::Called(ToolKind::TargetSearch));
        tracker.record(ToolEvent::Output(ToolKind::TargetSearch));
        tracker.record(ToolEvent::FinalOutput);

        assert_eq!(tracker.state(), TrackerState::Complete);
        assert!(tracker.is_optimal());
        assert!(tracker.repeated().is_empty());
    }

    #[test]
    fn test_repeated_search_is_not_optimal() {
        let mut tracker = ToolCallTracker::new();
        tracker.record(ToolEvent::Called(ToolKind::CreateQuery));
        tracker.record(ToolEvent::Called(ToolKind::TargetSearch));
        tracker.record(ToolEvent::Called(ToolKind::TargetSearch));

        assert_eq!(tracker.usage(ToolKind::TargetSearch), 2);
        assert_eq!(tracker.history(), &[ToolKind::CreateQuery, ToolKind::TargetSearch]);
        assert_eq!(tracker.repeated(), vec![ToolKind::TargetSearch]);
        assert!(!tracker.is_optimal());
    }

    #[test]
    fn test_out_of_order_is_not_optimal() {
        let mut tracker = ToolCallTracker::new();
        tracker.record(ToolEvent::Called(ToolKind::TargetSearch));
        tracker.record(ToolEvent::Called(ToolKind::CreateQuery));
        assert!(!tracker.is_optimal());
    }

    #[test]
    fn test_progress_notices_fire_once() {
        let mut tracker = ToolCallTracker::new();
        assert!(tracker.due_notices(Duration::from_secs(5)).is_empty());

        assert_eq!(
            tracker.due_notices(Duration::from_secs(26)),
            vec![Notice::StillResearching(10), Notice::StillResearching(25)]
        );
        assert!(tracker.due_notices(Duration::from_secs(30)).is_empty());
        assert_eq!(
            tracker.due_notices(Duration::from_secs(61)),
            vec![Notice::StillResearching(40), Notice::StillResearching(60)]
        );
    }

    #[test]
    fn test_search_reminder_only_while_waiting_for_search() {
        let mut tracker = ToolCallTracker::new();
        tracker.due_notices(Duration::from_secs(16));

        tracker.record(ToolEvent::Called(ToolKind::CreateQuery));
        assert_eq!(tracker.due_notices(Duration::from_secs(16)), vec![Notice::SearchReminder]);
        assert!(tracker.due_notices(Duration::from_secs(20)).is_empty());

        let mut searched = ToolCallTracker::new();
        searched.record(ToolEvent::Called(ToolKind::CreateQuery));
        searched.record(ToolEvent::Called(ToolKind::TargetSearch));
        assert!(!searched
            .due_notices(Duration::from_secs(16))
            .contains(&Notice::SearchReminder));
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(
            Notice::StillResearching(10).to_string(),
            "Still researching... (taking longer than 10 seconds)"
        );
    }
}
