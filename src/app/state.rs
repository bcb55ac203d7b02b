//! Demo scenario state
//!
//! A small state machine for the sample screen: the bars fill up together,
//! hold briefly at completion, then restart from zero. Same event-driven
//! shape as the rest of the app, which keeps the scenario testable without
//! any rendering.

use std::time::Duration;

/// How long the screen rests at full before restarting
pub const HOLD_AT_FULL: Duration = Duration::from_millis(1200);

/// Scenario state of the demo screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoState {
    /// Bars are filling towards completion
    #[default]
    Filling,
    /// Bars rest at completion before the next cycle
    Holding { held: Duration },
}

/// Scenario events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent {
    /// The shared progress value reached 1
    Completed,
    /// A frame of time passed
    Tick(Duration),
}

/// Processes a scenario event and returns the new state
pub fn process_event(state: DemoState, event: DemoEvent) -> DemoState {
    match (state, event) {
        (DemoState::Filling, DemoEvent::Completed) => DemoState::Holding {
            held: Duration::ZERO,
        },

        (DemoState::Holding { held }, DemoEvent::Tick(dt)) => {
            let held = held + dt;
            if held >= HOLD_AT_FULL {
                DemoState::Filling
            } else {
                DemoState::Holding { held }
            }
        }

        // Completion while already holding changes nothing, and time
        // passing while filling is handled by the controller's progress.
        (state, _) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_filling() {
        assert_eq!(DemoState::default(), DemoState::Filling);
    }

    #[test]
    fn completion_starts_the_hold() {
        let state = process_event(DemoState::Filling, DemoEvent::Completed);
        assert!(matches!(state, DemoState::Holding { .. }));
    }

    #[test]
    fn hold_expires_back_to_filling() {
        let mut state = process_event(DemoState::Filling, DemoEvent::Completed);
        state = process_event(state, DemoEvent::Tick(Duration::from_millis(500)));
        assert!(matches!(state, DemoState::Holding { .. }));

        state = process_event(state, DemoEvent::Tick(HOLD_AT_FULL));
        assert_eq!(state, DemoState::Filling);
    }

    #[test]
    fn ticks_while_filling_are_ignored() {
        let state = process_event(DemoState::Filling, DemoEvent::Tick(Duration::from_secs(10)));
        assert_eq!(state, DemoState::Filling);
    }

    #[test]
    fn repeated_completion_does_not_reset_the_hold() {
        let mut state = process_event(DemoState::Filling, DemoEvent::Completed);
        state = process_event(state, DemoEvent::Tick(Duration::from_millis(800)));
        let held_before = state;

        state = process_event(state, DemoEvent::Completed);
        assert_eq!(state, held_before);
    }
}
