use std::time::{Duration, Instant};

use circuitbg_core::Viewport;

/// Default quiet period between the last resize and the repaint.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Redraw scheduling state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RedrawState {
    Idle,
    PendingRedraw { viewport: Viewport, deadline: Instant },
}

/// Trailing-edge debounce of viewport changes.
///
/// Time is passed in explicitly so the state machine can be driven by any
/// clock.
#[derive(Debug, Clone)]
pub struct DebounceScheduler {
    delay: Duration,
    state: RedrawState,
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: RedrawState::Idle,
        }
    }

    pub fn state(&self) -> RedrawState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RedrawState::PendingRedraw { .. })
    }

    /// Record a viewport change. Arms the delay from Idle, or restarts it and
    /// replaces the pending viewport.
    pub fn notify(&mut self, viewport: Viewport, now: Instant) {
        if self.is_pending() {
            log::trace!("resize within debounce window, restarting delay");
        }
        self.state = RedrawState::PendingRedraw {
            viewport,
            deadline: now + self.delay,
        };
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            RedrawState::Idle => None,
            RedrawState::PendingRedraw { deadline, .. } => Some(deadline),
        }
    }

    /// If the delay has elapsed by `now`, return to Idle and hand back the
    /// viewport to redraw.
    pub fn poll(&mut self, now: Instant) -> Option<Viewport> {
        match self.state {
            RedrawState::PendingRedraw { viewport, deadline } if now >= deadline => {
                self.state = RedrawState::Idle;
                Some(viewport)
            }
            _ => None,
        }
    }

    /// Drop any pending redraw. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = RedrawState::Idle;
        was_pending
    }
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
