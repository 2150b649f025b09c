// SPDX-License-Identifier: MPL-2.0
//! Per-notification presentation state.
//!
//! A [`Controller`] owns one record's countdown, pause gate, progress and the
//! slot it animates out from. The countdown subtracts real elapsed time on
//! every tick, so delayed ticks still land on the right remaining time and a
//! pause freezes it exactly where it was.

use super::notification::{Notification, NotificationId};
use super::stack::StackIndex;
use std::time::{Duration, Instant};

/// What is holding a notification's countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseSource {
    Hover,
    Focus,
}

/// User gesture on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Click,
    Enter,
    Space,
    /// The record's own close button.
    CloseControl,
}

/// Effect of an [`Activation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Expand,
    Dismiss,
}

/// Result of advancing a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not counting down (untimed, already expired, or exiting).
    Idle,
    Paused,
    Running,
    /// Remaining time reached zero on this tick. Reported once.
    Expired,
}

/// Countdown and presentation state for one notification.
#[derive(Debug, Clone)]
pub struct Controller {
    id: NotificationId,
    duration: Option<Duration>,
    remaining: Duration,
    last_tick: Instant,
    hovered: bool,
    focused: bool,
    expired: bool,
    exit_slot: Option<usize>,
}

impl Controller {
    /// Creates the controller for a freshly inserted record.
    #[must_use]
    pub fn new(record: &Notification, now: Instant) -> Self {
        let duration = record.auto_dismiss_after();
        Self {
            id: record.id(),
            duration,
            remaining: duration.unwrap_or_default(),
            last_tick: now,
            hovered: false,
            focused: false,
            expired: false,
            exit_slot: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Whether this record counts down at all.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.duration.is_some()
    }

    /// Paused while any pause source is active.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.hovered || self.focused
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Engages a pause source. Redundant calls do nothing.
    pub fn pause(&mut self, source: PauseSource, now: Instant) {
        if !self.is_paused() {
            // Account for the running time since the last tick.
            self.consume(now);
        }
        self.set_source(source, true);
    }

    /// Releases a pause source. The countdown restarts only once every
    /// source is released.
    pub fn resume(&mut self, source: PauseSource, now: Instant) {
        let was_paused = self.is_paused();
        self.set_source(source, false);
        if was_paused && !self.is_paused() {
            self.last_tick = now;
        }
    }

    fn set_source(&mut self, source: PauseSource, active: bool) {
        match source {
            PauseSource::Hover => self.hovered = active,
            PauseSource::Focus => self.focused = active,
        }
    }

    fn consume(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        if self.is_timed() && !self.expired {
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
    }

    /// Advances the countdown to `now`.
    ///
    /// The last-tick timestamp moves on every call, paused or not, so
    /// resuming never fast-forwards through the paused span.
    pub fn tick(&mut self, now: Instant, exiting: bool) -> TickOutcome {
        if !self.is_timed() || self.expired || exiting {
            self.last_tick = now;
            return TickOutcome::Idle;
        }
        if self.is_paused() {
            self.last_tick = now;
            return TickOutcome::Paused;
        }

        self.consume(now);
        if self.remaining.is_zero() {
            self.expired = true;
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Remaining time as a percentage in `[0, 100]`.
    ///
    /// Untimed records report 100.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(total) if !total.is_zero() => {
                (self.remaining.as_secs_f32() / total.as_secs_f32() * 100.0).clamp(0.0, 100.0)
            }
            _ => 100.0,
        }
    }

    /// Maps a gesture to its effect given the record's position.
    ///
    /// Only the front record of a collapsed stack expands it. The close
    /// control dismisses and never expands.
    #[must_use]
    pub fn activate(
        &self,
        index: StackIndex,
        expanded: bool,
        activation: Activation,
    ) -> Option<Interaction> {
        match activation {
            Activation::CloseControl => match index {
                StackIndex::Active(_) => Some(Interaction::Dismiss),
                StackIndex::Exiting => None,
            },
            Activation::Click | Activation::Enter | Activation::Space => {
                (index.is_front() && !expanded).then_some(Interaction::Expand)
            }
        }
    }

    /// Freezes the slot the record exits from. Only the first call counts.
    pub fn begin_exit(&mut self, slot: usize) {
        self.exit_slot.get_or_insert(slot);
    }

    /// Index to draw at: the live index, or the frozen slot while exiting.
    #[must_use]
    pub fn visual_index(&self, index: StackIndex) -> usize {
        match index {
            StackIndex::Active(i) => i,
            StackIndex::Exiting => self.exit_slot.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationOptions;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(options: NotificationOptions, now: Instant) -> Controller {
        let record = Notification::from_options(options, ms(5000), now);
        Controller::new(&record, now)
    }

    #[test]
    fn countdown_uses_real_elapsed_time() {
        let start = Instant::now();
        let mut c = controller(NotificationOptions::new().duration_ms(1000), start);

        assert_eq!(c.tick(start + ms(50), false), TickOutcome::Running);
        // A delayed tick still subtracts the whole gap.
        assert_eq!(c.tick(start + ms(600), false), TickOutcome::Running);
        assert_eq!(c.remaining(), ms(400));
        assert_eq!(c.progress(), 40.0);
    }

    #[test]
    fn expires_exactly_once() {
        let start = Instant::now();
        let mut c = controller(NotificationOptions::new().duration_ms(100), start);

        assert_eq!(c.tick(start + ms(100), false), TickOutcome::Expired);
        assert_eq!(c.tick(start + ms(150), false), TickOutcome::Idle);
        assert!(c.is_expired());
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn paused_ticks_do_not_advance_or_fast_forward() {
        let start = Instant::now();
        let mut c = controller(NotificationOptions::new().duration_ms(1000), start);

        c.tick(start + ms(200), false);
        c.pause(PauseSource::Hover, start + ms(200));
        assert_eq!(c.tick(start + ms(5000), false), TickOutcome::Paused);
        assert_eq!(c.remaining(), ms(800));

        c.resume(PauseSource::Hover, start + ms(5000));
        c.tick(start + ms(5050), false);
        assert_eq!(c.remaining(), ms(750));
    }

    #[test]
    fn pause_sources_form_a_single_gate() {
        let start = Instant::now();
        let mut c = controller(NotificationOptions::new().duration_ms(1000), start);

        c.pause(PauseSource::Hover, start);
        c.pause(PauseSource::Focus, start);
        c.resume(PauseSource::Hover, start + ms(100));
        assert!(c.is_paused());
        assert_eq!(c.tick(start + ms(500), false), TickOutcome::Paused);

        c.resume(PauseSource::Focus, start + ms(500));
        assert!(!c.is_paused());
        assert_eq!(c.remaining(), ms(1000));
    }

    #[test]
    fn redundant_pause_and_resume_keep_progress() {
        let start = Instant::now();
        let mut c = controller(NotificationOptions::new().duration_ms(1000), start);
        c.tick(start + ms(300), false);

        c.resume(PauseSource::Hover, start + ms(300));
        let running = c.progress();
        c.pause(PauseSource::Hover, start + ms(300));
        let paused = c.progress();
        c.pause(PauseSource::Hover, start + ms(900));
        c.pause(PauseSource::Hover, start + ms(950));

        assert_eq!(running, paused);
        assert_eq!(c.progress(), paused);
    }

    #[test]
    fn persisted_record_never_expires() {
        let start = Instant::now();
        let mut c = controller(
            NotificationOptions::new().duration_ms(100).persisted(true),
            start,
        );
        assert!(!c.is_timed());
        assert_eq!(c.tick(start + ms(60_000), false), TickOutcome::Idle);
        assert_eq!(c.progress(), 100.0);
    }

    #[test]
    fn exiting_record_stops_counting() {
        let start = Instant::now();
        let mut c = controller(NotificationOptions::new().duration_ms(100), start);
        assert_eq!(c.tick(start + ms(500), true), TickOutcome::Idle);
        assert_eq!(c.remaining(), ms(100));
    }

    #[test]
    fn only_front_of_collapsed_stack_expands() {
        let c = controller(NotificationOptions::new(), Instant::now());
        let front = StackIndex::Active(0);

        assert_eq!(
            c.activate(front, false, Activation::Click),
            Some(Interaction::Expand)
        );
        assert_eq!(
            c.activate(front, false, Activation::Space),
            Some(Interaction::Expand)
        );
        assert_eq!(c.activate(front, true, Activation::Enter), None);
        assert_eq!(
            c.activate(StackIndex::Active(1), false, Activation::Click),
            None
        );
    }

    #[test]
    fn close_control_never_expands() {
        let c = controller(NotificationOptions::new(), Instant::now());
        assert_eq!(
            c.activate(StackIndex::Active(0), false, Activation::CloseControl),
            Some(Interaction::Dismiss)
        );
        assert_eq!(
            c.activate(StackIndex::Exiting, false, Activation::CloseControl),
            None
        );
    }

    #[test]
    fn exit_slot_is_frozen_once() {
        let mut c = controller(NotificationOptions::new(), Instant::now());
        c.begin_exit(2);
        c.begin_exit(0);
        assert_eq!(c.visual_index(StackIndex::Exiting), 2);
        assert_eq!(c.visual_index(StackIndex::Active(1)), 1);
    }
}
