// SPDX-License-Identifier: MPL-2.0
//! Keeps a popover's position live while it is open.
//!
//! The tracker recomputes on open, on placement changes, after a debounced
//! window resize and at most once per frame while scrolling. It remembers
//! what it last applied and writes only the properties that changed.

use super::compute::{compute, Position};
use super::placement::Placement;
use crate::config::{
    PopoverConfig, DEFAULT_POPOVER_SPACING, DEFAULT_RESIZE_DEBOUNCE_MS,
    DEFAULT_SCROLL_THROTTLE_MS,
};
use crate::timers::TimerArena;
use iced::{Rectangle, Size};
use std::time::{Duration, Instant};

/// Read access to the measured layout.
pub trait LayoutSource {
    /// Trigger bounds in viewport coordinates, or `None` if not mounted.
    fn trigger_bounds(&self) -> Option<Rectangle>;
    /// Popover size, or `None` if not mounted.
    fn popover_size(&self) -> Option<Size>;
    fn viewport(&self) -> Size;
}

/// A single property update for the popover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionWrite {
    Left(f32),
    Top(f32),
    Placement(Placement),
}

/// Receives position updates.
pub trait PositionSink {
    fn write(&mut self, write: PositionWrite);
}

impl PositionSink for Vec<PositionWrite> {
    fn write(&mut self, write: PositionWrite) {
        self.push(write);
    }
}

/// Scheduling knobs for the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    pub spacing: f32,
    pub resize_debounce: Duration,
    pub scroll_throttle: Duration,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_POPOVER_SPACING,
            resize_debounce: Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS),
            scroll_throttle: Duration::from_millis(DEFAULT_SCROLL_THROTTLE_MS),
        }
    }
}

impl From<&PopoverConfig> for TrackerOptions {
    fn from(config: &PopoverConfig) -> Self {
        Self {
            spacing: config.spacing.unwrap_or(DEFAULT_POPOVER_SPACING).max(0.0),
            resize_debounce: Duration::from_millis(
                config
                    .resize_debounce_ms
                    .unwrap_or(DEFAULT_RESIZE_DEBOUNCE_MS),
            ),
            scroll_throttle: Duration::from_millis(
                config
                    .scroll_throttle_ms
                    .unwrap_or(DEFAULT_SCROLL_THROTTLE_MS),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Recompute {
    Resize,
    Scroll,
}

/// Position subscription for one popover.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    options: TrackerOptions,
    placement: Placement,
    open: bool,
    applied: Option<Position>,
    timers: TimerArena<Recompute>,
    last_scroll_run: Option<Instant>,
}

impl PositionTracker {
    #[must_use]
    pub fn new(options: TrackerOptions, placement: Placement) -> Self {
        Self {
            options,
            placement,
            open: false,
            applied: None,
            timers: TimerArena::new(),
            last_scroll_run: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Last position written to the sink.
    #[must_use]
    pub fn applied(&self) -> Option<Position> {
        self.applied
    }

    /// Opens or closes the popover.
    ///
    /// Opening positions immediately. Closing cancels pending work.
    pub fn set_open(
        &mut self,
        open: bool,
        layout: &impl LayoutSource,
        sink: &mut impl PositionSink,
    ) -> Option<Position> {
        if open {
            self.open = true;
            self.recompute(layout, sink)
        } else {
            self.open = false;
            self.cleanup();
            None
        }
    }

    /// Changes the preferred placement, repositioning while open.
    pub fn set_placement(
        &mut self,
        placement: Placement,
        layout: &impl LayoutSource,
        sink: &mut impl PositionSink,
    ) -> Option<Position> {
        if placement == self.placement {
            return None;
        }
        self.placement = placement;
        self.recompute(layout, sink)
    }

    /// Changes the spacing, repositioning while open.
    pub fn set_spacing(
        &mut self,
        spacing: f32,
        layout: &impl LayoutSource,
        sink: &mut impl PositionSink,
    ) -> Option<Position> {
        self.options.spacing = spacing.max(0.0);
        self.recompute(layout, sink)
    }

    /// Schedules a recompute once resizing settles.
    pub fn on_resize(&mut self, now: Instant) {
        if !self.open {
            return;
        }
        self.timers.clear_key(Recompute::Resize);
        self.timers
            .set_timeout(Recompute::Resize, now + self.options.resize_debounce);
    }

    /// Recomputes at most once per throttle window while scrolling.
    ///
    /// A scroll inside the window schedules one trailing recompute so the
    /// final scroll position is never missed.
    pub fn on_scroll(
        &mut self,
        now: Instant,
        layout: &impl LayoutSource,
        sink: &mut impl PositionSink,
    ) -> Option<Position> {
        if !self.open {
            return None;
        }
        match self.last_scroll_run {
            Some(last) if now.saturating_duration_since(last) < self.options.scroll_throttle => {
                if !self.timers.contains_key(Recompute::Scroll) {
                    self.timers
                        .set_timeout(Recompute::Scroll, last + self.options.scroll_throttle);
                }
                None
            }
            _ => {
                self.last_scroll_run = Some(now);
                self.recompute(layout, sink)
            }
        }
    }

    /// Runs scheduled work that is due. Several due reasons collapse into a
    /// single recompute.
    pub fn poll(
        &mut self,
        now: Instant,
        layout: &impl LayoutSource,
        sink: &mut impl PositionSink,
    ) -> Option<Position> {
        let fired = self.timers.due(now);
        if fired.is_empty() || !self.open {
            return None;
        }
        if fired.iter().any(|f| f.key == Recompute::Scroll) {
            self.last_scroll_run = Some(now);
        }
        self.recompute(layout, sink)
    }

    /// Whether a debounced or throttled recompute is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Computes the position and writes what changed.
    ///
    /// No-op while closed or while either element is unmounted.
    pub fn recompute(
        &mut self,
        layout: &impl LayoutSource,
        sink: &mut impl PositionSink,
    ) -> Option<Position> {
        if !self.open {
            return None;
        }
        let (Some(trigger), Some(size)) = (layout.trigger_bounds(), layout.popover_size()) else {
            tracing::trace!("popover recompute skipped: element not mounted");
            return None;
        };

        let position = compute(
            trigger,
            size,
            layout.viewport(),
            self.placement,
            self.options.spacing,
        );
        let previous = self.applied;

        if previous.map(|p| p.x) != Some(position.x) {
            sink.write(PositionWrite::Left(position.x));
        }
        if previous.map(|p| p.y) != Some(position.y) {
            sink.write(PositionWrite::Top(position.y));
        }
        if previous.map(|p| p.placement) != Some(position.placement) {
            sink.write(PositionWrite::Placement(position.placement));
        }

        if previous != Some(position) {
            tracing::debug!(x = position.x, y = position.y, placement = %position.placement, "popover repositioned");
        }
        self.applied = Some(position);
        Some(position)
    }

    /// Cancels every scheduled recompute and forgets the applied position.
    pub fn cleanup(&mut self) {
        self.timers.clear_all();
        self.applied = None;
        self.last_scroll_run = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popover::{DropdownPlacement, Side, TooltipPlacement};
    use iced::Point;

    struct Layout {
        trigger: Option<Rectangle>,
        popover: Option<Size>,
        viewport: Size,
    }

    impl LayoutSource for Layout {
        fn trigger_bounds(&self) -> Option<Rectangle> {
            self.trigger
        }

        fn popover_size(&self) -> Option<Size> {
            self.popover
        }

        fn viewport(&self) -> Size {
            self.viewport
        }
    }

    fn layout() -> Layout {
        Layout {
            trigger: Some(Rectangle::new(Point::new(100.0, 100.0), Size::new(80.0, 30.0))),
            popover: Some(Size::new(150.0, 100.0)),
            viewport: Size::new(1000.0, 800.0),
        }
    }

    fn tracker() -> PositionTracker {
        PositionTracker::new(
            TrackerOptions::default(),
            DropdownPlacement::BottomStart.into(),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn opening_writes_every_property() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        tracker.set_open(true, &layout(), &mut sink);

        assert_eq!(
            sink,
            vec![
                PositionWrite::Left(100.0),
                PositionWrite::Top(138.0),
                PositionWrite::Placement(DropdownPlacement::BottomStart.into()),
            ]
        );
    }

    #[test]
    fn unchanged_layout_writes_nothing() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        tracker.set_open(true, &layout(), &mut sink);
        sink.clear();

        tracker.recompute(&layout(), &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn only_changed_properties_are_written() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        tracker.set_open(true, &layout(), &mut sink);
        sink.clear();

        let mut moved = layout();
        moved.trigger = Some(Rectangle::new(Point::new(200.0, 100.0), Size::new(80.0, 30.0)));
        tracker.recompute(&moved, &mut sink);
        assert_eq!(sink, vec![PositionWrite::Left(200.0)]);
    }

    #[test]
    fn unmounted_elements_are_a_noop() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        let mut unmounted = layout();
        unmounted.popover = None;

        assert!(tracker.set_open(true, &unmounted, &mut sink).is_none());
        assert!(sink.is_empty());
        assert!(tracker.applied().is_none());
    }

    #[test]
    fn closed_tracker_ignores_events() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        let now = Instant::now();

        tracker.on_resize(now);
        assert!(tracker.on_scroll(now, &layout(), &mut sink).is_none());
        assert!(!tracker.has_pending());
        assert!(sink.is_empty());
    }

    #[test]
    fn resize_is_debounced() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        let start = Instant::now();
        tracker.set_open(true, &layout(), &mut sink);

        tracker.on_resize(start);
        tracker.on_resize(start + ms(60));
        assert!(tracker.poll(start + ms(120), &layout(), &mut sink).is_none());
        assert!(tracker.poll(start + ms(160), &layout(), &mut sink).is_some());
        assert!(!tracker.has_pending());
    }

    #[test]
    fn scroll_is_throttled_with_trailing_run() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        let start = Instant::now();
        tracker.set_open(true, &layout(), &mut sink);

        assert!(tracker.on_scroll(start, &layout(), &mut sink).is_some());
        assert!(tracker.on_scroll(start + ms(5), &layout(), &mut sink).is_none());
        assert!(tracker.on_scroll(start + ms(10), &layout(), &mut sink).is_none());
        assert_eq!(tracker.next_deadline(), Some(start + ms(16)));

        assert!(tracker.poll(start + ms(16), &layout(), &mut sink).is_some());
        assert!(!tracker.has_pending());
    }

    #[test]
    fn closing_cancels_pending_work() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        let start = Instant::now();
        tracker.set_open(true, &layout(), &mut sink);
        tracker.on_resize(start);

        tracker.set_open(false, &layout(), &mut sink);
        assert!(!tracker.has_pending());
        assert!(tracker.applied().is_none());
        assert!(tracker.poll(start + ms(500), &layout(), &mut sink).is_none());
    }

    #[test]
    fn placement_change_repositions() {
        let mut tracker = tracker();
        let mut sink: Vec<PositionWrite> = Vec::new();
        tracker.set_open(true, &layout(), &mut sink);
        sink.clear();

        let tooltip: Placement = TooltipPlacement::centered(Side::Right).into();
        tracker.set_placement(tooltip, &layout(), &mut sink);
        assert!(sink.contains(&PositionWrite::Placement(tooltip)));
        assert!(tracker.set_placement(tooltip, &layout(), &mut sink).is_none());
    }
}
