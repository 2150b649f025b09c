// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Store` is the single source of truth for which notifications exist
//! and in what order. It assigns ids, drives every per-record timer through a
//! [`TimerArena`], and arbitrates expansion of the stack. No operation fails:
//! unknown ids and late timers are ignored.

use super::announce::{LiveRegions, Politeness};
use super::controller::{Activation, Controller, Interaction, PauseSource, TickOutcome};
use super::notification::{Notification, NotificationId, NotificationOptions};
use super::settings::NotificationSettings;
use super::stack::{stack_indices, Slot, StackIndex};
use crate::clock::{Clock, SystemClock};
use crate::timers::TimerArena;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Messages for notification state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Click or key press on a notification.
    Activate(NotificationId, Activation),
    /// Pointer entered (`true`) or left (`false`) a notification.
    Hover(NotificationId, bool),
    /// Keyboard focus entered (`true`) or left (`false`) a notification.
    Focus(NotificationId, bool),
    ToggleExpanded,
    /// Click landed outside the stack region.
    ClickOutside,
    Escape,
    /// Tick for driving countdowns and removals.
    Tick,
}

/// Change notification emitted to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(NotificationId),
    Exiting(NotificationId),
    Removed(NotificationId),
    ExpandedChanged(bool),
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerKey {
    Countdown(NotificationId),
    Removal(NotificationId),
}

/// Read projection of one record, as the view draws it.
#[derive(Debug, Clone, Copy)]
pub struct StackEntry<'a> {
    pub notification: &'a Notification,
    pub index: StackIndex,
    pub slot: Slot,
    pub progress: f32,
    pub paused: bool,
}

/// Owns the ordered notification list and all of its timers.
pub struct Store<C: Clock = SystemClock> {
    clock: C,
    settings: NotificationSettings,
    /// Insertion order, oldest first.
    records: Vec<Notification>,
    controllers: HashMap<NotificationId, Controller>,
    timers: TimerArena<TimerKey>,
    expanded: bool,
    live: LiveRegions,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<C: Clock> fmt::Debug for Store<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("records", &self.records.len())
            .field("expanded", &self.expanded)
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(NotificationSettings::default())
    }
}

impl Store {
    /// Creates a store driven by the system clock.
    #[must_use]
    pub fn new(settings: NotificationSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Store<C> {
    /// Creates a store driven by a custom clock.
    pub fn with_clock(settings: NotificationSettings, clock: C) -> Self {
        Self {
            clock,
            settings,
            records: Vec::new(),
            controllers: HashMap::new(),
            timers: TimerArena::new(),
            expanded: false,
            live: LiveRegions::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a notification and returns its id.
    ///
    /// The record is appended newest-last. Timed records start counting down
    /// immediately.
    pub fn add(&mut self, options: NotificationOptions) -> NotificationId {
        let now = self.clock.now();
        let record = Notification::from_options(options, self.settings.default_duration, now);
        let id = record.id();
        let controller = Controller::new(&record, now);

        if controller.is_timed() {
            let period = self.settings.tick_interval.as_duration();
            self.timers
                .set_interval(TimerKey::Countdown(id), now + period, period);
        }

        let politeness = if record.variant().is_urgent() {
            Politeness::Assertive
        } else {
            Politeness::Polite
        };
        self.live.announce(record.announcement(), politeness);

        tracing::debug!(%id, variant = ?record.variant(), timed = controller.is_timed(), "notification added");
        self.records.push(record);
        self.controllers.insert(id, controller);
        self.emit(StoreEvent::Added(id));
        id
    }

    /// Starts dismissing a notification.
    ///
    /// The record is marked exiting right away and physically removed once
    /// the grace window elapses. Unknown or already exiting ids are ignored.
    pub fn remove(&mut self, id: NotificationId) {
        let slot = match self.stack_index(id) {
            Some(StackIndex::Active(slot)) => slot,
            Some(StackIndex::Exiting) => {
                tracing::trace!(%id, "remove ignored: already exiting");
                return;
            }
            None => {
                tracing::trace!(%id, "remove ignored: unknown id");
                return;
            }
        };

        if let Some(record) = self.records.iter_mut().find(|n| n.id() == id) {
            record.mark_exiting();
        }
        if let Some(controller) = self.controllers.get_mut(&id) {
            controller.begin_exit(slot);
        }

        let removal_at = self.clock.now() + self.settings.exit_grace.as_duration();
        self.timers.clear_key(TimerKey::Countdown(id));
        self.timers.set_timeout(TimerKey::Removal(id), removal_at);

        tracing::debug!(%id, slot, "notification exiting");
        self.emit(StoreEvent::Exiting(id));
    }

    /// Dismisses every active notification.
    pub fn clear(&mut self) {
        let active: Vec<NotificationId> = self
            .records
            .iter()
            .filter(|n| !n.is_exiting())
            .map(Notification::id)
            .collect();
        for id in active {
            self.remove(id);
        }
    }

    /// Processes every due timer: countdown ticks and grace-window removals.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        for fired in self.timers.due(now) {
            match fired.key {
                TimerKey::Countdown(id) => self.tick_countdown(id, now),
                TimerKey::Removal(id) => self.finish_removal(id),
            }
        }
    }

    fn tick_countdown(&mut self, id: NotificationId, now: Instant) {
        let exiting = self.get(id).is_none_or(Notification::is_exiting);
        let outcome = self
            .controllers
            .get_mut(&id)
            .map(|controller| controller.tick(now, exiting));

        if outcome == Some(TickOutcome::Expired) {
            tracing::debug!(%id, "notification expired");
            self.remove(id);
        }
    }

    fn finish_removal(&mut self, id: NotificationId) {
        let before = self.records.len();
        self.records.retain(|n| n.id() != id);
        self.controllers.remove(&id);
        self.timers.clear_key(TimerKey::Countdown(id));
        self.timers.clear_key(TimerKey::Removal(id));

        if self.records.len() == before {
            return;
        }

        tracing::debug!(%id, remaining = self.records.len(), "notification removed");
        self.emit(StoreEvent::Removed(id));

        if self.records.is_empty() {
            self.set_expanded(false);
        }
    }

    /// Engages a pause source on a notification.
    pub fn pause(&mut self, id: NotificationId, source: PauseSource) {
        if self.get(id).is_none_or(Notification::is_exiting) {
            return;
        }
        let now = self.clock.now();
        if let Some(controller) = self.controllers.get_mut(&id) {
            controller.pause(source, now);
        }
    }

    /// Releases a pause source on a notification.
    pub fn resume(&mut self, id: NotificationId, source: PauseSource) {
        if self.get(id).is_none_or(Notification::is_exiting) {
            return;
        }
        let now = self.clock.now();
        if let Some(controller) = self.controllers.get_mut(&id) {
            controller.resume(source, now);
        }
    }

    /// Applies a gesture to a notification. Returns whether it had an effect.
    pub fn activate(&mut self, id: NotificationId, activation: Activation) -> bool {
        let Some(index) = self.stack_index(id) else {
            return false;
        };
        let interaction = self
            .controllers
            .get(&id)
            .and_then(|controller| controller.activate(index, self.expanded, activation));

        match interaction {
            Some(Interaction::Expand) => self.expand(),
            Some(Interaction::Dismiss) => {
                self.remove(id);
                true
            }
            None => false,
        }
    }

    /// Flips the display mode and returns the new state.
    ///
    /// An empty stack cannot be expanded.
    pub fn toggle_expanded(&mut self) -> bool {
        if self.expanded {
            self.collapse();
        } else {
            self.expand();
        }
        self.expanded
    }

    /// Expands the stack. Returns `true` if the display mode changed.
    ///
    /// Refused while no active record exists.
    pub fn expand(&mut self) -> bool {
        if self.expanded || !self.has_active() {
            return false;
        }
        self.set_expanded(true);
        true
    }

    /// Collapses the stack. Returns `true` if it was expanded.
    pub fn collapse(&mut self) -> bool {
        let was_expanded = self.expanded;
        self.set_expanded(false);
        was_expanded
    }

    /// Escape collapses an expanded stack.
    pub fn handle_escape(&mut self) -> bool {
        self.collapse()
    }

    /// A click outside the stack region collapses an expanded stack.
    pub fn click_outside(&mut self) -> bool {
        self.collapse()
    }

    fn set_expanded(&mut self, expanded: bool) {
        if self.expanded != expanded {
            self.expanded = expanded;
            tracing::debug!(expanded, "notification stack display mode changed");
            self.emit(StoreEvent::ExpandedChanged(expanded));
        }
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.remove(*id),
            Message::Activate(id, activation) => {
                self.activate(*id, *activation);
            }
            Message::Hover(id, true) => self.pause(*id, PauseSource::Hover),
            Message::Hover(id, false) => self.resume(*id, PauseSource::Hover),
            Message::Focus(id, true) => self.pause(*id, PauseSource::Focus),
            Message::Focus(id, false) => self.resume(*id, PauseSource::Focus),
            Message::ToggleExpanded => {
                self.toggle_expanded();
            }
            Message::ClickOutside => {
                self.click_outside();
            }
            Message::Escape => {
                self.handle_escape();
            }
            Message::Tick => self.tick(),
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // =========================================================================
    // Read projections
    // =========================================================================

    /// Records in insertion order (oldest first).
    #[must_use]
    pub fn records(&self) -> &[Notification] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.records.iter().find(|n| n.id() == id)
    }

    /// Derived stack index, recomputed from the current list.
    #[must_use]
    pub fn stack_index(&self, id: NotificationId) -> Option<StackIndex> {
        stack_indices(&self.records)
            .into_iter()
            .find(|(record_id, _)| *record_id == id)
            .map(|(_, index)| index)
    }

    /// Index to draw at, keeping exiting records on their last slot.
    #[must_use]
    pub fn visual_index(&self, id: NotificationId) -> Option<usize> {
        let index = self.stack_index(id)?;
        self.controllers
            .get(&id)
            .map(|controller| controller.visual_index(index))
    }

    #[must_use]
    pub fn slot(&self, id: NotificationId) -> Option<Slot> {
        let index = self.stack_index(id)?;
        let visual = self.visual_index(id)?;
        Some(Slot::resolve(
            index,
            visual,
            self.expanded,
            self.settings.max_visible.value(),
        ))
    }

    /// Remaining time as a percentage in `[0, 100]`.
    #[must_use]
    pub fn progress(&self, id: NotificationId) -> Option<f32> {
        self.controllers.get(&id).map(Controller::progress)
    }

    #[must_use]
    pub fn is_paused(&self, id: NotificationId) -> bool {
        self.controllers.get(&id).is_some_and(Controller::is_paused)
    }

    /// Snapshot of the stack for rendering, front record first.
    #[must_use]
    pub fn stack(&self) -> Vec<StackEntry<'_>> {
        let max_visible = self.settings.max_visible.value();
        self.records
            .iter()
            .zip(stack_indices(&self.records))
            .rev()
            .filter_map(|(notification, (id, index))| {
                let controller = self.controllers.get(&id)?;
                let visual = controller.visual_index(index);
                Some(StackEntry {
                    notification,
                    index,
                    slot: Slot::resolve(index, visual, self.expanded, max_visible),
                    progress: controller.progress(),
                    paused: controller.is_paused(),
                })
            })
            .collect()
    }

    /// Id of the front record, if any.
    #[must_use]
    pub fn front(&self) -> Option<NotificationId> {
        self.records
            .iter()
            .rev()
            .find(|n| !n.is_exiting())
            .map(Notification::id)
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub fn live_regions(&self) -> &LiveRegions {
        &self.live
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn has_active(&self) -> bool {
        self.records.iter().any(|n| !n.is_exiting())
    }

    /// Whether any countdown or removal is still scheduled.
    #[must_use]
    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Earliest scheduled timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::notifications::Variant;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> (Store<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (
            Store::with_clock(NotificationSettings::default(), clock.clone()),
            clock,
        )
    }

    fn run_for(store: &mut Store<ManualClock>, clock: &ManualClock, millis: u64) {
        for _ in 0..millis / 50 {
            clock.advance_ms(50);
            store.tick();
        }
    }

    #[test]
    fn new_store_is_empty() {
        let (store, _) = store();
        assert!(store.is_empty());
        assert!(!store.is_expanded());
        assert!(!store.has_timers());
    }

    #[test]
    fn add_appends_newest_last() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new().title("A"));
        let b = store.add(NotificationOptions::new().title("B"));

        let ids: Vec<_> = store.records().iter().map(Notification::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(store.front(), Some(b));
    }

    #[test]
    fn remove_unknown_id_is_ignored() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        store.remove(crate::notifications::NotificationId::new());
        assert_eq!(store.len(), 1);
        assert!(!store.get(a).unwrap().is_exiting());
    }

    #[test]
    fn exiting_record_keeps_its_slot() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        let b = store.add(NotificationOptions::new());
        let c = store.add(NotificationOptions::new());

        store.remove(b);
        assert_eq!(store.stack_index(b), Some(StackIndex::Exiting));
        assert_eq!(store.visual_index(b), Some(1));
        assert_eq!(store.stack_index(a), Some(StackIndex::Active(1)));
        assert_eq!(store.stack_index(c), Some(StackIndex::Active(0)));
    }

    #[test]
    fn stack_snapshot_is_front_first() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        let b = store.add(NotificationOptions::new());

        let ids: Vec<_> = store.stack().iter().map(|e| e.notification.id()).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn only_front_record_expands_stack() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        let b = store.add(NotificationOptions::new());

        assert!(!store.activate(a, Activation::Click));
        assert!(!store.is_expanded());
        assert!(store.activate(b, Activation::Enter));
        assert!(store.is_expanded());
        // Already expanded: further clicks do nothing.
        assert!(!store.activate(b, Activation::Click));
    }

    #[test]
    fn close_control_dismisses_without_expanding() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        assert!(store.activate(a, Activation::CloseControl));
        assert!(!store.is_expanded());
        assert!(store.get(a).unwrap().is_exiting());
    }

    #[test]
    fn escape_and_click_outside_collapse() {
        let (mut store, _) = store();
        store.add(NotificationOptions::new());

        assert!(store.toggle_expanded());
        assert!(store.handle_escape());
        assert!(!store.is_expanded());

        store.toggle_expanded();
        assert!(store.click_outside());
        assert!(!store.click_outside());
    }

    #[test]
    fn empty_stack_cannot_expand() {
        let (mut store, _) = store();
        assert!(!store.toggle_expanded());
        assert!(!store.expand());
    }

    #[test]
    fn expand_reports_changes_only() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        assert!(store.expand());
        assert!(!store.expand());

        store.remove(a);
        store.collapse();
        // Only an exiting record is left.
        assert!(!store.expand());
    }

    #[test]
    fn stack_collapses_when_list_empties() {
        let (mut store, clock) = store();
        let a = store.add(NotificationOptions::new().persisted(true));
        store.toggle_expanded();

        store.remove(a);
        assert!(store.is_expanded());
        run_for(&mut store, &clock, 400);
        assert!(store.is_empty());
        assert!(!store.is_expanded());
    }

    #[test]
    fn collapsed_stack_truncates_beyond_depth() {
        let (mut store, _) = store();
        let ids: Vec<_> = (0..4)
            .map(|_| store.add(NotificationOptions::new()))
            .collect();

        let oldest = store.slot(ids[0]).unwrap();
        assert!(!oldest.visible);
        assert!(!oldest.interactive);
        assert!(store.slot(ids[3]).unwrap().interactive);

        store.toggle_expanded();
        assert!(store.slot(ids[0]).unwrap().visible);
    }

    #[test]
    fn pause_on_exiting_record_is_ignored() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());
        store.remove(a);
        store.pause(a, PauseSource::Hover);
        assert!(!store.is_paused(a));
    }

    #[test]
    fn clear_dismisses_everything() {
        let (mut store, clock) = store();
        store.add(NotificationOptions::new());
        store.add(NotificationOptions::new().persisted(true));

        store.clear();
        assert!(store.records().iter().all(Notification::is_exiting));
        run_for(&mut store, &clock, 400);
        assert!(store.is_empty());
        assert!(!store.has_timers());
    }

    #[test]
    fn listeners_observe_lifecycle() {
        let (mut store, clock) = store();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let listener = store.subscribe(move |event| sink.borrow_mut().push(*event));

        let a = store.add(NotificationOptions::new().persisted(true));
        store.remove(a);
        run_for(&mut store, &clock, 400);
        store.unsubscribe(listener);
        store.add(NotificationOptions::new());

        assert_eq!(
            *events.borrow(),
            vec![
                StoreEvent::Added(a),
                StoreEvent::Exiting(a),
                StoreEvent::Removed(a)
            ]
        );
    }

    #[test]
    fn urgent_variants_use_assertive_channel() {
        let (mut store, _) = store();
        store.add(NotificationOptions::new().title("Saved"));
        store.add(
            NotificationOptions::new()
                .title("Upload failed")
                .variant(Variant::Error),
        );

        assert_eq!(store.live_regions().polite(), Some("Saved"));
        assert_eq!(store.live_regions().assertive(), Some("Upload failed"));
    }

    #[test]
    fn handle_message_routes_hover() {
        let (mut store, _) = store();
        let a = store.add(NotificationOptions::new());

        store.handle_message(&Message::Hover(a, true));
        assert!(store.is_paused(a));
        store.handle_message(&Message::Hover(a, false));
        assert!(!store.is_paused(a));
    }
}
