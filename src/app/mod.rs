// SPDX-License-Identifier: MPL-2.0
//! Demo application wiring the notification store and popover tracker into
//! an iced window.
//!
//! The `App` owns the shared store, installs it as the notification provider
//! for the UI thread, and translates native events into engine calls.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{
    self, paths, Config, MAX_NOTIFICATION_DURATION_MS, MIN_NOTIFICATION_DURATION_MS,
};
use crate::notifications::provider::{self, Provider, ProviderGuard};
use crate::notifications::{
    NotificationId, NotificationOptions, NotificationSettings, Notifier, PauseSource, Store,
    StoreEvent, Variant,
};
use crate::popover::{
    DropdownPlacement, LayoutSource, Placement, PositionTracker, Side, TooltipPlacement,
    TrackerOptions,
};
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::popover::PopoverFrame;
use iced::{window, Element, Rectangle, Size, Subscription, Task, Theme};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const WINDOW_DEFAULT_WIDTH: f32 = 900.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 650.0;
pub const MIN_WINDOW_WIDTH: f32 = 650.0;
pub const MIN_WINDOW_HEIGHT: f32 = 500.0;

const TRIGGER_WIDTH: f32 = 140.0;
const POPOVER_HEIGHT: f32 = 160.0;

/// Placements cycled through by the demo.
const PLACEMENTS: [Placement; 8] = [
    Placement::Dropdown(DropdownPlacement::BottomStart),
    Placement::Dropdown(DropdownPlacement::BottomEnd),
    Placement::Dropdown(DropdownPlacement::TopStart),
    Placement::Dropdown(DropdownPlacement::TopEnd),
    Placement::Tooltip(TooltipPlacement::centered(Side::Top)),
    Placement::Tooltip(TooltipPlacement::centered(Side::Bottom)),
    Placement::Tooltip(TooltipPlacement::centered(Side::Left)),
    Placement::Tooltip(TooltipPlacement::centered(Side::Right)),
];

/// Where the popover trigger sits in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    fn next(self) -> Self {
        match self {
            Anchor::Center => Anchor::TopRight,
            Anchor::TopRight => Anchor::BottomLeft,
            Anchor::BottomLeft => Anchor::BottomRight,
            Anchor::BottomRight => Anchor::Center,
        }
    }

    /// Trigger bounds for this anchor inside `viewport`.
    fn trigger_bounds(self, viewport: Size) -> Rectangle {
        let size = Size::new(TRIGGER_WIDTH, sizing::BUTTON_HEIGHT);
        let right = (viewport.width - size.width - spacing::LG).max(0.0);
        let bottom = (viewport.height - size.height - spacing::LG).max(0.0);
        let (x, y) = match self {
            Anchor::Center => (
                ((viewport.width - size.width) / 2.0).max(0.0),
                ((viewport.height - size.height) / 2.0).max(0.0),
            ),
            Anchor::TopRight => (right, spacing::LG),
            Anchor::BottomLeft => (spacing::LG, bottom),
            Anchor::BottomRight => (right, bottom),
        };
        Rectangle::new(iced::Point::new(x, y), size)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Anchor::Center => "center",
            Anchor::TopRight => "top right",
            Anchor::BottomLeft => "bottom left",
            Anchor::BottomRight => "bottom right",
        })
    }
}

/// Layout snapshot handed to the popover tracker.
#[derive(Debug, Clone, Copy)]
struct DemoLayout {
    viewport: Size,
    trigger: Rectangle,
}

impl LayoutSource for DemoLayout {
    fn trigger_bounds(&self) -> Option<Rectangle> {
        Some(self.trigger)
    }

    fn popover_size(&self) -> Option<Size> {
        Some(Size::new(sizing::POPOVER_WIDTH, POPOVER_HEIGHT))
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

/// Root iced application state.
pub struct App {
    store: Rc<RefCell<Store>>,
    _provider: ProviderGuard,
    tracker: PositionTracker,
    frame: PopoverFrame,
    placement_index: usize,
    anchor: Anchor,
    /// Window size the trigger is laid out against.
    viewport: Size,
    /// Latest reported window size, applied once resizing settles.
    pending_viewport: Option<Size>,
    /// Toast holding keyboard focus; its countdown is held while focused.
    focused: Option<NotificationId>,
    posted: usize,
    dismissed: Rc<Cell<usize>>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store.borrow())
            .field("popover_open", &self.tracker.is_open())
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 boots through `Fn`, so the flags are cloned per call.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the config and builds the application.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir.clone());
        let (config, config_warning) = config::load();
        let mut app = Self::with_config(&config, &flags);

        if let Some(warning) = config_warning {
            app.notify(
                NotificationOptions::new()
                    .title("Configuration")
                    .description(warning)
                    .variant(Variant::Warning),
            );
        }

        (app, Task::none())
    }

    /// Builds the application from an already loaded config.
    fn with_config(config: &Config, flags: &Flags) -> Self {
        let mut settings = NotificationSettings::from(&config.notifications);
        if let Some(millis) = flags.duration_ms {
            settings.default_duration = Duration::from_millis(
                millis.clamp(MIN_NOTIFICATION_DURATION_MS, MAX_NOTIFICATION_DURATION_MS),
            );
        }

        let store = Rc::new(RefCell::new(Store::new(settings)));
        let dismissed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&dismissed);
        store.borrow_mut().subscribe(move |event| {
            if let StoreEvent::Exiting(_) = event {
                counter.set(counter.get() + 1);
            }
        });

        let provider = Provider::install(Notifier::new(Rc::clone(&store)));
        tracing::info!(?settings, "notification store ready");

        Self {
            store,
            _provider: provider,
            tracker: PositionTracker::new(TrackerOptions::from(&config.popover), PLACEMENTS[0]),
            frame: PopoverFrame::default(),
            placement_index: 0,
            anchor: Anchor::default(),
            viewport: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            pending_viewport: None,
            focused: None,
            posted: 0,
            dismissed,
        }
    }

    fn title(&self) -> String {
        let active = self
            .store
            .borrow()
            .records()
            .iter()
            .filter(|n| !n.is_exiting())
            .count();
        match active {
            0 => "IcedNotify".to_string(),
            n => format!("IcedNotify ({n})"),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let store = self.store.borrow();
        let active = store.has_timers() || self.tracker.is_open() || self.tracker.has_pending();
        let interval = store.settings().tick_interval.as_duration();

        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(active, interval),
        ])
    }

    fn layout(&self) -> DemoLayout {
        DemoLayout {
            viewport: self.viewport,
            trigger: self.anchor.trigger_bounds(self.viewport),
        }
    }

    /// Posts through the installed provider, as nested UI code would.
    fn notify(&mut self, options: NotificationOptions) {
        self.posted += 1;
        provider::use_notifications().add(options);
    }

    fn sample(&self, variant: Variant) -> NotificationOptions {
        let n = self.posted + 1;
        let (title, description) = match variant {
            Variant::Info => ("Sync started", "Uploading 3 files"),
            Variant::Success => ("Image saved", "Exported to Pictures"),
            Variant::Warning => ("Low disk space", "Less than 1 GB left"),
            Variant::Error => ("Upload failed", "The server did not respond"),
        };
        NotificationOptions::new()
            .title(format!("{title} #{n}"))
            .description(description)
            .variant(variant)
    }

    fn close_popover(&mut self) {
        let layout = self.layout();
        self.tracker.set_open(false, &layout, &mut self.frame);
        // Closing drops the debounce timer, so settle the parked size now.
        if let Some(size) = self.pending_viewport.take() {
            self.viewport = size;
        }
    }

    fn release_focus(&mut self) {
        if let Some(id) = self.focused.take() {
            self.store.borrow_mut().resume(id, PauseSource::Focus);
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Notification(notification_message) => {
                self.store.borrow_mut().handle_message(&notification_message);
            }
            Message::Post(variant) => {
                let options = self.sample(variant);
                self.notify(options);
            }
            Message::PostPersisted => {
                self.notify(
                    NotificationOptions::new()
                        .title("Update available")
                        .description("Restart to apply")
                        .persisted(true),
                );
            }
            Message::ClearAll => self.store.borrow_mut().clear(),
            Message::TogglePopover => {
                if self.tracker.is_open() {
                    self.close_popover();
                } else {
                    let layout = self.layout();
                    self.tracker.set_open(true, &layout, &mut self.frame);
                }
            }
            Message::CyclePlacement => {
                self.placement_index = (self.placement_index + 1) % PLACEMENTS.len();
                let layout = self.layout();
                self.tracker.set_placement(
                    PLACEMENTS[self.placement_index],
                    &layout,
                    &mut self.frame,
                );
            }
            Message::CycleAnchor => {
                self.anchor = self.anchor.next();
                let layout = self.layout();
                self.tracker.recompute(&layout, &mut self.frame);
            }
            Message::BackgroundPressed => {
                self.release_focus();
                self.store.borrow_mut().click_outside();
                if self.tracker.is_open() {
                    self.close_popover();
                }
            }
            Message::Escape => {
                if self.tracker.is_open() {
                    self.close_popover();
                } else {
                    self.release_focus();
                    self.store.borrow_mut().handle_escape();
                }
            }
            Message::ActivateFront(activation) => {
                let mut store = self.store.borrow_mut();
                if let Some(front) = store.front() {
                    store.activate(front, activation);
                }
            }
            Message::FocusFront => {
                let front = self.store.borrow().front();
                if front != self.focused {
                    self.release_focus();
                    if let Some(id) = front {
                        self.store.borrow_mut().pause(id, PauseSource::Focus);
                    }
                    self.focused = front;
                }
            }
            Message::WindowResized(size) => {
                if self.tracker.is_open() {
                    self.pending_viewport = Some(size);
                    self.tracker.on_resize(Instant::now());
                } else {
                    self.viewport = size;
                }
            }
            Message::Scrolled => {
                let layout = self.layout();
                self.tracker
                    .on_scroll(Instant::now(), &layout, &mut self.frame);
            }
            Message::Tick(now) => {
                self.store.borrow_mut().tick();

                let settled = self
                    .tracker
                    .next_deadline()
                    .is_none_or(|deadline| deadline <= now);
                if settled {
                    if let Some(size) = self.pending_viewport.take() {
                        self.viewport = size;
                    }
                }
                let layout = self.layout();
                self.tracker.poll(now, &layout, &mut self.frame);
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let store = self.store.borrow();
        view::view(view::ViewContext {
            store: &*store,
            popover_open: self.tracker.is_open(),
            frame: &self.frame,
            placement: self.tracker.placement(),
            anchor: self.anchor,
            trigger: self.anchor.trigger_bounds(self.viewport),
        })
    }

    /// Number of notifications that started exiting, by any route.
    #[must_use]
    pub fn dismissed(&self) -> usize {
        self.dismissed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Activation;

    fn app() -> App {
        App::with_config(&Config::default(), &Flags::default())
    }

    #[test]
    fn posting_goes_through_the_provider() {
        let mut app = app();
        let _ = app.update(Message::Post(Variant::Success));
        let _ = app.update(Message::PostPersisted);

        let store = app.store.borrow();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].variant(), Variant::Success);
        assert!(store.records()[1].is_persisted());
    }

    #[test]
    fn duration_flag_overrides_config() {
        let flags = Flags {
            duration_ms: Some(1_000),
            ..Flags::default()
        };
        let app = App::with_config(&Config::default(), &flags);
        assert_eq!(
            app.store.borrow().settings().default_duration,
            Duration::from_millis(1_000)
        );
    }

    #[test]
    fn enter_expands_the_front_record() {
        let mut app = app();
        let _ = app.update(Message::Post(Variant::Info));
        let _ = app.update(Message::ActivateFront(Activation::Enter));
        assert!(app.store.borrow().is_expanded());

        let _ = app.update(Message::BackgroundPressed);
        assert!(!app.store.borrow().is_expanded());
    }

    #[test]
    fn space_expands_the_front_record() {
        let mut app = app();
        let _ = app.update(Message::Post(Variant::Warning));
        let _ = app.update(Message::ActivateFront(Activation::Space));
        assert!(app.store.borrow().is_expanded());
    }

    #[test]
    fn keyboard_focus_holds_the_countdown() {
        let mut app = app();
        let _ = app.update(Message::Post(Variant::Info));
        let id = app.store.borrow().front().expect("posted record");

        let _ = app.update(Message::FocusFront);
        assert!(app.store.borrow().is_paused(id));

        let _ = app.update(Message::Escape);
        assert!(!app.store.borrow().is_paused(id));
        assert_eq!(app.focused, None);
    }

    #[test]
    fn escape_closes_popover_before_collapsing() {
        let mut app = app();
        let _ = app.update(Message::Post(Variant::Info));
        let _ = app.update(Message::ActivateFront(Activation::Enter));
        let _ = app.update(Message::TogglePopover);

        let _ = app.update(Message::Escape);
        assert!(!app.tracker.is_open());
        assert!(app.store.borrow().is_expanded());

        let _ = app.update(Message::Escape);
        assert!(!app.store.borrow().is_expanded());
    }

    #[test]
    fn opening_popover_positions_it() {
        let mut app = app();
        let _ = app.update(Message::TogglePopover);

        let trigger = Anchor::Center.trigger_bounds(app.viewport);
        assert_eq!(app.frame.writes, 3);
        assert_eq!(app.frame.left, trigger.x);
        assert_eq!(app.frame.top, trigger.y + trigger.height + spacing::XS);
    }

    #[test]
    fn resize_repositions_after_debounce() {
        let mut app = app();
        let _ = app.update(Message::TogglePopover);
        let before = app.frame;

        let _ = app.update(Message::WindowResized(Size::new(1200.0, 900.0)));
        assert_eq!(app.frame, before);

        let _ = app.update(Message::Tick(Instant::now() + Duration::from_millis(200)));
        assert_ne!(app.frame.left, before.left);
        assert_eq!(app.viewport, Size::new(1200.0, 900.0));
    }

    #[test]
    fn resize_during_open_popover_survives_close() {
        let mut app = app();
        let resized = Size::new(1400.0, 1000.0);
        let _ = app.update(Message::TogglePopover);
        let _ = app.update(Message::WindowResized(resized));
        let _ = app.update(Message::TogglePopover);
        let _ = app.update(Message::TogglePopover);

        assert_eq!(app.viewport, resized);
        let trigger = Anchor::Center.trigger_bounds(resized);
        assert_eq!(app.frame.left, trigger.x);
        assert_eq!(app.frame.top, trigger.y + trigger.height + spacing::XS);
    }

    #[test]
    fn dismissals_are_counted() {
        let mut app = app();
        let _ = app.update(Message::Post(Variant::Error));
        let _ = app.update(Message::ClearAll);
        assert_eq!(app.dismissed(), 1);
    }

    #[test]
    fn anchors_stay_inside_viewport() {
        let viewport = Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT);
        let mut anchor = Anchor::default();
        for _ in 0..4 {
            let bounds = anchor.trigger_bounds(viewport);
            assert!(bounds.x >= 0.0 && bounds.x + bounds.width <= viewport.width);
            assert!(bounds.y >= 0.0 && bounds.y + bounds.height <= viewport.height);
            anchor = anchor.next();
        }
        assert_eq!(anchor, Anchor::default());
    }
}
