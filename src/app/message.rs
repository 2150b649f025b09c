// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::notifications::{self, Activation, Variant};
use iced::Size;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Notification(notifications::Message),
    /// Post a sample notification of the given variant.
    Post(Variant),
    /// Post a sample notification that never expires on its own.
    PostPersisted,
    ClearAll,
    TogglePopover,
    CyclePlacement,
    CycleAnchor,
    /// Pointer pressed somewhere outside the toast stack.
    BackgroundPressed,
    Escape,
    /// Enter or Space pressed with nothing else holding focus.
    ActivateFront(Activation),
    /// Tab moves keyboard focus onto the front toast.
    FocusFront,
    WindowResized(Size),
    Scrolled,
    Tick(Instant), // Periodic tick for countdowns and popover recompute
}

/// Runtime flags passed from the CLI to the application.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional config directory override.
    pub config_dir: Option<String>,
    /// Overrides the configured default notification duration.
    pub duration_ms: Option<u64>,
}
