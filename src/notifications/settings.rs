// SPDX-License-Identifier: MPL-2.0
//! Validated notification tuning values.

use crate::config::{
    NotificationConfig, DEFAULT_EXIT_GRACE_MS, DEFAULT_MAX_VISIBLE,
    DEFAULT_NOTIFICATION_DURATION_MS, DEFAULT_TICK_MS, MAX_EXIT_GRACE_MS, MAX_MAX_VISIBLE,
    MAX_NOTIFICATION_DURATION_MS, MAX_TICK_MS, MIN_EXIT_GRACE_MS, MIN_MAX_VISIBLE,
    MIN_NOTIFICATION_DURATION_MS, MIN_TICK_MS,
};
use std::time::Duration;

/// Number of records shown while the stack is collapsed.
///
/// # Example
///
/// ```
/// use iced_notify::notifications::StackDepth;
///
/// assert_eq!(StackDepth::new(0).value(), 1); // Clamped to min
/// assert_eq!(StackDepth::new(4).value(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackDepth(usize);

impl StackDepth {
    /// Creates a new depth, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for StackDepth {
    fn default() -> Self {
        Self(DEFAULT_MAX_VISIBLE)
    }
}

/// Countdown tick granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInterval(u64);

impl TickInterval {
    /// Creates a tick interval in milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(value: u64) -> Self {
        Self(value.clamp(MIN_TICK_MS, MAX_TICK_MS))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(DEFAULT_TICK_MS)
    }
}

/// Delay between dismissal and physical removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitGrace(u64);

impl ExitGrace {
    /// Creates a grace window in milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(value: u64) -> Self {
        Self(value.clamp(MIN_EXIT_GRACE_MS, MAX_EXIT_GRACE_MS))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for ExitGrace {
    fn default() -> Self {
        Self(DEFAULT_EXIT_GRACE_MS)
    }
}

/// Provider-level defaults applied by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub default_duration: Duration,
    pub max_visible: StackDepth,
    pub exit_grace: ExitGrace,
    pub tick_interval: TickInterval,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
            max_visible: StackDepth::default(),
            exit_grace: ExitGrace::default(),
            tick_interval: TickInterval::default(),
        }
    }
}

impl From<&NotificationConfig> for NotificationSettings {
    fn from(config: &NotificationConfig) -> Self {
        let duration_ms = config
            .default_duration_ms
            .unwrap_or(DEFAULT_NOTIFICATION_DURATION_MS)
            .clamp(MIN_NOTIFICATION_DURATION_MS, MAX_NOTIFICATION_DURATION_MS);
        Self {
            default_duration: Duration::from_millis(duration_ms),
            max_visible: StackDepth::new(config.max_visible.unwrap_or(DEFAULT_MAX_VISIBLE)),
            exit_grace: ExitGrace::from_millis(
                config.exit_grace_ms.unwrap_or(DEFAULT_EXIT_GRACE_MS),
            ),
            tick_interval: TickInterval::from_millis(config.tick_ms.unwrap_or(DEFAULT_TICK_MS)),
        }
    }
}
