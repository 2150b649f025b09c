// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record, its identifier, the
//! `Variant` enum, and the `NotificationOptions` builder accepted by
//! [`Store::add`](super::Store::add).

use crate::ui::design_tokens::palette;
use iced::Color;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Unique identifier for a notification.
///
/// Combines the wall-clock millisecond at creation with a process-wide
/// sequence number, so ids created within the same millisecond still differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId {
    millis: u64,
    seq: u64,
}

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();
        Self {
            millis,
            seq: COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}-{:x}", self.millis, self.seq)
    }
}

/// Visual variant. Only affects color and the announcement channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Neutral/accent message (blue).
    #[default]
    Info,
    /// Operation completed successfully (green).
    Success,
    /// Something needs attention (orange).
    Warning,
    /// Something failed (red).
    Error,
}

impl Variant {
    /// Returns the accent color for this variant.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Variant::Info => palette::INFO_500,
            Variant::Success => palette::SUCCESS_500,
            Variant::Warning => palette::WARNING_500,
            Variant::Error => palette::ERROR_500,
        }
    }

    /// Whether screen readers should be interrupted for this variant.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        matches!(self, Variant::Warning | Variant::Error)
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification variant: {0}")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" | "accent" => Ok(Variant::Info),
            "success" => Ok(Variant::Success),
            "warning" => Ok(Variant::Warning),
            "error" => Ok(Variant::Error),
            other => Err(ParseVariantError(other.to_string())),
        }
    }
}

/// Options accepted when adding a notification.
///
/// Unset fields are filled from the store's
/// [`NotificationSettings`](super::NotificationSettings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Custom body text that replaces title and description.
    pub body: Option<String>,
    pub variant: Option<Variant>,
    pub duration: Option<Duration>,
    pub persisted: Option<bool>,
}

impl NotificationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the auto-dismiss duration. A zero duration is ignored.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = (!duration.is_zero()).then_some(duration);
        self
    }

    #[must_use]
    pub fn duration_ms(self, millis: u64) -> Self {
        self.duration(Duration::from_millis(millis))
    }

    /// Keeps the notification until it is dismissed explicitly.
    #[must_use]
    pub fn persisted(mut self, persisted: bool) -> Self {
        self.persisted = Some(persisted);
        self
    }
}

/// A notification record owned by the store.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    title: Option<String>,
    description: Option<String>,
    body: Option<String>,
    variant: Variant,
    duration: Option<Duration>,
    persisted: bool,
    created_at: Instant,
    exiting: bool,
}

impl Notification {
    pub(crate) fn from_options(
        options: NotificationOptions,
        default_duration: Duration,
        created_at: Instant,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            title: options.title,
            description: options.description,
            body: options.body,
            variant: options.variant.unwrap_or_default(),
            duration: options.duration.or(Some(default_duration)),
            persisted: options.persisted.unwrap_or(false),
            created_at,
            exiting: false,
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Configured duration, even when `persisted` overrides it.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// True while the exit transition plays. Exiting records are inert.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Returns the effective auto-dismiss delay, or `None` when the record
    /// never expires on its own.
    #[must_use]
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        if self.persisted {
            None
        } else {
            self.duration
        }
    }

    /// Text announced to assistive technology.
    #[must_use]
    pub fn announcement(&self) -> String {
        if let Some(body) = &self.body {
            return body.clone();
        }
        match (&self.title, &self.description) {
            (Some(title), Some(description)) => format!("{title}: {description}"),
            (Some(text), None) | (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        }
    }

    /// Marks the record as exiting. Returns `false` if it already was.
    pub(crate) fn mark_exiting(&mut self) -> bool {
        !std::mem::replace(&mut self.exiting, true)
    }
}
