// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Auto-dismiss duration, stack depth, exit grace, tick rate
//! - **Popover**: Edge spacing and recompute scheduling

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default auto-dismiss duration for notifications (in milliseconds).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5000;

/// Minimum auto-dismiss duration (in milliseconds).
pub const MIN_NOTIFICATION_DURATION_MS: u64 = 500;

/// Maximum auto-dismiss duration (in milliseconds).
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 60_000;

/// Default number of stacked notifications shown while collapsed.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Minimum collapsed stack depth.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Maximum collapsed stack depth.
pub const MAX_MAX_VISIBLE: usize = 10;

/// Delay between dismissal and physical removal, matching the exit transition.
pub const DEFAULT_EXIT_GRACE_MS: u64 = 350;

/// Minimum grace window; shorter values cut the exit transition off.
pub const MIN_EXIT_GRACE_MS: u64 = 100;

/// Maximum grace window.
pub const MAX_EXIT_GRACE_MS: u64 = 2_000;

/// Countdown tick granularity (in milliseconds).
pub const DEFAULT_TICK_MS: u64 = 50;

/// Minimum countdown tick granularity.
pub const MIN_TICK_MS: u64 = 10;

/// Maximum countdown tick granularity.
pub const MAX_TICK_MS: u64 = 250;

// ==========================================================================
// Popover Defaults
// ==========================================================================

/// Gap between trigger and popover, and minimum distance from viewport edges.
pub const DEFAULT_POPOVER_SPACING: f32 = 8.0;

/// Debounce delay for window resize recomputation (in milliseconds).
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Throttle window for scroll recomputation (in milliseconds, ~one frame).
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 16;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Duration validation
    assert!(MIN_NOTIFICATION_DURATION_MS > 0);
    assert!(DEFAULT_NOTIFICATION_DURATION_MS >= MIN_NOTIFICATION_DURATION_MS);
    assert!(DEFAULT_NOTIFICATION_DURATION_MS <= MAX_NOTIFICATION_DURATION_MS);

    // Stack depth validation
    assert!(MIN_MAX_VISIBLE > 0);
    assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);

    // Exit grace validation
    assert!(MIN_EXIT_GRACE_MS > 0);
    assert!(DEFAULT_EXIT_GRACE_MS >= MIN_EXIT_GRACE_MS);
    assert!(DEFAULT_EXIT_GRACE_MS <= MAX_EXIT_GRACE_MS);

    // Tick validation
    assert!(MIN_TICK_MS > 0);
    assert!(DEFAULT_TICK_MS >= MIN_TICK_MS);
    assert!(DEFAULT_TICK_MS <= MAX_TICK_MS);
    assert!(DEFAULT_TICK_MS < DEFAULT_NOTIFICATION_DURATION_MS);

    // Popover validation
    assert!(DEFAULT_POPOVER_SPACING >= 0.0);
    assert!(DEFAULT_SCROLL_THROTTLE_MS < DEFAULT_RESIZE_DEBOUNCE_MS);
};
