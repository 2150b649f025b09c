// SPDX-License-Identifier: MPL-2.0
//! iced widgets for the notification stack and popovers.
//!
//! - [`toast`] - Toast cards and the stacked overlay
//! - [`popover`] - Floating panel placed by the position tracker
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod popover;
pub mod toast;
