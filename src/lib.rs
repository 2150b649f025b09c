// SPDX-License-Identifier: MPL-2.0
//! `iced_notify` is a toast notification engine and popover positioning
//! toolkit for the Iced GUI framework.
//!
//! The engine is UI-agnostic: [`notifications::Store`] owns the ordered list
//! of notifications and their timers, while [`popover::compute`] and
//! [`popover::PositionTracker`] keep floating elements inside the viewport.
//! The [`ui`] and [`app`] modules render both with iced.

#![doc(html_root_url = "https://docs.rs/iced_notify/0.1.0")]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod notifications;
pub mod popover;
pub mod timers;
pub mod ui;
