// SPDX-License-Identifier: MPL-2.0
//! Floating element positioning.
//!
//! [`compute`] is the pure placement math: it keeps a popover inside the
//! viewport, flipping or falling back to another side when the preferred one
//! lacks room. [`PositionTracker`] keeps that position live while the popover
//! is open, debouncing resizes and throttling scroll.

mod compute;
mod placement;
mod tracker;

pub use compute::{compute, Position};
pub use placement::{
    Align, DropdownPlacement, ParsePlacementError, Placement, Side, TooltipPlacement,
};
pub use tracker::{LayoutSource, PositionSink, PositionTracker, PositionWrite, TrackerOptions};
