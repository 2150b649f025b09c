// SPDX-License-Identifier: MPL-2.0
//! Viewport-aware placement math.
//!
//! All coordinates are in the viewport's logical pixels. `spacing` is both the
//! gap between trigger and popover and the minimum margin kept from every
//! viewport edge.

use super::placement::{Align, DropdownPlacement, Placement, Side, TooltipPlacement};
use iced::{Point, Rectangle, Size};

/// Computed top-left corner of the popover and the placement actually used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub placement: Placement,
}

/// Places `popover` relative to `trigger` inside `viewport`.
///
/// # Example
///
/// ```
/// use iced::{Rectangle, Size};
/// use iced_notify::popover::{compute, DropdownPlacement};
///
/// let trigger = Rectangle::new([950.0, 100.0].into(), Size::new(50.0, 30.0));
/// let position = compute(
///     trigger,
///     Size::new(150.0, 200.0),
///     Size::new(1000.0, 800.0),
///     DropdownPlacement::BottomStart.into(),
///     8.0,
/// );
/// assert_eq!(position.x, 1000.0 - 150.0 - 8.0);
/// ```
#[must_use]
pub fn compute(
    trigger: Rectangle,
    popover: Size,
    viewport: Size,
    placement: Placement,
    spacing: f32,
) -> Position {
    match placement {
        Placement::Dropdown(p) => place_dropdown(trigger, popover, viewport, p, spacing),
        Placement::Tooltip(p) => place_tooltip(trigger, popover, viewport, p, spacing),
    }
}

/// Clamps a coordinate into `[spacing, extent - size - spacing]`.
///
/// Elements larger than the available room are pinned to the leading edge.
fn clamp_axis(value: f32, size: f32, extent: f32, spacing: f32) -> f32 {
    let max = extent - size - spacing;
    if max < spacing {
        spacing
    } else {
        value.clamp(spacing, max)
    }
}

fn place_dropdown(
    trigger: Rectangle,
    popover: Size,
    viewport: Size,
    preferred: DropdownPlacement,
    spacing: f32,
) -> Position {
    let x = if preferred.is_start() {
        trigger.x
    } else {
        trigger.x + trigger.width - popover.width
    };
    let x = clamp_axis(x, popover.width, viewport.width, spacing);

    let below = trigger.y + trigger.height + spacing;
    let above = trigger.y - popover.height - spacing;
    let fits_below = below + popover.height <= viewport.height - spacing;
    let fits_above = above >= spacing;

    let (y, resolved) = match (preferred.is_below(), fits_below, fits_above) {
        (true, true, _) => (below, preferred),
        (true, false, true) => (above, preferred.flipped()),
        (true, false, false) => (
            clamp_axis(below, popover.height, viewport.height, spacing),
            preferred,
        ),
        (false, _, true) => (above, preferred),
        (false, true, false) => (below, preferred.flipped()),
        (false, false, false) => (
            clamp_axis(above, popover.height, viewport.height, spacing),
            preferred,
        ),
    };

    Position {
        x,
        y,
        placement: Placement::Dropdown(resolved),
    }
}

fn cross_axis(start: f32, length: f32, size: f32, align: Align) -> f32 {
    match align {
        Align::Center => start + (length - size) / 2.0,
        Align::Start => start,
        Align::End => start + length - size,
    }
}

fn tooltip_origin(trigger: Rectangle, popover: Size, placement: TooltipPlacement, spacing: f32) -> Point {
    let horizontal = || cross_axis(trigger.x, trigger.width, popover.width, placement.align);
    let vertical = || cross_axis(trigger.y, trigger.height, popover.height, placement.align);

    match placement.side {
        Side::Top => Point::new(horizontal(), trigger.y - popover.height - spacing),
        Side::Bottom => Point::new(horizontal(), trigger.y + trigger.height + spacing),
        Side::Left => Point::new(trigger.x - popover.width - spacing, vertical()),
        Side::Right => Point::new(trigger.x + trigger.width + spacing, vertical()),
    }
}

fn fits(origin: Point, popover: Size, viewport: Size, spacing: f32) -> bool {
    origin.x >= spacing
        && origin.y >= spacing
        && origin.x + popover.width <= viewport.width - spacing
        && origin.y + popover.height <= viewport.height - spacing
}

fn place_tooltip(
    trigger: Rectangle,
    popover: Size,
    viewport: Size,
    preferred: TooltipPlacement,
    spacing: f32,
) -> Position {
    let candidates = std::iter::once(preferred.side).chain(
        Side::FALLBACK_ORDER
            .into_iter()
            .filter(|side| *side != preferred.side),
    );

    let chosen = candidates
        .map(|side| preferred.with_side(side))
        .map(|placement| (placement, tooltip_origin(trigger, popover, placement, spacing)))
        .find(|(_, origin)| fits(*origin, popover, viewport, spacing));

    let (placement, origin) = match chosen {
        Some((placement, origin)) => {
            // Fits as-is; pin only the cross axis.
            let origin = if placement.side.is_vertical() {
                Point::new(
                    clamp_axis(origin.x, popover.width, viewport.width, spacing),
                    origin.y,
                )
            } else {
                Point::new(
                    origin.x,
                    clamp_axis(origin.y, popover.height, viewport.height, spacing),
                )
            };
            (placement, origin)
        }
        None => {
            let origin = tooltip_origin(trigger, popover, preferred, spacing);
            (
                preferred,
                Point::new(
                    clamp_axis(origin.x, popover.width, viewport.width, spacing),
                    clamp_axis(origin.y, popover.height, viewport.height, spacing),
                ),
            )
        }
    };

    Position {
        x: origin.x,
        y: origin.y,
        placement: Placement::Tooltip(placement),
    }
}
