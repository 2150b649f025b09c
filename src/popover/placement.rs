// SPDX-License-Identifier: MPL-2.0
//! Placement preferences for floating elements.
//!
//! Two families exist. Dropdowns hang off a corner of their trigger and flip
//! vertically when they run out of room. Tooltips sit centered (or edge
//! aligned) on one side and can move to any other side.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown placement string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement: {0}")]
pub struct ParsePlacementError(String);

/// Corner placement for menus and dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DropdownPlacement {
    #[default]
    BottomStart,
    BottomEnd,
    TopStart,
    TopEnd,
}

impl DropdownPlacement {
    #[must_use]
    pub fn is_below(self) -> bool {
        matches!(self, Self::BottomStart | Self::BottomEnd)
    }

    #[must_use]
    pub fn is_start(self) -> bool {
        matches!(self, Self::BottomStart | Self::TopStart)
    }

    /// Same horizontal alignment on the other side of the trigger.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::BottomStart => Self::TopStart,
            Self::BottomEnd => Self::TopEnd,
            Self::TopStart => Self::BottomStart,
            Self::TopEnd => Self::BottomEnd,
        }
    }
}

impl FromStr for DropdownPlacement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom-start" => Ok(Self::BottomStart),
            "bottom-end" => Ok(Self::BottomEnd),
            "top-start" => Ok(Self::TopStart),
            "top-end" => Ok(Self::TopEnd),
            other => Err(ParsePlacementError(other.to_string())),
        }
    }
}

impl fmt::Display for DropdownPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
        })
    }
}

/// Side of the trigger a tooltip sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Side {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Fallback order tried when the preferred side does not fit.
    pub const FALLBACK_ORDER: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Cross-axis alignment of a tooltip against its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Align {
    #[default]
    Center,
    Start,
    End,
}

/// Side placement for tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TooltipPlacement {
    pub side: Side,
    pub align: Align,
}

impl TooltipPlacement {
    #[must_use]
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    #[must_use]
    pub const fn centered(side: Side) -> Self {
        Self::new(side, Align::Center)
    }

    /// Same alignment on another side.
    #[must_use]
    pub const fn with_side(self, side: Side) -> Self {
        Self::new(side, self.align)
    }
}

impl FromStr for TooltipPlacement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, align) = match s.split_once('-') {
            Some((side, "start")) => (side, Align::Start),
            Some((side, "end")) => (side, Align::End),
            Some(_) => return Err(ParsePlacementError(s.to_string())),
            None => (s, Align::Center),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ParsePlacementError(s.to_string())),
        };
        Ok(Self { side, align })
    }
}

impl fmt::Display for TooltipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.align {
            Align::Center => f.write_str(self.side.as_str()),
            Align::Start => write!(f, "{}-start", self.side.as_str()),
            Align::End => write!(f, "{}-end", self.side.as_str()),
        }
    }
}

/// Placement preference of either family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Dropdown(DropdownPlacement),
    Tooltip(TooltipPlacement),
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Dropdown(DropdownPlacement::default())
    }
}

impl From<DropdownPlacement> for Placement {
    fn from(value: DropdownPlacement) -> Self {
        Placement::Dropdown(value)
    }
}

impl From<TooltipPlacement> for Placement {
    fn from(value: TooltipPlacement) -> Self {
        Placement::Tooltip(value)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Dropdown(p) => p.fmt(f),
            Placement::Tooltip(p) => p.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_strings_round_trip() {
        for p in [
            DropdownPlacement::BottomStart,
            DropdownPlacement::BottomEnd,
            DropdownPlacement::TopStart,
            DropdownPlacement::TopEnd,
        ] {
            assert_eq!(p.to_string().parse::<DropdownPlacement>(), Ok(p));
        }
    }

    #[test]
    fn tooltip_parses_side_and_alignment() {
        assert_eq!(
            "top".parse::<TooltipPlacement>(),
            Ok(TooltipPlacement::centered(Side::Top))
        );
        assert_eq!(
            "left-end".parse::<TooltipPlacement>(),
            Ok(TooltipPlacement::new(Side::Left, Align::End))
        );
        assert!("top-middle".parse::<TooltipPlacement>().is_err());
        assert!("center".parse::<TooltipPlacement>().is_err());
    }

    #[test]
    fn flipping_keeps_alignment() {
        assert_eq!(
            DropdownPlacement::BottomEnd.flipped(),
            DropdownPlacement::TopEnd
        );
        assert!(DropdownPlacement::TopStart.flipped().is_below());
    }
}
