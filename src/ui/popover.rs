// SPDX-License-Identifier: MPL-2.0
//! Floating panel driven by a [`PositionTracker`](crate::popover::PositionTracker).
//!
//! iced has no absolute positioning, so the panel is pushed into place with
//! leading padding inside a full-size layer.

use crate::popover::{Placement, PositionSink, PositionWrite};
use crate::ui::design_tokens::{border, opacity, radius, shadow, sizing, spacing};
use iced::widget::{container, Container};
use iced::{Color, Element, Length, Padding, Theme};

/// Last applied position of a popover, as written by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopoverFrame {
    pub left: f32,
    pub top: f32,
    pub placement: Placement,
    /// Number of property writes received; handy for spotting churn.
    pub writes: usize,
}

impl PositionSink for PopoverFrame {
    fn write(&mut self, write: PositionWrite) {
        self.writes += 1;
        match write {
            PositionWrite::Left(left) => self.left = left,
            PositionWrite::Top(top) => self.top = top,
            PositionWrite::Placement(placement) => self.placement = placement,
        }
    }
}

/// Places `content` at the frame's position.
pub fn view_popover<'a, M: 'a>(
    frame: &PopoverFrame,
    content: impl Into<Element<'a, M>>,
) -> Element<'a, M> {
    let panel = Container::new(content)
        .width(Length::Fixed(sizing::POPOVER_WIDTH))
        .padding(spacing::SM)
        .style(panel_style);

    Container::new(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding {
            top: frame.top.max(0.0),
            left: frame.left.max(0.0),
            right: 0.0,
            bottom: 0.0,
        })
        .into()
}

fn panel_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(iced::Background::Color(palette.background.base.color)),
        border: iced::Border {
            color: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette.background.strong.color
            },
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::SM,
        text_color: Some(palette.background.base.text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popover::{Side, TooltipPlacement};

    #[test]
    fn frame_applies_writes() {
        let mut frame = PopoverFrame::default();
        let tooltip: Placement = TooltipPlacement::centered(Side::Left).into();

        frame.write(PositionWrite::Left(12.0));
        frame.write(PositionWrite::Top(40.0));
        frame.write(PositionWrite::Placement(tooltip));

        assert_eq!(frame.left, 12.0);
        assert_eq!(frame.top, 40.0);
        assert_eq!(frame.placement, tooltip);
        assert_eq!(frame.writes, 3);
    }
}
