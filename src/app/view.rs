// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The window is a stack of layers: the control panel and popover trigger at
//! the bottom, the open popover above them, and the toast stack on top.

use super::{Anchor, Message};
use crate::clock::Clock;
use crate::notifications::{Store, Variant};
use crate::popover::Placement;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::popover::{view_popover, PopoverFrame};
use crate::ui::toast;
use iced::widget::{button, mouse_area, Column, Container, Row, Stack, Text};
use iced::{Element, Length, Padding, Rectangle};

/// Context required to render the application view.
pub struct ViewContext<'a, C: Clock> {
    pub store: &'a Store<C>,
    pub popover_open: bool,
    pub frame: &'a PopoverFrame,
    pub placement: Placement,
    pub anchor: Anchor,
    pub trigger: Rectangle,
}

/// Renders every layer of the window.
pub fn view<'a, C: Clock>(ctx: ViewContext<'_, C>) -> Element<'a, Message> {
    let background = mouse_area(
        Container::new(view_controls(ctx.placement, ctx.anchor))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::LG),
    )
    .on_press(Message::BackgroundPressed);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(background)
        .push(view_trigger(ctx.trigger, ctx.popover_open));

    if ctx.popover_open {
        layers = layers.push(view_popover(ctx.frame, view_popover_content(ctx.frame)));
    }

    layers
        .push(toast::view_stack(ctx.store).map(Message::Notification))
        .into()
}

fn view_controls<'a>(placement: Placement, anchor: Anchor) -> Element<'a, Message> {
    let post_buttons = Row::new()
        .spacing(spacing::XS)
        .push(button(Text::new("Info")).on_press(Message::Post(Variant::Info)))
        .push(button(Text::new("Success")).on_press(Message::Post(Variant::Success)))
        .push(button(Text::new("Warning")).on_press(Message::Post(Variant::Warning)))
        .push(button(Text::new("Error")).on_press(Message::Post(Variant::Error)))
        .push(button(Text::new("Persistent")).on_press(Message::PostPersisted))
        .push(button(Text::new("Clear")).on_press(Message::ClearAll));

    let popover_buttons = Row::new()
        .spacing(spacing::XS)
        .push(
            button(Text::new(format!("Placement: {placement}")))
                .on_press(Message::CyclePlacement),
        )
        .push(button(Text::new(format!("Trigger: {anchor}"))).on_press(Message::CycleAnchor));

    Column::new()
        .spacing(spacing::MD)
        .push(Text::new("Notifications").size(typography::TITLE_MD))
        .push(post_buttons)
        .push(Text::new("Popover").size(typography::TITLE_MD))
        .push(popover_buttons)
        .into()
}

/// Trigger button pushed to its anchor with leading padding.
fn view_trigger<'a>(trigger: Rectangle, open: bool) -> Element<'a, Message> {
    let label = if open { "Close menu" } else { "Open menu" };
    let trigger_button = button(Text::new(label))
        .width(Length::Fixed(trigger.width))
        .height(Length::Fixed(trigger.height))
        .on_press(Message::TogglePopover);

    Container::new(trigger_button)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding {
            top: trigger.y,
            left: trigger.x,
            right: 0.0,
            bottom: 0.0,
        })
        .into()
}

fn view_popover_content<'a>(frame: &PopoverFrame) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .height(Length::Fixed(super::POPOVER_HEIGHT - 2.0 * spacing::SM))
        .push(Text::new(format!("Placed {}", frame.placement)).size(typography::BODY_LG))
        .push(
            Text::new(format!("left {:.0}, top {:.0}", frame.left, frame.top))
                .size(typography::BODY),
        )
        .push(
            Text::new(format!("{} position writes", frame.writes)).size(typography::CAPTION),
        )
        .width(Length::Fixed(sizing::POPOVER_WIDTH - 2.0 * spacing::SM))
        .into()
}
