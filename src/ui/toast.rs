// SPDX-License-Identifier: MPL-2.0
//! Toast widgets for rendering the notification stack.
//!
//! Toasts appear as small cards with variant-colored accents, a countdown
//! track and a dismiss button. Collapsed, the front toast is drawn in full
//! and the cards behind it peek out as thin strips. Expanded, every record
//! is drawn in full.

use crate::clock::Clock;
use crate::notifications::{Activation, Message, StackEntry, Store};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{
    button, container, mouse_area, progress_bar, text, Column, Container, Row, Text,
};
use iced::{alignment, Color, Element, Length, Theme};

/// Renders the whole stack anchored to the bottom-right corner.
pub fn view_stack<'a, C: Clock>(store: &Store<C>) -> Element<'a, Message> {
    let entries = store.stack();
    if entries.is_empty() {
        return Container::new(text(""))
            .width(Length::Shrink)
            .height(Length::Shrink)
            .into();
    }

    let expanded = store.is_expanded();
    let hidden = entries.iter().filter(|e| !e.slot.visible).count();

    let mut drawn: Vec<&StackEntry<'_>> = entries.iter().filter(|e| e.slot.visible).collect();
    drawn.sort_by_key(|e| e.slot.index);

    let mut column = Column::new()
        .spacing(if expanded { spacing::XS } else { 0.0 })
        .align_x(alignment::Horizontal::Right);

    for entry in drawn {
        column = if expanded || entry.slot.index == 0 {
            column.push(view_toast(entry))
        } else {
            column.push(view_peek(entry))
        };
    }

    if hidden > 0 {
        column = column.push(
            Text::new(format!("+{hidden} more"))
                .size(typography::CAPTION)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.extended_palette().background.weak.text),
                }),
        );
    }

    if expanded {
        column = column.push(
            button(Text::new("Collapse").size(typography::CAPTION))
                .on_press(Message::ToggleExpanded)
                .padding(spacing::XXS)
                .style(dismiss_button_style),
        );
    }

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}

/// Renders a single toast in full.
pub fn view_toast<'a>(entry: &StackEntry<'_>) -> Element<'a, Message> {
    let notification = entry.notification;
    let id = notification.id();
    let accent = notification.variant().color();
    let exiting = notification.is_exiting();
    let paused = entry.paused;
    let alpha = if exiting { opacity::EXITING } else { opacity::OPAQUE };

    let mut body = Column::new().spacing(spacing::XXS).width(Length::Fill);
    if let Some(custom) = notification.body() {
        body = body.push(Text::new(custom.to_string()).size(typography::BODY));
    } else {
        if let Some(title) = notification.title() {
            body = body.push(Text::new(title.to_string()).size(typography::BODY_LG));
        }
        if let Some(description) = notification.description() {
            body = body.push(
                Text::new(description.to_string())
                    .size(typography::BODY)
                    .style(|theme: &Theme| text::Style {
                        color: Some(theme.extended_palette().background.weak.text),
                    }),
            );
        }
    }

    let mut dismiss = button(Text::new("×").size(typography::BODY_LG))
        .padding(spacing::XXS)
        .style(dismiss_button_style);
    if !exiting {
        dismiss = dismiss.on_press(Message::Activate(id, Activation::CloseControl));
    }

    // Layout: [body] [dismiss]
    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Top)
        .push(body)
        .push(dismiss);

    let mut content = Column::new().spacing(spacing::XS).push(row);
    if notification.auto_dismiss_after().is_some() {
        content = content.push(
            progress_bar(0.0..=100.0, entry.progress)
                .girth(sizing::PROGRESS_TRACK)
                .style(move |theme: &Theme| progress_style(theme, accent, paused)),
        );
    }

    let card = Container::new(content)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent, alpha));

    let mut area = mouse_area(card)
        .on_enter(Message::Hover(id, true))
        .on_exit(Message::Hover(id, false));
    if entry.slot.interactive {
        area = area.on_press(Message::Activate(id, Activation::Click));
    }
    area.into()
}

/// Thin strip for a card sitting behind the front toast.
fn view_peek<'a>(entry: &StackEntry<'_>) -> Element<'a, Message> {
    let accent = entry.notification.variant().color();
    let inset = spacing::XS * entry.slot.index as f32;
    let alpha = if entry.notification.is_exiting() {
        opacity::EXITING
    } else {
        opacity::PEEK
    };

    Container::new(text(""))
        .width(Length::Fixed((sizing::TOAST_WIDTH - 2.0 * inset).max(0.0)))
        .height(Length::Fixed(sizing::TOAST_PEEK))
        .style(move |theme: &Theme| toast_container_style(theme, accent, alpha))
        .into()
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let background = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(Color {
            a: alpha,
            ..background
        })),
        border: iced::Border {
            color: Color { a: alpha, ..accent },
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(Color {
            a: alpha,
            ..theme.palette().text
        }),
        ..Default::default()
    }
}

/// Countdown track; dims while the countdown is held.
fn progress_style(theme: &Theme, accent: Color, paused: bool) -> progress_bar::Style {
    let bar = if paused {
        Color {
            a: opacity::OVERLAY_MEDIUM,
            ..accent
        }
    } else {
        accent
    };

    progress_bar::Style {
        background: iced::Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..theme.extended_palette().background.strong.color
        }),
        bar: iced::Background::Color(bar),
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(iced::Background::Color(Color {
                a: if status == button::Status::Pressed {
                    opacity::OVERLAY_MEDIUM
                } else {
                    opacity::OVERLAY_SUBTLE
                },
                ..palette::GRAY_400
            })),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
