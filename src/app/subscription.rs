// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native keyboard, mouse and window events to top-level messages and
//! drives the periodic tick while anything time-based is pending.

use super::Message;
use crate::notifications::Activation;
use iced::{event, keyboard, mouse, time, window, Subscription};
use std::time::Duration;

/// Routes native events that were not captured by a widget.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        // Window resizes always reach the popover tracker
        if let event::Event::Window(window::Event::Resized(size)) = event {
            return Some(Message::WindowResized(size));
        }

        if status == event::Status::Captured {
            return None;
        }

        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => match named {
                keyboard::key::Named::Escape => Some(Message::Escape),
                keyboard::key::Named::Enter => Some(Message::ActivateFront(Activation::Enter)),
                keyboard::key::Named::Space => Some(Message::ActivateFront(Activation::Space)),
                keyboard::key::Named::Tab => Some(Message::FocusFront),
                _ => None,
            },
            event::Event::Mouse(mouse::Event::WheelScrolled { .. }) => Some(Message::Scrolled),
            _ => None,
        }
    })
}

/// Creates the periodic tick subscription.
///
/// Runs only while a countdown, removal or popover recompute is pending.
pub fn create_tick_subscription(active: bool, interval: Duration) -> Subscription<Message> {
    if active {
        time::every(interval).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
