// SPDX-License-Identifier: MPL-2.0
//! Toast notification engine.
//!
//! Notifications appear temporarily, stack newest-on-top, pause while hovered
//! or focused, and play an exit transition before they disappear.
//!
//! # Components
//!
//! - `notification` - `Notification` record, id, `Variant` and options
//! - `store` - `Store` owning the ordered list, timers and expansion state
//! - `controller` - per-record countdown, pause gate and activation rules
//! - `stack` - derived stacking order and visual slots
//! - [`provider`] - scoped service access for nested UI code
//!
//! # Usage
//!
//! ```
//! use iced_notify::notifications::{NotificationOptions, Store, Variant};
//!
//! let mut store = Store::default();
//! let id = store.add(
//!     NotificationOptions::new()
//!         .title("Image saved")
//!         .variant(Variant::Success),
//! );
//!
//! // Drive timers from a periodic tick subscription.
//! store.tick();
//!
//! store.remove(id);
//! assert!(store.get(id).unwrap().is_exiting());
//! ```

mod announce;
mod controller;
mod notification;
pub mod provider;
mod settings;
mod stack;
mod store;

pub use announce::{LiveRegions, Politeness};
pub use controller::{Activation, Controller, Interaction, PauseSource, TickOutcome};
pub use notification::{
    Notification, NotificationId, NotificationOptions, ParseVariantError, Variant,
};
pub use provider::{NotificationService, Notifier};
pub use settings::{ExitGrace, NotificationSettings, StackDepth, TickInterval};
pub use stack::{stack_indices, Slot, StackIndex};
pub use store::{ListenerId, Message, StackEntry, Store, StoreEvent};
