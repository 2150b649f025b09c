// SPDX-License-Identifier: MPL-2.0
//! Derived stacking order.
//!
//! Nothing here is stored: positions are recomputed from the authoritative
//! list on every read so they can never go stale after a mutation.

use super::notification::{Notification, NotificationId};

/// Recency rank of a record in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackIndex {
    /// 0 is the newest non-exiting record (the front record).
    Active(usize),
    /// Playing its exit transition; the presentation layer keeps the last
    /// slot it occupied.
    Exiting,
}

impl StackIndex {
    #[must_use]
    pub fn is_front(self) -> bool {
        self == StackIndex::Active(0)
    }
}

/// Computes stack indices for an insertion-ordered list (oldest first).
///
/// The result is in the same order as `records`.
pub fn stack_indices(records: &[Notification]) -> Vec<(NotificationId, StackIndex)> {
    let mut indices = vec![StackIndex::Exiting; records.len()];
    let mut next = 0;
    for (position, record) in records.iter().enumerate().rev() {
        if !record.is_exiting() {
            indices[position] = StackIndex::Active(next);
            next += 1;
        }
    }
    records
        .iter()
        .map(Notification::id)
        .zip(indices)
        .collect()
}

/// Visual slot of a record once display mode and depth are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Visual position; for exiting records this is the frozen last slot.
    pub index: usize,
    /// False when truncated beyond the collapsed depth (rendered at opacity 0).
    pub visible: bool,
    /// Whether the record reacts to pointer and keyboard input.
    pub interactive: bool,
}

impl Slot {
    /// Resolves the slot for a record.
    ///
    /// `visual_index` is the index to draw at (see
    /// [`Controller::visual_index`](super::Controller::visual_index)).
    #[must_use]
    pub fn resolve(index: StackIndex, visual_index: usize, expanded: bool, max_visible: usize) -> Self {
        let visible = expanded || visual_index < max_visible;
        let interactive = match index {
            StackIndex::Exiting => false,
            StackIndex::Active(_) if expanded => true,
            StackIndex::Active(i) => i == 0,
        };
        Self {
            index: visual_index,
            visible,
            interactive,
        }
    }
}
