// SPDX-License-Identifier: MPL-2.0
//! Screen-reader live regions.
//!
//! Two channels mirror ARIA live regions: polite announcements wait for the
//! reader to go idle, assertive ones interrupt. Writes are fire-and-forget;
//! the view renders whatever text is current.

/// Announcement channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    Polite,
    Assertive,
}

/// Latest message per channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveRegions {
    polite: Option<String>,
    assertive: Option<String>,
}

impl LiveRegions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the channel's message. Empty messages are dropped.
    pub fn announce(&mut self, message: impl Into<String>, politeness: Politeness) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        tracing::trace!(?politeness, %message, "live region update");
        match politeness {
            Politeness::Polite => self.polite = Some(message),
            Politeness::Assertive => self.assertive = Some(message),
        }
    }

    #[must_use]
    pub fn polite(&self) -> Option<&str> {
        self.polite.as_deref()
    }

    #[must_use]
    pub fn assertive(&self) -> Option<&str> {
        self.assertive.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_independent() {
        let mut regions = LiveRegions::new();
        regions.announce("saved", Politeness::Polite);
        regions.announce("failed", Politeness::Assertive);
        regions.announce("saved again", Politeness::Polite);

        assert_eq!(regions.polite(), Some("saved again"));
        assert_eq!(regions.assertive(), Some("failed"));
    }

    #[test]
    fn empty_message_is_ignored() {
        let mut regions = LiveRegions::new();
        regions.announce("", Politeness::Polite);
        assert_eq!(regions.polite(), None);
    }
}
