// SPDX-License-Identifier: MPL-2.0
//! Scoped access to the notification service.
//!
//! Deeply nested UI code reaches the store through the provider installed for
//! the current thread instead of threading a handle through every call. Using
//! it without a provider is a wiring bug and fails loudly.
//!
//! ```
//! use iced_notify::notifications::{provider, NotificationOptions, Notifier, Store};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let store = Rc::new(RefCell::new(Store::default()));
//! let _guard = provider::Provider::install(Notifier::new(store.clone()));
//!
//! provider::use_notifications().add(NotificationOptions::new().title("Saved"));
//! assert_eq!(store.borrow().len(), 1);
//! ```

use super::notification::{NotificationId, NotificationOptions};
use super::store::Store;
use crate::clock::Clock;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// Boundary exposed to code that only posts and dismisses notifications.
pub trait NotificationService {
    fn add(&mut self, options: NotificationOptions) -> NotificationId;
    fn remove(&mut self, id: NotificationId);
}

impl<C: Clock> NotificationService for Store<C> {
    fn add(&mut self, options: NotificationOptions) -> NotificationId {
        Store::add(self, options)
    }

    fn remove(&mut self, id: NotificationId) {
        Store::remove(self, id);
    }
}

/// Cloneable handle to a shared notification service.
#[derive(Clone)]
pub struct Notifier {
    service: Rc<RefCell<dyn NotificationService>>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new<S: NotificationService + 'static>(service: Rc<RefCell<S>>) -> Self {
        Self { service }
    }

    /// Posts a notification and returns its id.
    pub fn add(&self, options: NotificationOptions) -> NotificationId {
        self.service.borrow_mut().add(options)
    }

    /// Dismisses a notification. Unknown ids are ignored.
    pub fn remove(&self, id: NotificationId) {
        self.service.borrow_mut().remove(id);
    }

    /// Runs `f` with exclusive access to the service.
    ///
    /// # Panics
    ///
    /// Panics if the service is already borrowed, for example when called
    /// from inside a store listener.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn NotificationService) -> R) -> R {
        f(&mut *self.service.borrow_mut())
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Notifier>> = const { RefCell::new(None) };
}

/// Installs notifiers for the current thread.
pub struct Provider;

impl Provider {
    /// Makes `notifier` the current service until the guard is dropped.
    ///
    /// Providers nest: dropping the guard restores the previous one.
    #[must_use = "the provider is uninstalled when the guard is dropped"]
    pub fn install(notifier: Notifier) -> ProviderGuard {
        let previous = CURRENT.with(|current| current.replace(Some(notifier)));
        ProviderGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

/// Keeps a provider installed. Not `Send`: providers are per-thread.
pub struct ProviderGuard {
    previous: Option<Notifier>,
    _not_send: PhantomData<Rc<()>>,
}

impl fmt::Debug for ProviderGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderGuard")
            .field("restores_previous", &self.previous.is_some())
            .finish()
    }
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

/// Returns the current notifier, or [`Error::OutsideProvider`].
pub fn try_use_notifications() -> Result<Notifier> {
    CURRENT
        .with(|current| current.borrow().clone())
        .ok_or(Error::OutsideProvider)
}

/// Returns the current notifier.
///
/// # Panics
///
/// Panics when no provider is installed on this thread.
#[must_use]
pub fn use_notifications() -> Notifier {
    match try_use_notifications() {
        Ok(notifier) => notifier,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_store() -> Rc<RefCell<Store>> {
        Rc::new(RefCell::new(Store::default()))
    }

    #[test]
    fn missing_provider_is_an_error() {
        assert!(matches!(
            try_use_notifications(),
            Err(Error::OutsideProvider)
        ));
    }

    #[test]
    #[should_panic(expected = "notification provider")]
    fn use_without_provider_panics() {
        let _ = use_notifications();
    }

    #[test]
    fn installed_provider_reaches_store() {
        let store = shared_store();
        let _guard = Provider::install(Notifier::new(Rc::clone(&store)));

        let id = use_notifications().add(NotificationOptions::new().title("hello"));
        assert_eq!(store.borrow().len(), 1);

        use_notifications().remove(id);
        assert!(store.borrow().get(id).unwrap().is_exiting());
    }

    #[test]
    fn with_batches_calls_under_one_borrow() {
        let store = shared_store();
        let notifier = Notifier::new(Rc::clone(&store));

        let ids = notifier.with(|service| {
            let first = service.add(NotificationOptions::new().title("one"));
            let second = service.add(NotificationOptions::new().title("two"));
            service.remove(first);
            [first, second]
        });

        let store = store.borrow();
        assert!(store.get(ids[0]).unwrap().is_exiting());
        assert!(!store.get(ids[1]).unwrap().is_exiting());
    }

    #[test]
    fn nested_providers_restore_previous() {
        let outer = shared_store();
        let inner = shared_store();
        let _outer_guard = Provider::install(Notifier::new(Rc::clone(&outer)));
        {
            let _inner_guard = Provider::install(Notifier::new(Rc::clone(&inner)));
            use_notifications().add(NotificationOptions::new());
        }
        use_notifications().add(NotificationOptions::new());

        assert_eq!(inner.borrow().len(), 1);
        assert_eq!(outer.borrow().len(), 1);
    }

    #[test]
    fn dropping_last_guard_uninstalls() {
        {
            let _guard = Provider::install(Notifier::new(shared_store()));
            assert!(try_use_notifications().is_ok());
        }
        assert!(try_use_notifications().is_err());
    }
}
