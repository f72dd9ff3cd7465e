// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus change notification for the embedded view.
//!
//! The host owns a [`FocusObserver`] for its view tree. The adapter holds at
//! most one [`FocusSubscription`] on it: installing a new listener removes the
//! previous one first, and removal is a no-op once the observer has died.

/// Handle to a registered focus listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey(pub u64);

/// Called with `true` when the view or one of its descendants gains focus,
/// and `false` when focus leaves it.
pub type FocusListener = Box<dyn FnMut(bool)>;

/// A host view tree that reports global focus changes.
pub trait FocusObserver {
    /// Returns `false` once the view tree has been torn down.
    fn is_alive(&self) -> bool;

    /// Registers `listener` and returns a key for removing it.
    fn add_focus_listener(&mut self, listener: FocusListener) -> ListenerKey;

    /// Removes a previously registered listener. Unknown keys are ignored.
    fn remove_focus_listener(&mut self, key: ListenerKey);
}

/// At most one active listener on a [`FocusObserver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusSubscription {
    key: Option<ListenerKey>,
}

impl FocusSubscription {
    /// Creates an empty subscription.
    #[must_use]
    pub const fn new() -> Self {
        Self { key: None }
    }

    /// Returns `true` if a listener is installed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Replaces the active listener with `listener`.
    ///
    /// Returns `false`, leaving the subscription empty, if the observer is no
    /// longer alive.
    pub fn replace(&mut self, observer: &mut dyn FocusObserver, listener: FocusListener) -> bool {
        self.clear(observer);
        if !observer.is_alive() {
            return false;
        }
        self.key = Some(observer.add_focus_listener(listener));
        true
    }

    /// Removes the active listener, if any.
    pub fn clear(&mut self, observer: &mut dyn FocusObserver) {
        if let Some(key) = self.key.take()
            && observer.is_alive()
        {
            observer.remove_focus_listener(key);
        }
    }
}

/// An in-process [`FocusObserver`].
pub struct FocusRegistry {
    listeners: Vec<(ListenerKey, FocusListener)>,
    next_key: u64,
    alive: bool,
}

impl core::fmt::Debug for FocusRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FocusRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_key", &self.next_key)
            .field("alive", &self.alive)
            .finish()
    }
}

impl Default for FocusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRegistry {
    /// Creates a live registry with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_key: 0,
            alive: true,
        }
    }

    /// Delivers a focus change to every listener, in registration order.
    pub fn notify(&mut self, has_focus: bool) {
        if !self.alive {
            return;
        }
        for (_, listener) in &mut self.listeners {
            listener(has_focus);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Tears the registry down. Listeners are dropped and never called again.
    pub fn kill(&mut self) {
        self.alive = false;
        self.listeners.clear();
    }
}

impl FocusObserver for FocusRegistry {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn add_focus_listener(&mut self, listener: FocusListener) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        self.listeners.push((key, listener));
        key
    }

    fn remove_focus_listener(&mut self, key: ListenerKey) {
        self.listeners.retain(|(k, _)| *k != key);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, FocusListener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, Box::new(move |focus| sink.borrow_mut().push(focus)))
    }

    #[test]
    fn replace_removes_previous_listener() {
        let mut registry = FocusRegistry::new();
        let mut sub = FocusSubscription::new();
        let (first, l1) = recorder();
        let (second, l2) = recorder();

        assert!(sub.replace(&mut registry, l1));
        assert!(sub.replace(&mut registry, l2));
        assert_eq!(registry.len(), 1);

        registry.notify(true);
        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), [true]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut registry = FocusRegistry::new();
        let mut sub = FocusSubscription::new();
        let (_, listener) = recorder();
        sub.replace(&mut registry, listener);
        sub.clear(&mut registry);
        sub.clear(&mut registry);
        assert!(registry.is_empty());
        assert!(!sub.is_active());
    }

    #[test]
    fn dead_observer_rejects_listener() {
        let mut registry = FocusRegistry::new();
        registry.kill();
        let mut sub = FocusSubscription::new();
        let (seen, listener) = recorder();
        assert!(!sub.replace(&mut registry, listener));
        assert!(!sub.is_active());
        registry.notify(true);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clear_after_observer_died() {
        let mut registry = FocusRegistry::new();
        let mut sub = FocusSubscription::new();
        let (_, listener) = recorder();
        sub.replace(&mut registry, listener);
        registry.kill();
        sub.clear(&mut registry);
        assert!(!sub.is_active());
    }
}
