//! The listener registry shared by an [`UpdaterHook`] and its [`Trigger`].
//!
//! Most users don't need to touch this module directly, [`create_updater`]
//! wires a [`Registry`] up with the hook and trigger that use it.
//!
//! [`UpdaterHook`]: crate::UpdaterHook
//! [`Trigger`]: crate::Trigger
//! [`create_updater`]: crate::create_updater

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// Bookkeeping for the listeners of one updater.
///
/// Listeners are kept in a `Vec` in no meaningful order. Each
/// [`ListenerEntry`] remembers its own position in that `Vec`, which lets
/// [`unsubscribe`][Self::unsubscribe] remove it in constant time by moving the
/// last listener into the vacated slot.
pub struct Registry {
    /// Flipped on every notification.
    ///
    /// Its only purpose is to be a value that differs from the previous one,
    /// so the host's state primitive sees a change every time.
    toggle: Cell<bool>,

    /// Currently subscribed listeners.
    ///
    /// For every entry, `listeners[entry.index]` is that entry.
    listeners: RefCell<Vec<Rc<ListenerEntry>>>,
}

impl Registry {
    /// Create an empty registry with the toggle set to `false`.
    pub fn new() -> Self {
        Self { toggle: Cell::new(false), listeners: RefCell::new(Vec::new()) }
    }

    /// Get the current value of the toggle.
    pub fn toggle(&self) -> bool {
        self.toggle.get()
    }

    /// Get the number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether there are no subscribed listeners.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Add a listener.
    ///
    /// The returned entry is the handle to pass to
    /// [`unsubscribe`][Self::unsubscribe] later.
    pub fn subscribe(&self, notify: Rc<dyn Fn()>) -> Rc<ListenerEntry> {
        let mut listeners = self.listeners.borrow_mut();
        let entry = Rc::new(ListenerEntry { notify, index: Cell::new(listeners.len()) });
        listeners.push(Rc::clone(&entry));

        #[cfg(feature = "tracing")]
        tracing::trace!(index = entry.index(), "Subscribed listener");

        entry
    }

    /// Remove a listener.
    ///
    /// The last listener is moved into the removed listener's slot, so this
    /// takes the same amount of work no matter how many listeners there are.
    ///
    /// Returns `false` without touching the registry if `entry` isn't currently
    /// subscribed, e.g. because it was already unsubscribed before.
    pub fn unsubscribe(&self, entry: &Rc<ListenerEntry>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let index = entry.index();

        if !listeners.get(index).is_some_and(|found| Rc::ptr_eq(found, entry)) {
            #[cfg(feature = "tracing")]
            tracing::warn!(index, "Tried to unsubscribe a listener that isn't subscribed");
            return false;
        }

        listeners.swap_remove(index);
        if let Some(moved) = listeners.get(index) {
            moved.index.set(index);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(index, "Unsubscribed listener");

        true
    }

    /// Flip the toggle, then call every subscribed listener.
    ///
    /// Listeners are called synchronously, in their current order. No borrow of
    /// the registry is held while a listener runs, so listeners may subscribe,
    /// unsubscribe or notify again. Iteration goes by index up to the live
    /// length: a listener subscribed during the pass is called in that same
    /// pass. Unsubscribing during the pass moves the last listener into the
    /// vacated slot; if that slot was already visited (the listener removed
    /// itself or an earlier one), the moved listener is skipped for this pass.
    pub fn notify_all(&self) {
        self.toggle.set(!self.toggle.get());

        #[cfg(feature = "tracing")]
        {
            let num_listeners = self.len();
            if num_listeners > 0 {
                tracing::debug!("Notifying {num_listeners} subscribed components");
            } else {
                tracing::debug!("No subscribers");
            }
        }

        let mut index = 0;
        loop {
            let Some(entry) = self.listeners.borrow().get(index).cloned() else {
                break;
            };
            (entry.notify)();
            index += 1;
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("toggle", &self.toggle.get())
            .field("num_listeners", &self.len())
            .finish()
    }
}

/// A listener subscribed to a [`Registry`].
pub struct ListenerEntry {
    notify: Rc<dyn Fn()>,

    /// Current position in `Registry::listeners`, updated when a swap-remove
    /// moves this entry.
    index: Cell<usize>,
}

impl ListenerEntry {
    /// Get the position of this entry in its registry's listener list.
    ///
    /// Once the entry is unsubscribed, this is the last position it had.
    pub fn index(&self) -> usize {
        self.index.get()
    }
}

impl fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry").field("index", &self.index.get()).finish_non_exhaustive()
    }
}
