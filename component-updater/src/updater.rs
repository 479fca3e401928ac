use std::rc::{Rc, Weak};

use crate::{
    host::{Cleanup, Hooks},
    registry::{ListenerEntry, Registry},
};

/// The subscription hook of an updater.
///
/// Call [`use_updater`][Self::use_updater] from the render body of every
/// component that should re-render when the associated [`Trigger`] fires.
#[derive(Clone, Debug)]
pub struct UpdaterHook {
    registry: Rc<Registry>,
}

impl UpdaterHook {
    pub(crate) fn new(registry: Rc<Registry>) -> Self {
        Self { registry }
    }

    /// Subscribe the currently rendering component instance.
    ///
    /// This must be called unconditionally on every render, like any other
    /// hook. The instance is subscribed during its first render rather than in
    /// a mount effect, so a trigger fired between that render and the mount
    /// effects running is not lost. It is unsubscribed when it unmounts.
    pub fn use_updater<H: Hooks>(&self, cx: &mut H) {
        let (_, set_state) = cx.use_state(self.registry.toggle());
        let slot = cx.use_ref::<Rc<ListenerEntry>>();

        let registry = Rc::downgrade(&self.registry);
        let notify: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(registry) = Weak::upgrade(&registry) {
                set_state(registry.toggle());
            }
        });

        if slot.borrow().is_none() {
            *slot.borrow_mut() = Some(self.registry.subscribe(Rc::clone(&notify)));
        }

        let registry = Rc::clone(&self.registry);
        cx.use_mount(move || {
            // Only empty here if a previous cleanup ran without the instance
            // unmounting, i.e. the host replays mount effects.
            if slot.borrow().is_none() {
                *slot.borrow_mut() = Some(registry.subscribe(Rc::clone(&notify)));
            }

            let registry = Rc::clone(&registry);
            let slot = Rc::clone(&slot);
            let cleanup: Cleanup = Box::new(move || {
                if let Some(entry) = slot.borrow_mut().take() {
                    registry.unsubscribe(&entry);
                }
            });
            Some(cleanup)
        });
    }

    /// Get the number of currently subscribed component instances.
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }
}

/// The trigger function of an updater.
///
/// Calling [`update`][Self::update] re-renders every component instance that
/// is currently subscribed through the associated [`UpdaterHook`].
#[derive(Clone, Debug)]
pub struct Trigger {
    registry: Rc<Registry>,
}

impl Trigger {
    pub(crate) fn new(registry: Rc<Registry>) -> Self {
        Self { registry }
    }

    /// Notify all currently subscribed component instances.
    ///
    /// Every subscribed instance's state setter has been called by the time
    /// this returns; when the re-renders actually happen is up to the host.
    /// Does nothing besides flipping the internal toggle if there are no
    /// subscribers.
    pub fn update(&self) {
        self.registry.notify_all();
    }

    /// Get the number of currently subscribed component instances.
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether `self` and `other` belong to the same updater.
    pub fn same_updater(&self, other: &UpdaterHook) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}
