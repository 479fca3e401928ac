//! The hook primitives this crate needs from the host rendering framework.
//!
//! `component_updater` doesn't render anything itself. A UI framework with a
//! component tree and hook-based state (or an adapter for one) implements
//! [`Hooks`] for its per-component render context, and
//! [`UpdaterHook::use_updater`][crate::UpdaterHook::use_updater] is called with
//! that context from inside a component's render body.

use std::{cell::RefCell, rc::Rc};

/// Setter returned by [`Hooks::use_state`].
///
/// Calling it schedules a re-render of the owning component instance, with the
/// new value visible on its next render.
pub type Setter<T> = Rc<dyn Fn(T)>;

/// Mutable slot returned by [`Hooks::use_ref`].
///
/// Its contents survive across renders of the same component instance and
/// writing to it does not trigger a re-render.
pub type RefSlot<T> = Rc<RefCell<Option<T>>>;

/// Cleanup returned from a mount effect, run when the component unmounts.
pub type Cleanup = Box<dyn FnOnce()>;

/// Hook primitives of a host rendering framework.
///
/// Implementations must follow the usual rules for hooks: every hook of a
/// component is called on every render, from the same call site and in the
/// same order, so the host can match calls to the per-instance storage it
/// keeps for them.
pub trait Hooks {
    /// Get the current value of a piece of local state, plus a setter for it.
    ///
    /// `initial` is only used on the first render of the component instance.
    fn use_state<T: Clone + 'static>(&mut self, initial: T) -> (T, Setter<T>);

    /// Get a persistent slot for this component instance.
    ///
    /// The slot is empty on the first render and keeps whatever is stored in
    /// it for as long as the instance stays mounted.
    fn use_ref<T: 'static>(&mut self) -> RefSlot<T>;

    /// Register an effect that runs after the component instance has mounted.
    ///
    /// The effect has no dependencies, so it runs once per mount. If it returns
    /// a cleanup, the host runs that cleanup exactly once when the instance
    /// unmounts. Hosts that replay mount effects (running the cleanup and then
    /// the effect again without remounting) may call `effect` more than once.
    fn use_mount(&mut self, effect: impl FnMut() -> Option<Cleanup> + 'static);
}
