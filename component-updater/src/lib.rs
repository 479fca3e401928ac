//! Force hook-based UI components to re-render on demand.
//!
//! An updater is a pair of handles created by [`create_updater`]: an
//! [`UpdaterHook`] that components call while rendering to subscribe, and a
//! [`Trigger`] that any code can call to make all currently subscribed
//! components re-render. No data is passed along; components re-read whatever
//! external state they display when they re-render.
//!
//! The crate is framework-agnostic. It talks to the rendering framework through
//! the [`Hooks`] trait, which provides local state, a persistent per-instance
//! slot and a mount effect with cleanup.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use component_updater::{create_updater, Cleanup, Hooks, RefSlot, Setter};
//!
//! // A stand-in for a framework's render context, for a single component that
//! // renders exactly once.
//! #[derive(Default)]
//! struct Cx {
//!     renders_requested: Rc<RefCell<u32>>,
//!     cleanups: Vec<Cleanup>,
//! }
//!
//! impl Hooks for Cx {
//!     fn use_state<T: Clone + 'static>(&mut self, initial: T) -> (T, Setter<T>) {
//!         let renders_requested = self.renders_requested.clone();
//!         let setter: Setter<T> = Rc::new(move |_: T| *renders_requested.borrow_mut() += 1);
//!         (initial, setter)
//!     }
//!
//!     fn use_ref<T: 'static>(&mut self) -> RefSlot<T> {
//!         Rc::default()
//!     }
//!
//!     fn use_mount(&mut self, mut effect: impl FnMut() -> Option<Cleanup> + 'static) {
//!         self.cleanups.extend(effect());
//!     }
//! }
//!
//! let (use_my_updater, update_my_components) = create_updater();
//!
//! let mut cx = Cx::default();
//! // Inside the component's render body:
//! use_my_updater.use_updater(&mut cx);
//!
//! // Anywhere else:
//! update_my_components.update();
//! assert_eq!(*cx.renders_requested.borrow(), 1);
//!
//! // Unmounting runs the cleanup, after which the component is no longer
//! // notified.
//! for cleanup in cx.cleanups.drain(..) {
//!     cleanup();
//! }
//! update_my_components.update();
//! assert_eq!(*cx.renders_requested.borrow(), 1);
//! ```
//!
//! Cargo features:
//!
//! - `tracing`: Emit [tracing] events when components subscribe, unsubscribe
//!   or get notified
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]

mod host;
pub mod registry;
mod updater;

use std::rc::Rc;

#[doc(inline)]
pub use host::{Cleanup, Hooks, RefSlot, Setter};
#[doc(inline)]
pub use updater::{Trigger, UpdaterHook};

use registry::Registry;

/// Create a new updater.
///
/// Returns the subscription hook and the trigger, sharing a fresh
/// [`Registry`]. Separate calls never share any state.
///
/// ```
/// let (use_sidebar_updater, update_sidebar) = component_updater::create_updater();
/// assert_eq!(update_sidebar.subscriber_count(), 0);
/// assert!(update_sidebar.same_updater(&use_sidebar_updater));
/// ```
pub fn create_updater() -> (UpdaterHook, Trigger) {
    let registry = Rc::new(Registry::new());
    (UpdaterHook::new(Rc::clone(&registry)), Trigger::new(registry))
}
