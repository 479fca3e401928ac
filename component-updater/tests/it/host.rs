//! A tiny component host, just enough to drive hooks through render, commit
//! and unmount.

use std::{
    any::Any,
    cell::{Cell, RefCell},
    rc::Rc,
};

use component_updater::{Cleanup, Hooks, RefSlot, Setter};

type Render = Rc<dyn Fn(&mut RenderCx<'_>)>;
type MountEffect = Box<dyn FnMut() -> Option<Cleanup>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentId(usize);

struct Instance {
    render: Render,
    slots: Vec<Box<dyn Any>>,
    effects: Vec<MountEffect>,
    cleanups: Vec<Cleanup>,
    committed: bool,
    renders: usize,
    dirty: Rc<Cell<bool>>,
    set_calls: Rc<Cell<usize>>,
}

#[derive(Default)]
pub struct TestHost {
    instances: Vec<Option<Instance>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the first render of a new component, without committing it.
    pub fn render_new(&mut self, render: impl Fn(&mut RenderCx<'_>) + 'static) -> ComponentId {
        let mut instance = Instance {
            render: Rc::new(render),
            slots: Vec::new(),
            effects: Vec::new(),
            cleanups: Vec::new(),
            committed: false,
            renders: 0,
            dirty: Rc::default(),
            set_calls: Rc::default(),
        };
        run_render(&mut instance);

        self.instances.push(Some(instance));
        ComponentId(self.instances.len() - 1)
    }

    /// Run mount effects of every component that hasn't been committed yet.
    pub fn commit(&mut self) {
        for instance in self.instances.iter_mut().flatten().filter(|i| !i.committed) {
            instance.committed = true;
            instance.cleanups.extend(instance.effects.iter_mut().filter_map(|effect| effect()));
        }
    }

    /// Render and commit a new component.
    pub fn mount(&mut self, render: impl Fn(&mut RenderCx<'_>) + 'static) -> ComponentId {
        let id = self.render_new(render);
        self.commit();
        id
    }

    /// Re-render every component whose state changed, returning how many did.
    pub fn rerender_dirty(&mut self) -> usize {
        let mut count = 0;
        for instance in self.instances.iter_mut().flatten().filter(|i| i.dirty.get()) {
            run_render(instance);
            count += 1;
        }
        count
    }

    pub fn rerender(&mut self, id: ComponentId) {
        run_render(self.instance_mut(id));
    }

    pub fn unmount(&mut self, id: ComponentId) {
        let instance = self.instances[id.0].take().expect("component is not mounted");
        for cleanup in instance.cleanups {
            cleanup();
        }
    }

    /// Run a component's cleanups followed by its mount effects again, the way
    /// development-mode hosts check that effects are resilient to remounting.
    pub fn replay_mount_effects(&mut self, id: ComponentId) {
        let instance = self.instance_mut(id);
        for cleanup in instance.cleanups.drain(..) {
            cleanup();
        }
        instance.cleanups.extend(instance.effects.iter_mut().filter_map(|effect| effect()));
    }

    /// The current value of the first `use_state::<T>` of a component.
    pub fn state<T: Clone + 'static>(&self, id: ComponentId) -> T {
        self.instance(id)
            .slots
            .iter()
            .find_map(|slot| slot.downcast_ref::<Rc<RefCell<T>>>())
            .expect("component has no state of this type")
            .borrow()
            .clone()
    }

    /// How often state setters of a component have been called.
    pub fn set_calls(&self, id: ComponentId) -> usize {
        self.instance(id).set_calls.get()
    }

    pub fn renders(&self, id: ComponentId) -> usize {
        self.instance(id).renders
    }

    pub fn is_dirty(&self, id: ComponentId) -> bool {
        self.instance(id).dirty.get()
    }

    fn instance(&self, id: ComponentId) -> &Instance {
        self.instances[id.0].as_ref().expect("component is not mounted")
    }

    fn instance_mut(&mut self, id: ComponentId) -> &mut Instance {
        self.instances[id.0].as_mut().expect("component is not mounted")
    }
}

fn run_render(instance: &mut Instance) {
    let render = Rc::clone(&instance.render);
    let mut cx = RenderCx {
        slots: &mut instance.slots,
        effects: &mut instance.effects,
        cursor: 0,
        first_render: instance.renders == 0,
        dirty: Rc::clone(&instance.dirty),
        set_calls: Rc::clone(&instance.set_calls),
    };
    instance.dirty.set(false);
    render(&mut cx);
    instance.renders += 1;
}

pub struct RenderCx<'a> {
    slots: &'a mut Vec<Box<dyn Any>>,
    effects: &'a mut Vec<MountEffect>,
    cursor: usize,
    first_render: bool,
    dirty: Rc<Cell<bool>>,
    set_calls: Rc<Cell<usize>>,
}

impl RenderCx<'_> {
    fn slot<S: Clone + 'static>(&mut self, init: impl FnOnce() -> S) -> S {
        let index = self.cursor;
        self.cursor += 1;
        if index == self.slots.len() {
            self.slots.push(Box::new(init()));
        }
        self.slots[index].downcast_ref::<S>().expect("hook order changed between renders").clone()
    }
}

impl Hooks for RenderCx<'_> {
    fn use_state<T: Clone + 'static>(&mut self, initial: T) -> (T, Setter<T>) {
        let cell = self.slot(|| Rc::new(RefCell::new(initial)));
        let value = cell.borrow().clone();

        let dirty = Rc::clone(&self.dirty);
        let set_calls = Rc::clone(&self.set_calls);
        let setter: Setter<T> = Rc::new(move |value| {
            *cell.borrow_mut() = value;
            set_calls.set(set_calls.get() + 1);
            dirty.set(true);
        });
        (value, setter)
    }

    fn use_ref<T: 'static>(&mut self) -> RefSlot<T> {
        self.slot(|| Rc::new(RefCell::new(None)))
    }

    fn use_mount(&mut self, effect: impl FnMut() -> Option<Cleanup> + 'static) {
        // Keep the slot layout stable across renders.
        self.slot(|| ());
        if self.first_render {
            self.effects.push(Box::new(effect));
        }
    }
}
