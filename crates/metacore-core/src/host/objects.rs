use std::collections::HashMap;

use tracing::trace;

use crate::state::{SelectionSlot, SelectionUpdate};

/// Host object instance id
pub type InstanceId = i32;

/// Selection bookkeeping attached to a menu view
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBinding {
    /// Applied whenever the view becomes active
    pub on_enable: SelectionUpdate,
    /// Cleared whenever the view is deactivated
    pub on_disable: SelectionSlot,
}

/// Per-object signal registry.
///
/// Views get at most one binding; attaching again replaces it, matching a
/// get-or-add marker component on the host side.
#[derive(Default)]
pub struct ObjectSignals {
    bindings: HashMap<InstanceId, SignalBinding>,
    on_destroy: HashMap<InstanceId, Vec<Box<dyn FnOnce()>>>,
}

impl ObjectSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, id: InstanceId, binding: SignalBinding) {
        trace!("attach signal binding to {}", id);
        self.bindings.insert(id, binding);
    }

    pub fn binding(&self, id: InstanceId) -> Option<&SignalBinding> {
        self.bindings.get(&id)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Run `callback` right before the object's memory is reclaimed
    pub fn on_destroy<F>(&mut self, id: InstanceId, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.on_destroy.entry(id).or_default().push(Box::new(callback));
    }

    /// Forget the object, firing its destroy callbacks in registration
    /// order. Returns how many callbacks ran.
    pub fn destroy(&mut self, id: InstanceId) -> usize {
        self.bindings.remove(&id);
        let callbacks = self.on_destroy.remove(&id).unwrap_or_default();
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }
}
