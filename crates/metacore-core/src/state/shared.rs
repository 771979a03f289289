use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Read handle onto state owned by `MetaCore`.
///
/// Listeners keep a clone to read the state while an event is delivered.
/// Mutation is crate-private and scoped to a closure, so no borrow is ever
/// held across a broadcast.
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Shared<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn get(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub(crate) fn replace(&self, value: T) -> T {
        self.inner.replace(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Shared").field(&*self.inner.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_see_updates() {
        let state = Shared::new(1);
        let reader = state.clone();
        state.update(|value| *value += 1);
        assert_eq!(*reader.get(), 2);
        assert_eq!(state.replace(10), 2);
        assert_eq!(*reader.get(), 10);
    }
}
