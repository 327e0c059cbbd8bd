//! Lifecycle callback slots
//!
//! A slot holds either one handler or an ordered list of handlers. Dispatch
//! treats both shapes the same way, walking the handlers in insertion order.

use std::fmt;

use smallvec::{smallvec, SmallVec};

/// One handler or an ordered list of handlers for a single lifecycle event
pub enum Callback<F: ?Sized> {
    Single(Box<F>),
    Many(SmallVec<[Box<F>; 2]>),
}

impl<F: ?Sized> Callback<F> {
    /// Append a handler, turning a single handler into a list
    pub fn push(self, handler: Box<F>) -> Self {
        match self {
            Callback::Single(first) => Callback::Many(smallvec![first, handler]),
            Callback::Many(mut handlers) => {
                handlers.push(handler);
                Callback::Many(handlers)
            }
        }
    }

    /// Handlers in invocation order
    pub fn handlers(&self) -> &[Box<F>] {
        match self {
            Callback::Single(handler) => std::slice::from_ref(handler),
            Callback::Many(handlers) => handlers.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.handlers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers().is_empty()
    }
}

impl<F: ?Sized> From<Box<F>> for Callback<F> {
    fn from(handler: Box<F>) -> Self {
        Callback::Single(handler)
    }
}

impl<F: ?Sized> From<Vec<Box<F>>> for Callback<F> {
    fn from(handlers: Vec<Box<F>>) -> Self {
        Callback::Many(handlers.into_iter().collect())
    }
}

impl<F: ?Sized> FromIterator<Box<F>> for Callback<F> {
    fn from_iter<I: IntoIterator<Item = Box<F>>>(iter: I) -> Self {
        Callback::Many(iter.into_iter().collect())
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Single(_) => f.write_str("Callback::Single"),
            Callback::Many(handlers) => write!(f, "Callback::Many({})", handlers.len()),
        }
    }
}

/// Invoke every handler in an optional slot. An empty slot is a no-op.
pub(crate) fn dispatch<F: ?Sized>(slot: Option<&Callback<F>>, mut invoke: impl FnMut(&F)) {
    let Some(callback) = slot else {
        return;
    };
    for handler in callback.handlers() {
        invoke(&**handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Handler = dyn Fn(&mut Vec<u32>);

    #[test]
    fn test_single_dispatches_once() {
        let slot: Callback<Handler> = Callback::from(Box::new(|log: &mut Vec<u32>| log.push(1)) as Box<Handler>);
        let mut log = Vec::new();
        dispatch(Some(&slot), |handler| handler(&mut log));
        assert_eq!(log, vec![1]);
        assert_eq!(slot.len(), 1);
    }

    #[test]
    fn test_push_preserves_order() {
        let slot: Callback<Handler> = Callback::from(Box::new(|log: &mut Vec<u32>| log.push(1)) as Box<Handler>)
            .push(Box::new(|log: &mut Vec<u32>| log.push(2)))
            .push(Box::new(|log: &mut Vec<u32>| log.push(3)));

        let mut log = Vec::new();
        dispatch(Some(&slot), |handler| handler(&mut log));
        assert_eq!(log, vec![1, 2, 3]);
        assert!(matches!(slot, Callback::Many(_)));
    }

    #[test]
    fn test_every_listed_handler_runs() {
        let hits = Rc::new(RefCell::new(0));
        let handlers: Vec<Box<dyn Fn()>> = (0..4)
            .map(|_| {
                let hits = hits.clone();
                Box::new(move || *hits.borrow_mut() += 1) as Box<dyn Fn()>
            })
            .collect();
        let slot = Callback::from(handlers);

        dispatch(Some(&slot), |handler| handler());
        assert_eq!(*hits.borrow(), 4);
    }

    #[test]
    fn test_empty_slot_is_noop() {
        let mut called = false;
        dispatch::<dyn Fn()>(None, |_| called = true);
        assert!(!called);

        let empty = Callback::from(Vec::<Box<dyn Fn()>>::new());
        assert!(empty.is_empty());
        dispatch(Some(&empty), |_| called = true);
        assert!(!called);
    }
}
