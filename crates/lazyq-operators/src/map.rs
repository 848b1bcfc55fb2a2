//! Projection operators: `map` (select), `map_indexed`, `flat_map` (select many).

use std::rc::Rc;

use lazyq_cursor::{BoxedEnumerator, Enumerator, EnumeratorExt, Step};

use crate::enumerable::Enumerable;

impl<T: Clone + 'static> Enumerable<T> {
    /// 1:1 transform. The selector runs only for elements pulled downstream.
    #[doc(alias = "select")]
    pub fn map<U, F>(&self, selector: F) -> Enumerable<U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        let source = self.clone();
        let selector = Rc::new(selector);
        self.derive(move || -> Step<U> {
            let mut cursor = source.cursor();
            let selector = Rc::clone(&selector);
            Box::new(move || {
                if cursor.advance() {
                    cursor.current().map(|item| selector(item))
                } else {
                    None
                }
            })
        })
    }

    /// Like `map`, with the zero-based position of each element.
    pub fn map_indexed<U, F>(&self, selector: F) -> Enumerable<U>
    where
        U: 'static,
        F: Fn(&T, usize) -> U + 'static,
    {
        let source = self.clone();
        let selector = Rc::new(selector);
        self.derive(move || -> Step<U> {
            let mut cursor = source.cursor();
            let selector = Rc::clone(&selector);
            let mut index = 0;
            Box::new(move || {
                if !cursor.advance() {
                    return None;
                }
                let position = index;
                index += 1;
                cursor.current().map(|item| selector(item, position))
            })
        })
    }

    /// Flatten the sequences produced by `selector`, draining each inner
    /// sequence before pulling the next outer element.
    #[doc(alias = "select_many")]
    pub fn flat_map<U, F>(&self, selector: F) -> Enumerable<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> Enumerable<U> + 'static,
    {
        self.flat_map_with(selector, |_, inner| inner)
    }

    /// `flat_map` with a result projection over (outer, inner) pairs.
    pub fn flat_map_with<U, R, F, S>(&self, collection: F, result: S) -> Enumerable<R>
    where
        U: Clone + 'static,
        R: 'static,
        F: Fn(&T) -> Enumerable<U> + 'static,
        S: Fn(&T, U) -> R + 'static,
    {
        let source = self.clone();
        let collection = Rc::new(collection);
        let result = Rc::new(result);
        self.derive(move || -> Step<R> {
            let mut outer = source.cursor();
            let collection = Rc::clone(&collection);
            let result = Rc::clone(&result);
            let mut inner: Option<(T, BoxedEnumerator<U>)> = None;
            Box::new(move || loop {
                if let Some((item, cursor)) = inner.as_mut() {
                    if let Some(value) = cursor.next_value() {
                        return Some(result(&*item, value));
                    }
                }
                let item = outer.next_value()?;
                let cursor = collection(&item).cursor();
                inner = Some((item, cursor));
            })
        })
    }
}
