//! Filtering operators: `filter` (where), `filter_indexed`, `filter_map`, `of_type`.

use std::any::Any;
use std::rc::Rc;

use lazyq_cursor::{Enumerator, Step};

use crate::enumerable::Enumerable;

impl<T: Clone + 'static> Enumerable<T> {
    /// Elements for which `predicate` holds. The predicate runs exactly once
    /// per upstream element pulled through this stage.
    #[doc(alias = "where")]
    pub fn filter<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let predicate = Rc::clone(&predicate);
            Box::new(move || {
                while cursor.advance() {
                    if let Some(item) = cursor.current() {
                        if predicate(item) {
                            return Some(item.clone());
                        }
                    }
                }
                None
            })
        })
    }

    /// Like `filter`, with the zero-based position of each upstream element.
    pub fn filter_indexed<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let predicate = Rc::clone(&predicate);
            let mut index = 0;
            Box::new(move || {
                while cursor.advance() {
                    let position = index;
                    index += 1;
                    if let Some(item) = cursor.current() {
                        if predicate(item, position) {
                            return Some(item.clone());
                        }
                    }
                }
                None
            })
        })
    }

    /// Filter and project in one stage; `None` drops the element.
    pub fn filter_map<U, F>(&self, f: F) -> Enumerable<U>
    where
        U: 'static,
        F: Fn(&T) -> Option<U> + 'static,
    {
        let source = self.clone();
        let f = Rc::new(f);
        self.derive(move || -> Step<U> {
            let mut cursor = source.cursor();
            let f = Rc::clone(&f);
            Box::new(move || {
                while cursor.advance() {
                    if let Some(mapped) = cursor.current().and_then(|item| f(item)) {
                        return Some(mapped);
                    }
                }
                None
            })
        })
    }
}

impl Enumerable<Rc<dyn Any>> {
    /// Elements whose runtime type is `U`, downcast and cloned out.
    pub fn of_type<U: Clone + 'static>(&self) -> Enumerable<U> {
        self.filter_map(|item| item.downcast_ref::<U>().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_filter_keeps_matching() {
        let seq = Enumerable::from_vec(vec![1, 2, 3, 4, 5]);
        let out: Vec<_> = seq.filter(|x| *x > 2).iter().collect();
        assert_eq!(out, vec![3, 4, 5]);
    }

    #[test]
    fn test_filter_predicate_once_per_element() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let seq = Enumerable::from_vec(vec![1, 2, 3, 4]).filter(move |x| {
            counter.set(counter.get() + 1);
            x % 2 == 0
        });
        assert_eq!(calls.get(), 0);

        let mut cursor = seq.cursor();
        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_filter_indexed_positions() {
        let seq = Enumerable::from_vec(vec!["a", "b", "c", "d"]);
        let out: Vec<_> = seq.filter_indexed(|_, i| i % 2 == 1).iter().collect();
        assert_eq!(out, vec!["b", "d"]);
    }

    #[test]
    fn test_of_type_downcasts() {
        let mixed: Vec<Rc<dyn Any>> = vec![
            Rc::new(1_i32),
            Rc::new("two"),
            Rc::new(3_i32),
            Rc::new(4.0_f64),
        ];
        let ints: Vec<i32> = Enumerable::from_vec(mixed).of_type::<i32>().iter().collect();
        assert_eq!(ints, vec![1, 3]);
    }
}
