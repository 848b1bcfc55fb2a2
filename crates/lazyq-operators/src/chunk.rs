//! Chunking: fixed-size batches of consecutive elements.

use lazyq_core::{Error, Result};
use lazyq_cursor::{BoxedEnumerator, EnumeratorExt, Step};

use crate::enumerable::Enumerable;

/// Pull up to `size` elements into a fresh buffer.
fn fill<T: Clone>(cursor: &mut BoxedEnumerator<T>, size: usize, capacity: usize) -> Vec<T> {
    let mut buffer = Vec::with_capacity(size.min(capacity));
    while buffer.len() < size {
        match cursor.next_value() {
            Some(item) => buffer.push(item),
            None => break,
        }
    }
    buffer
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::out_of_range("size", size, "must be greater than zero"));
    }
    Ok(())
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Consecutive batches of `size` elements; a short final batch is kept.
    pub fn chunk(&self, size: usize) -> Result<Enumerable<Vec<T>>> {
        check_size(size)?;
        let source = self.clone();
        let capacity = self.capacity_hint().max(1);
        Ok(self.derive(move || -> Step<Vec<T>> {
            let mut cursor = source.cursor();
            Box::new(move || {
                let buffer = fill(&mut cursor, size, capacity);
                (!buffer.is_empty()).then_some(buffer)
            })
        }))
    }

    /// Like `chunk`, but a short final batch is replaced by `default`
    /// (`None` when no default is given).
    pub fn chunk_or_default(
        &self,
        size: usize,
        default: Option<Vec<T>>,
    ) -> Result<Enumerable<Option<Vec<T>>>> {
        check_size(size)?;
        let source = self.clone();
        let capacity = self.capacity_hint().max(1);
        Ok(self.derive(move || -> Step<Option<Vec<T>>> {
            let mut cursor = source.cursor();
            let default = default.clone();
            Box::new(move || {
                let buffer = fill(&mut cursor, size, capacity);
                if buffer.is_empty() {
                    None
                } else if buffer.len() < size {
                    Some(default.clone())
                } else {
                    Some(Some(buffer))
                }
            })
        }))
    }
}
