use std::{borrow::Cow, slice, vec};

use xitca_unsafe_collection::bound_queue::stack::StackQueue;

use super::SmallStr;

/// Parameters bound by a matched route.
///
/// Keys are borrowed from the route and values from the matched path. Parameters declared by a
/// route but not reached by the path (an optional tail) are reported with an empty value.
#[derive(Debug)]
pub struct Params<'k, 'v> {
    keys: &'k [SmallStr],
    values: Values<'v>,
}

#[derive(Debug)]
enum Values<'v> {
    Inline(StackQueue<Cow<'v, str>, 2>),
    Heap(Vec<Cow<'v, str>>),
}

impl<'v> Values<'v> {
    fn len(&self) -> usize {
        match self {
            Self::Inline(q) => q.len(),
            Self::Heap(v) => v.len(),
        }
    }

    fn get(&self, idx: usize) -> Option<&Cow<'v, str>> {
        match self {
            Self::Inline(q) => q.iter().nth(idx),
            Self::Heap(v) => v.get(idx),
        }
    }
}

impl<'k, 'v> Params<'k, 'v> {
    pub(crate) const fn new() -> Self {
        Self {
            keys: &[],
            values: Values::Inline(StackQueue::new()),
        }
    }

    /// Returns the number of parameters declared by the matched route.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the matched route declares no parameter.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the value bound to the given key.
    ///
    /// A declared parameter that the path did not reach returns `Some("")`. A key the route never
    /// declared returns `None`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.keys
            .iter()
            .position(|k| k.as_ref() == key)
            .map(|idx| self.values.get(idx).map(Cow::as_ref).unwrap_or(""))
    }

    /// Iterate over key value pairs in declaration order.
    pub fn iter(&self) -> Iter<'_, 'v> {
        Iter {
            keys: self.keys.iter(),
            values: &self.values,
            idx: 0,
        }
    }

    pub(crate) fn push(&mut self, value: Cow<'v, str>) {
        #[cold]
        #[inline(never)]
        fn drain_to_vec<T, const LEN: usize>(value: T, q: &mut StackQueue<T, LEN>) -> Vec<T> {
            // respect vector's exponential growth practice.
            let mut v = Vec::with_capacity(LEN * 2);
            while let Some(value) = q.pop_front() {
                v.push(value);
            }
            v.push(value);
            v
        }

        match self.values {
            Values::Inline(ref mut q) => {
                if let Err(e) = q.push_back(value) {
                    self.values = Values::Heap(drain_to_vec(e.into_inner(), q));
                }
            }
            Values::Heap(ref mut v) => v.push(value),
        }
    }

    // attach the leaf's parameter names once the walk reached it.
    pub(crate) fn bind(&mut self, keys: &'k [SmallStr]) {
        debug_assert!(keys.len() >= self.values.len());
        self.keys = keys;
    }
}

/// Borrowed iterator of [Params].
pub struct Iter<'a, 'v> {
    keys: slice::Iter<'a, SmallStr>,
    values: &'a Values<'v>,
    idx: usize,
}

impl<'a, 'v> Iterator for Iter<'a, 'v> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.values.get(self.idx).map(Cow::as_ref).unwrap_or("");
        self.idx += 1;
        Some((key.as_ref(), value))
    }
}

impl<'k, 'v> IntoIterator for Params<'k, 'v> {
    type Item = (&'k str, Cow<'v, str>);
    type IntoIter = ParamsIntoIter<'k, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        let kind = match self.values {
            Values::Inline(q) => ParamsIntoIterKind::Inline(q),
            Values::Heap(v) => ParamsIntoIterKind::Heap(v.into_iter()),
        };

        ParamsIntoIter {
            keys: self.keys.iter(),
            kind,
        }
    }
}

pub struct ParamsIntoIter<'k, 'v> {
    keys: slice::Iter<'k, SmallStr>,
    kind: ParamsIntoIterKind<'v>,
}

enum ParamsIntoIterKind<'v> {
    Inline(StackQueue<Cow<'v, str>, 2>),
    Heap(vec::IntoIter<Cow<'v, str>>),
}

impl<'k, 'v> Iterator for ParamsIntoIter<'k, 'v> {
    type Item = (&'k str, Cow<'v, str>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = match self.kind {
            ParamsIntoIterKind::Inline(ref mut q) => q.pop_front(),
            ParamsIntoIterKind::Heap(ref mut iter) => iter.next(),
        };
        Some((key.as_ref(), value.unwrap_or(Cow::Borrowed(""))))
    }
}
