// Suggestion enumeration adapter.
//
// Bridges the native next-or-sentinel enumeration to a Rust iterator and
// decodes each element from the configured encoding. The native resource is
// owned by the wrapped `RawEnumeration` and released by its `Drop`, so it
// goes away exactly once whether the loop runs to the sentinel, stops early
// on a decode error, or never yields at all.

use aspell_core::{Codec, Result};

use crate::backend::RawEnumeration;

/// Fused, non-restartable iterator over a native enumeration.
pub struct Enumeration<E> {
    raw: E,
    finished: bool,
}

impl<E: RawEnumeration> Enumeration<E> {
    pub fn new(raw: E) -> Self {
        Self {
            raw,
            finished: false,
        }
    }
}

impl<E: RawEnumeration> Iterator for Enumeration<E> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let element = self.raw.next_element();
        if element.is_none() {
            self.finished = true;
        }
        element
    }
}

impl<E: RawEnumeration> std::iter::FusedIterator for Enumeration<E> {}

/// Drain `raw`, decoding every element with `codec`, preserving order.
pub fn decode_all<E: RawEnumeration>(raw: E, codec: Codec) -> Result<Vec<String>> {
    Enumeration::new(raw)
        .map(|bytes| codec.decode(&bytes))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use aspell_core::AspellError;

    use super::*;

    /// Enumeration over canned byte strings that counts releases and pulls.
    struct Canned {
        items: VecDeque<Vec<u8>>,
        pulls: Rc<Cell<usize>>,
        releases: Rc<Cell<usize>>,
    }

    impl Canned {
        fn new(items: &[&[u8]]) -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
            let pulls = Rc::new(Cell::new(0));
            let releases = Rc::new(Cell::new(0));
            let canned = Self {
                items: items.iter().map(|i| i.to_vec()).collect(),
                pulls: Rc::clone(&pulls),
                releases: Rc::clone(&releases),
            };
            (canned, pulls, releases)
        }
    }

    impl RawEnumeration for Canned {
        fn next_element(&mut self) -> Option<Vec<u8>> {
            self.pulls.set(self.pulls.get() + 1);
            self.items.pop_front()
        }
    }

    impl Drop for Canned {
        fn drop(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    #[test]
    fn decodes_in_native_order() {
        let (raw, _, releases) = Canned::new(&[b"cookie", b"cooked", b"cook"]);
        let words = decode_all(raw, Codec::Utf8).unwrap();
        assert_eq!(words, ["cookie", "cooked", "cook"]);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn empty_enumeration_is_released() {
        let (raw, pulls, releases) = Canned::new(&[]);
        assert!(decode_all(raw, Codec::Utf8).unwrap().is_empty());
        assert_eq!(pulls.get(), 1);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn decode_failure_still_releases() {
        let (raw, pulls, releases) = Canned::new(&[b"ok", &[0xFF, 0xFE], b"never"]);
        let err = decode_all(raw, Codec::Utf8).unwrap_err();
        assert!(matches!(err, AspellError::Encoding { .. }));
        assert_eq!(pulls.get(), 2);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn sentinel_is_not_pulled_twice() {
        let (raw, pulls, _) = Canned::new(&[b"a"]);
        let mut iter = Enumeration::new(raw);
        assert_eq!(iter.next().as_deref(), Some(&b"a"[..]));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(pulls.get(), 2);
    }

    #[test]
    fn latin1_elements_are_decoded() {
        let (raw, _, _) = Canned::new(&[&[b'c', b'a', b'f', 0xE9]]);
        assert_eq!(decode_all(raw, Codec::Latin1).unwrap(), ["café"]);
    }
}
