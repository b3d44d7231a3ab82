// SPDX-License-Identifier: MIT OR Apache-2.0
//! Iteration adapter
//!
//! Template `range` blocks implement [`Looper`]; [`iterate`] feeds it the
//! children of a container one at a time.

use crate::inspector::{Inspector, VectorInspector};
use sonda_core::{LoopCtl, Node};

/// Callback driven over the children of a container
pub trait Looper<'a> {
    /// Whether [`Looper::set_key`] should be called before each element
    fn require_key(&self) -> bool;

    /// Receive the position of the next element, in decimal
    fn set_key(&mut self, key: &str);

    /// Receive the next element and an inspector able to read it
    fn set_val(&mut self, val: Node<'a>, ins: &dyn Inspector);

    /// Process the element received through the setters
    fn iterate(&mut self) -> LoopCtl;
}

/// Drive `looper` over the children of `node` in document order.
///
/// Does nothing when `node` is not a container. [`LoopCtl::Break`] stops the
/// iteration; `Continue` and `ContinueLoop` move on to the next child.
pub fn iterate<'a>(node: Node<'a>, looper: &mut dyn Looper<'a>) {
    if !node.is_container() {
        return;
    }
    let ins = VectorInspector::new();
    let mut key = itoa::Buffer::new();
    for (i, child) in node.children().enumerate() {
        if looper.require_key() {
            looper.set_key(key.format(i));
        }
        looper.set_val(child, &ins);
        if looper.iterate() == LoopCtl::Break {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sonda_core::Document;
    use sonda_formats::JsonVector;

    #[derive(Default)]
    struct Collect {
        keys: bool,
        stop_after: Option<usize>,
        key: String,
        seen: Vec<(String, String)>,
        type_names: Vec<&'static str>,
    }

    impl<'a> Looper<'a> for Collect {
        fn require_key(&self) -> bool {
            self.keys
        }

        fn set_key(&mut self, key: &str) {
            self.key.clear();
            self.key.push_str(key);
        }

        fn set_val(&mut self, val: Node<'a>, ins: &dyn Inspector) {
            self.seen.push((self.key.clone(), val.to_string()));
            self.type_names.push(ins.type_name());
        }

        fn iterate(&mut self) -> LoopCtl {
            match self.stop_after {
                Some(n) if self.seen.len() >= n => LoopCtl::Break,
                Some(_) => LoopCtl::ContinueLoop,
                None => LoopCtl::Continue,
            }
        }
    }

    const LOOP_SRC: &[u8] = br#"{"a":{"b":{"c":["foo","bar","string"]}}}"#;

    #[test]
    fn test_keys_and_values_in_order() {
        let doc = JsonVector::from_slice(LOOP_SRC).unwrap();
        let mut l = Collect {
            keys: true,
            ..Collect::default()
        };
        iterate(doc.get(&["a", "b", "c"]), &mut l);
        let expected = [("0", "foo"), ("1", "bar"), ("2", "string")];
        let got: Vec<_> = l.seen.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(got, expected);
        assert_eq!(l.type_names, vec!["vector"; 3]);
    }

    #[test]
    fn test_keys_skipped_when_not_required() {
        let doc = JsonVector::from_slice(LOOP_SRC).unwrap();
        let mut l = Collect::default();
        iterate(doc.get(&["a", "b", "c"]), &mut l);
        assert!(l.seen.iter().all(|(k, _)| k.is_empty()));
        assert_eq!(l.seen.len(), 3);
    }

    #[test]
    fn test_break_stops_and_continue_loop_does_not() {
        let doc = JsonVector::from_slice(LOOP_SRC).unwrap();
        let mut l = Collect {
            keys: true,
            stop_after: Some(2),
            ..Collect::default()
        };
        iterate(doc.get(&["a", "b", "c"]), &mut l);
        assert_eq!(l.seen.len(), 2);
        assert_eq!(l.seen[1].1, "bar");
    }

    #[test]
    fn test_object_children_get_positional_keys() {
        let doc = JsonVector::from_slice(br#"{"x":1,"y":2}"#).unwrap();
        let mut l = Collect {
            keys: true,
            ..Collect::default()
        };
        iterate(doc.root(), &mut l);
        assert_eq!(l.seen, vec![("0".into(), "1".into()), ("1".into(), "2".into())]);
    }

    #[test]
    fn test_scalars_and_misses_are_no_ops() {
        let doc = JsonVector::from_slice(LOOP_SRC).unwrap();
        let mut l = Collect::default();
        iterate(doc.get(&["a", "b", "c", "0"]), &mut l);
        iterate(doc.get(&["nope"]), &mut l);
        assert!(l.seen.is_empty());
    }

    proptest! {
        #[test]
        fn prop_visits_every_child_once(values in prop::collection::vec(any::<i32>(), 0..40)) {
            let body: Vec<String> = values.iter().map(ToString::to_string).collect();
            let src = format!("[{}]", body.join(","));
            let doc = JsonVector::from_slice(src.as_bytes()).unwrap();
            let mut l = Collect { keys: true, ..Collect::default() };
            iterate(doc.root(), &mut l);
            prop_assert_eq!(l.seen.len(), values.len());
            for (i, (key, val)) in l.seen.iter().enumerate() {
                prop_assert_eq!(key, &i.to_string());
                prop_assert_eq!(val, &body[i]);
            }
        }

        #[test]
        fn prop_break_stops_early(len in 1_usize..30, stop in 1_usize..30) {
            let src = format!("[{}]", vec!["0"; len].join(","));
            let doc = JsonVector::from_slice(src.as_bytes()).unwrap();
            let mut l = Collect { stop_after: Some(stop), ..Collect::default() };
            iterate(doc.root(), &mut l);
            prop_assert_eq!(l.seen.len(), len.min(stop));
        }
    }
}
