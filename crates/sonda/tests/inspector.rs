// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end inspector behaviour over every backend

use proptest::prelude::*;
use sonda::{
    DeepEqualOptions, Document, Encoding, Inspector, JsonVector, LoopCtl, Looper, Node,
    NodeType, Op, Registry, Source, SourceMut, UrlVector, VectorInspector, XmlVector, init,
    json_pool, url_pool, xml_pool,
};

const VEC_SRC0: &[u8] = br##"{"color":{"value":"#c3c3c3"},"bgcolor":{"value":"#ffffff"},"inner_margin":{"value":15},"inner_padding":{"value":5},"border":{"value":"1 px solid #ccc"},"need_desc":{"value":true}}"##;
const VEC_SRC1: &[u8] = br##"{"color":{"value":"#c3c3c3"},"bgcolor":{"value":"#ffffff"},"inner_margin":{"value":15},"inner_padding":{"value":1500},"border":{"value":"1 px solid #ccc"},"need_desc":{"value":true}}"##;
const LOOP_SRC: &[u8] = br#"{"a":{"b":{"c":["foo","bar","string"]}}}"#;

const P0_COLOR: [&str; 2] = ["color", "value"];
const P0_MARGIN: [&str; 2] = ["inner_margin", "value"];
const P0_DESC: [&str; 2] = ["need_desc", "value"];

struct Expect<'e> {
    exp: &'e [(&'e str, &'e str)],
    key: String,
    val: String,
    seen: usize,
}

impl<'e> Expect<'e> {
    fn new(exp: &'e [(&'e str, &'e str)]) -> Self {
        Self {
            exp,
            key: String::new(),
            val: String::new(),
            seen: 0,
        }
    }
}

impl<'a> Looper<'a> for Expect<'_> {
    fn require_key(&self) -> bool {
        true
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn set_val(&mut self, val: Node<'a>, ins: &dyn Inspector) {
        assert_eq!(ins.type_name(), "vector");
        self.val = val.string().to_string();
    }

    fn iterate(&mut self) -> LoopCtl {
        let (key, val) = self.exp[self.seen];
        assert_eq!(self.key, key, "key mismatch");
        assert_eq!(self.val, val, "val mismatch");
        self.seen += 1;
        LoopCtl::Continue
    }
}

#[test]
fn get() {
    let ins = VectorInspector::new();
    let vec = JsonVector::from_slice(VEC_SRC0).unwrap();
    let src = Source::from(&vec);

    let node = ins.get(src, &P0_COLOR).unwrap().unwrap();
    assert_eq!(node.string(), "#c3c3c3");

    let node = ins.get(src, &P0_MARGIN).unwrap().unwrap();
    assert_eq!(node.int(), Ok(15));

    let node = ins.get(src, &P0_DESC).unwrap().unwrap();
    assert!(node.bool());
}

#[test]
fn compare() {
    let ins = VectorInspector::new();
    let vec = JsonVector::from_slice(VEC_SRC0).unwrap();
    let src = Source::from(&vec);

    assert!(ins.compare(src, Op::LessThan, "18", &P0_MARGIN).unwrap());
    assert!(ins.compare(src, Op::GreaterThan, "13", &P0_MARGIN).unwrap());
    assert!(ins.compare(src, Op::Equal, "15", &P0_MARGIN).unwrap());
    assert!(ins.compare(src, Op::Equal, "#c3c3c3", &P0_COLOR).unwrap());
    assert!(ins.compare(src, Op::Equal, "true", &P0_DESC).unwrap());
}

#[test]
fn deep_equal_same_source() {
    let ins = VectorInspector::new();
    let a = JsonVector::from_slice(VEC_SRC0).unwrap();
    let b = JsonVector::from_slice(VEC_SRC0).unwrap();
    assert!(ins.deep_equal(Source::from(&a), Source::from(&b)));
}

#[test]
fn deep_equal_one_leaf_differs() {
    let ins = VectorInspector::new();
    let a = JsonVector::from_slice(VEC_SRC0).unwrap();
    let b = JsonVector::from_slice(VEC_SRC1).unwrap();
    assert!(!ins.deep_equal(Source::from(&a), Source::from(&b)));

    let opts = DeepEqualOptions::new().exclude("inner_padding.value");
    assert!(ins.deep_equal_with_options(Source::from(&a), Source::from(&b), Some(&opts)));
}

#[test]
fn loop_over() {
    let ins = VectorInspector::new();
    let vec = JsonVector::from_slice(LOOP_SRC).unwrap();
    let exp = [("0", "foo"), ("1", "bar"), ("2", "string")];
    let mut it = Expect::new(&exp);
    ins.loop_over(Source::from(&vec), &mut it, &["a", "b", "c"])
        .unwrap();
    assert_eq!(it.seen, 3);
}

#[test]
fn loop_over_nested_inspection() {
    struct Margins<'a> {
        nodes: Vec<Node<'a>>,
    }

    impl<'a> Looper<'a> for Margins<'a> {
        fn require_key(&self) -> bool {
            false
        }

        fn set_key(&mut self, _key: &str) {
            unreachable!("keys were not requested");
        }

        fn set_val(&mut self, val: Node<'a>, ins: &dyn Inspector) {
            let value = ins.get(Source::from(val), &["value"]).unwrap().unwrap();
            if value.typ() == NodeType::Number
                && ins
                    .compare(Source::from(value), Op::GreaterOrEqual, "10", &[])
                    .unwrap()
            {
                self.nodes.push(val);
            }
        }

        fn iterate(&mut self) -> LoopCtl {
            LoopCtl::ContinueLoop
        }
    }

    let ins = VectorInspector::new();
    let vec = JsonVector::from_slice(VEC_SRC1).unwrap();
    let mut m = Margins { nodes: Vec::new() };
    ins.loop_over(Source::from(&vec), &mut m, &[]).unwrap();
    let keys: Vec<_> = m.nodes.iter().filter_map(Node::key).collect();
    assert_eq!(keys, vec!["inner_margin", "inner_padding"]);
}

#[test]
fn same_questions_across_backends() {
    let ins = VectorInspector::new();
    let xml = XmlVector::from_slice(
        br##"<style><color>#c3c3c3</color><inner_margin>15</inner_margin></style>"##,
    )
    .unwrap();
    let url = UrlVector::from_slice(b"?color=%23c3c3c3&inner_margin=15").unwrap();

    for src in [Source::from(&xml), Source::from(&url)] {
        assert!(ins.compare(src, Op::Equal, "#c3c3c3", &["color"]).unwrap());
        // Text values compare as strings, so "15" sorts before "9".
        assert!(ins.compare(src, Op::LessThan, "9", &["inner_margin"]).unwrap());
        assert_eq!(ins.get(src, &["nope"]).unwrap().unwrap().typ(), NodeType::Null);
    }
    assert!(ins.deep_equal(Source::from(&xml), Source::from(&url)));
}

#[test]
fn deep_nesting_is_bounded_at_parse() {
    fn nested(open: &str, close: &str, depth: usize) -> Vec<u8> {
        [open.repeat(depth), close.repeat(depth)].concat().into_bytes()
    }

    let ins = VectorInspector::new();
    assert!(ins.unmarshal(&nested(r#"<a x="1">"#, "</a>", 20_000), Encoding::Xml).is_err());
    assert!(ins.unmarshal(&nested("[", "]", 20_000), Encoding::Json).is_err());

    let deepest = nested(r#"<a x="1">"#, "</a>", sonda::formats::xml::MAX_DEPTH);
    let a = ins.unmarshal(&deepest, Encoding::Xml).unwrap();
    let b = ins.unmarshal(&deepest, Encoding::Xml).unwrap();
    assert!(ins.deep_equal(a.as_source(), b.as_source()));
    let opts = DeepEqualOptions::new().exclude("a.a.@x");
    assert!(ins.deep_equal_with_options(a.as_source(), b.as_source(), Some(&opts)));
    let mut out = Vec::new();
    a.root().marshal_to(&mut out);
    assert!(out.starts_with(br#"{"@x":"1","a":{"#));
}

#[test]
fn unmarshal_then_reset() {
    let ins = VectorInspector::new();
    let mut doc = ins.unmarshal(VEC_SRC0, Encoding::Json).unwrap();
    assert!(ins.compare(doc.as_source(), Op::Equal, "15", &P0_MARGIN).unwrap());
    ins.reset(SourceMut::from(&mut doc)).unwrap();
    assert_eq!(ins.length(doc.as_source(), &[]).unwrap(), 0);
    assert!(ins.unmarshal(b"", Encoding::Toml).is_err());
}

#[test]
fn registry_hooks() {
    let mut registry = Registry::new();
    init(&mut registry);

    let vec = JsonVector::from_slice(VEC_SRC0).unwrap();
    let ins = registry.inspector("vector").unwrap();
    let color = ins.get(Source::from(&vec), &P0_COLOR).unwrap().unwrap();

    let mut buf = b"color: ".to_vec();
    registry.to_bytes(&mut buf, Source::from(color)).unwrap();
    assert_eq!(buf, b"color: #c3c3c3");

    let empty = registry.empty_check("vector_node").unwrap();
    let missing = ins.get(Source::from(&vec), &["nope"]).unwrap().unwrap();
    assert!(empty(Source::from(missing)));
    assert!(!empty(Source::from(color)));
}

#[test]
fn pool_round_trip_is_empty() {
    let mut doc = json_pool().acquire();
    doc.parse(VEC_SRC0).unwrap();
    json_pool().release(doc);
    let doc = json_pool().acquire();
    assert!(doc.root().is_null());
    assert!(doc.get(&P0_COLOR).is_null());

    let mut doc = xml_pool().acquire();
    doc.parse(b"<a>1</a>").unwrap();
    doc.reset_in_place();
    assert!(doc.vector().is_empty());

    let mut doc = url_pool().acquire();
    doc.parse(b"https://example.com/?a=1").unwrap();
    drop(doc);
    let doc = url_pool().acquire();
    assert!(doc.host().is_none());
}

proptest! {
    #[test]
    fn prop_deep_equal_self(values in prop::collection::vec("[a-z]{0,6}", 0..10)) {
        let ins = VectorInspector::new();
        let body: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
        let src = format!(r#"{{"list":[{}],"n":{}}}"#, body.join(","), values.len());
        let doc = JsonVector::from_slice(src.as_bytes()).unwrap();
        prop_assert!(ins.deep_equal(Source::from(&doc), Source::from(&doc)));
        prop_assert_eq!(ins.length(Source::from(&doc), &["list"]).unwrap(), values.len());
    }

    #[test]
    fn prop_numeric_self_compare(n in any::<i64>()) {
        let ins = VectorInspector::new();
        let doc = JsonVector::from_slice(format!(r#"{{"v":{n}}}"#).as_bytes()).unwrap();
        let text = n.to_string();
        for op in Op::ALL {
            prop_assert_eq!(
                ins.compare(Source::from(&doc), op, &text, &["v"]).unwrap(),
                op.is_reflexive()
            );
        }
    }
}
