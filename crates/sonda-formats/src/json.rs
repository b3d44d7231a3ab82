// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON backend
//!
//! The document is deserialized straight into the arena with a
//! [`DeserializeSeed`], so no intermediate `serde_json::Value` is built and
//! object members keep their source order. Numbers are stored in their
//! shortest textual form.

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use sonda_core::{Document, Encoding, NodeId, NodeType, Result, SondaError, Vector};
use std::fmt;

/// JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonVector {
    vec: Vector,
}

impl JsonVector {
    /// Create an empty JSON document
    #[must_use]
    pub const fn new() -> Self {
        Self { vec: Vector::new() }
    }

    /// Parse `src` into a new document
    ///
    /// # Errors
    ///
    /// Returns [`SondaError::Parse`] when `src` is not valid JSON.
    pub fn from_slice(src: &[u8]) -> Result<Self> {
        let mut doc = Self::new();
        doc.parse(src)?;
        Ok(doc)
    }
}

impl Document for JsonVector {
    fn encoding(&self) -> Encoding {
        Encoding::Json
    }

    fn parse(&mut self, src: &[u8]) -> Result<()> {
        self.vec.reset();
        let mut de = serde_json::Deserializer::from_slice(src);
        let built = NodeSeed {
            vec: &mut self.vec,
            parent: None,
            key: None,
        }
        .deserialize(&mut de)
        .and_then(|_| de.end());
        if let Err(err) = built {
            self.vec.reset();
            return Err(SondaError::parse(Encoding::Json, err));
        }
        Ok(())
    }

    fn vector(&self) -> &Vector {
        &self.vec
    }

    fn vector_mut(&mut self) -> &mut Vector {
        &mut self.vec
    }
}

struct NodeSeed<'v, 'k> {
    vec: &'v mut Vector,
    parent: Option<NodeId>,
    key: Option<&'k str>,
}

impl NodeSeed<'_, '_> {
    fn add(&mut self, typ: NodeType, value: &[u8]) -> NodeId {
        let key = self.key.map(str::as_bytes);
        match self.parent {
            Some(parent) => self.vec.add_child(parent, typ, key, value),
            None => self.vec.add_root(typ, key, value),
        }
    }
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_, '_> {
    type Value = NodeId;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_, '_> {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(mut self) -> std::result::Result<Self::Value, E> {
        Ok(self.add(NodeType::Null, b""))
    }

    fn visit_none<E: de::Error>(mut self) -> std::result::Result<Self::Value, E> {
        Ok(self.add(NodeType::Null, b""))
    }

    fn visit_bool<E: de::Error>(mut self, v: bool) -> std::result::Result<Self::Value, E> {
        let text: &[u8] = if v { b"true" } else { b"false" };
        Ok(self.add(NodeType::Bool, text))
    }

    fn visit_i64<E: de::Error>(mut self, v: i64) -> std::result::Result<Self::Value, E> {
        let mut buf = itoa::Buffer::new();
        Ok(self.add(NodeType::Number, buf.format(v).as_bytes()))
    }

    fn visit_u64<E: de::Error>(mut self, v: u64) -> std::result::Result<Self::Value, E> {
        let mut buf = itoa::Buffer::new();
        Ok(self.add(NodeType::Number, buf.format(v).as_bytes()))
    }

    fn visit_f64<E: de::Error>(mut self, v: f64) -> std::result::Result<Self::Value, E> {
        let mut buf = ryu::Buffer::new();
        Ok(self.add(NodeType::Number, buf.format(v).as_bytes()))
    }

    fn visit_str<E: de::Error>(mut self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(self.add(NodeType::String, v.as_bytes()))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut this = self;
        let id = this.add(NodeType::Array, b"");
        while seq
            .next_element_seed(NodeSeed {
                vec: &mut *this.vec,
                parent: Some(id),
                key: None,
            })?
            .is_some()
        {}
        Ok(id)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut this = self;
        let id = this.add(NodeType::Object, b"");
        while let Some(member) = map.next_key::<String>()? {
            map.next_value_seed(NodeSeed {
                vec: &mut *this.vec,
                parent: Some(id),
                key: Some(member.as_str()),
            })?;
        }
        Ok(id)
    }
}
