//! Value type for nodes of a field-mapping tree.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::MappingTree;

/// A node in an index mapping.
///
/// Either an internal node (`Tree`) or a leaf. Lists are leaves: the audit
/// never descends into them, the same way the engine treats array-valued
/// mapping parameters such as `copy_to`.
#[derive(Debug, Clone)]
pub enum MappingValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<MappingValue>),
    Tree(MappingTree),
}

// ============================================================================
// Type checking
// ============================================================================

impl MappingValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            MappingValue::Null => "null",
            MappingValue::Bool(_) => "boolean",
            MappingValue::Int(_) => "integer",
            MappingValue::Float(_) => "float",
            MappingValue::String(_) => "string",
            MappingValue::List(_) => "list",
            MappingValue::Tree(_) => "tree",
        }
    }

    /// Attempt to borrow as a subtree
    pub fn as_tree(&self) -> Option<&MappingTree> {
        match self {
            MappingValue::Tree(t) => Some(t),
            _ => None,
        }
    }

    /// Attempt to extract as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MappingValue::Int(i) => Some(*i),
            MappingValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MappingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a direct child when this value is a tree.
    pub fn get(&self, key: &str) -> Option<&MappingValue> {
        self.as_tree().and_then(|t| t.get(key))
    }
}

// ============================================================================
// Equality
// ============================================================================

/// Numbers compare by value across `Int` and `Float`, so a mapping that
/// was decoded as `256.0` still equals one decoded as `256`.
impl PartialEq for MappingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MappingValue::Null, MappingValue::Null) => true,
            (MappingValue::Bool(a), MappingValue::Bool(b)) => a == b,
            (MappingValue::Int(a), MappingValue::Int(b)) => a == b,
            (MappingValue::Float(a), MappingValue::Float(b)) => a == b,
            (MappingValue::Int(a), MappingValue::Float(b))
            | (MappingValue::Float(b), MappingValue::Int(a)) => (*a as f64) == *b,
            (MappingValue::String(a), MappingValue::String(b)) => a == b,
            (MappingValue::List(a), MappingValue::List(b)) => a == b,
            (MappingValue::Tree(a), MappingValue::Tree(b)) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for MappingValue { fn from(v: bool) -> Self { MappingValue::Bool(v) } }
impl From<i32> for MappingValue { fn from(v: i32) -> Self { MappingValue::Int(v as i64) } }
impl From<i64> for MappingValue { fn from(v: i64) -> Self { MappingValue::Int(v) } }
impl From<f64> for MappingValue { fn from(v: f64) -> Self { MappingValue::Float(v) } }
impl From<String> for MappingValue { fn from(v: String) -> Self { MappingValue::String(v) } }
impl From<&str> for MappingValue { fn from(v: &str) -> Self { MappingValue::String(v.to_owned()) } }
impl From<MappingTree> for MappingValue { fn from(v: MappingTree) -> Self { MappingValue::Tree(v) } }
impl<T: Into<MappingValue>> From<Option<T>> for MappingValue {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(MappingValue::Null) }
}

/// Key order follows the `serde_json::Map` handed in. Without serde_json's
/// `preserve_order` feature that map is sorted, so trees built here are in
/// key order, not document order. Deserialize straight into `MappingValue`
/// to keep document order.
impl From<serde_json::Value> for MappingValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => MappingValue::Null,
            Json::Bool(b) => MappingValue::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => MappingValue::Int(i),
                None => MappingValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => MappingValue::String(s),
            Json::Array(items) => MappingValue::List(items.into_iter().map(Into::into).collect()),
            Json::Object(map) => MappingValue::Tree(map.into_iter().collect()),
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for MappingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingValue::Null => write!(f, "null"),
            MappingValue::Bool(b) => write!(f, "{b}"),
            MappingValue::Int(i) => write!(f, "{i}"),
            MappingValue::Float(v) => write!(f, "{v}"),
            MappingValue::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            MappingValue::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            MappingValue::Tree(t) => write!(f, "{t}"),
        }
    }
}

// ============================================================================
// Serde (untagged, JSON-shaped)
// ============================================================================

impl Serialize for MappingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MappingValue::Null => serializer.serialize_unit(),
            MappingValue::Bool(b) => serializer.serialize_bool(*b),
            MappingValue::Int(i) => serializer.serialize_i64(*i),
            MappingValue::Float(v) => serializer.serialize_f64(*v),
            MappingValue::String(s) => serializer.serialize_str(s),
            MappingValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            MappingValue::Tree(t) => t.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MappingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MappingValueVisitor)
    }
}

struct MappingValueVisitor;

impl<'de> Visitor<'de> for MappingValueVisitor {
    type Value = MappingValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<MappingValue, E> { Ok(MappingValue::Null) }
    fn visit_none<E: de::Error>(self) -> Result<MappingValue, E> { Ok(MappingValue::Null) }
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MappingValue, E> { Ok(MappingValue::Bool(v)) }
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MappingValue, E> { Ok(MappingValue::Int(v)) }
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MappingValue, E> { Ok(MappingValue::Float(v)) }
    fn visit_str<E: de::Error>(self, v: &str) -> Result<MappingValue, E> { Ok(MappingValue::from(v)) }
    fn visit_string<E: de::Error>(self, v: String) -> Result<MappingValue, E> { Ok(MappingValue::String(v)) }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MappingValue, E> {
        Ok(match i64::try_from(v) {
            Ok(i) => MappingValue::Int(i),
            Err(_) => MappingValue::Float(v as f64),
        })
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<MappingValue, D::Error> {
        MappingValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MappingValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(MappingValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MappingValue, A::Error> {
        let mut tree = MappingTree::new();
        while let Some((key, value)) = map.next_entry::<String, MappingValue>()? {
            tree.insert(key, value);
        }
        Ok(MappingValue::Tree(tree))
    }
}
