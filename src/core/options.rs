//! Purpose: Carry the open-ended `options` side-channel attached to a payload.
//! Exports: `OptionsBag`.
//! Role: Opaque passthrough of named JSON values; no schema is imposed.
//! Invariants: Values are carried through unmodified from the wire.
//! Invariants: The bag never synthesizes defaults for absent keys.

use crate::core::error::{Error, ErrorKind};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsBag(Map<String, Value>);

impl OptionsBag {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Decode a wire `options` value. Anything other than a JSON object is malformed.
    pub(crate) fn from_wire(value: &Value, field: &str) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            _ => Err(Error::new(ErrorKind::Malformed)
                .with_message("options is not a JSON object")
                .with_field(field)),
        }
    }
}

impl From<Map<String, Value>> for OptionsBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<OptionsBag> for Map<String, Value> {
    fn from(bag: OptionsBag) -> Self {
        bag.0
    }
}
