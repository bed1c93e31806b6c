//! Nested exchange structure consumed by external renderers and uploaders.
//!
//! Each node becomes a five-element array:
//! `[name, address, count, meta, [children...]]`
//!
//! The address is emitted as a string: consumers that store numbers as
//! doubles would otherwise round full-width addresses without warning.

use crate::utils::error::ParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode(
    pub String,
    pub String,
    pub u64,
    pub IndexMap<String, u64>,
    pub Vec<SerializedNode>,
);

impl SerializedNode {
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Address exactly as emitted (decimal text)
    pub fn addr_text(&self) -> &str {
        &self.1
    }

    pub fn count(&self) -> u64 {
        self.2
    }

    pub fn meta(&self) -> &IndexMap<String, u64> {
        &self.3
    }

    pub fn children(&self) -> &[SerializedNode] {
        &self.4
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_shape() {
        let mut root = Node::with_count(1, "root", 2);
        root.add_child(2, "child").record_meta("jit");

        let json = root.serialize().to_json().unwrap();
        assert_eq!(
            json,
            r#"["root","1",2,{},[["child","2",1,{"jit":1},[]]]]"#
        );
    }

    #[test]
    fn test_full_width_address_is_text() {
        let node = Node::new(u64::MAX, "top");
        let json = node.serialize().to_json().unwrap();
        assert!(json.contains("\"18446744073709551615\""));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SerializedNode::from_json("{\"name\": 1}").is_err());
    }
}
