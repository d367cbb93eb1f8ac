//! Generic tree produced by the notation scanner.

use indexmap::IndexMap;
use serde::Serialize;

/// An insertion-ordered mapping of keys to values.
pub type Tree = IndexMap<String, Value>;

/// A value in a props document.
///
/// Lists are pre-sized from their declared length; `None` marks a slot
/// the source never assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A plain unquoted value, kept exactly as written.
    Scalar(String),
    /// A `{...}` block of key-value pairs.
    Dict(Tree),
    /// A `key[N]={...}` block of indexed elements.
    List(Vec<Option<Value>>),
}

impl Value {
    /// The scalar string, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The nested tree, if this is a dict.
    pub fn as_dict(&self) -> Option<&Tree> {
        match self {
            Value::Dict(tree) => Some(tree),
            _ => None,
        }
    }

    /// The list slots, if this is a list.
    pub fn as_list(&self) -> Option<&[Option<Value>]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Dict(_) => "dict",
            Value::List(_) => "list",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        Value::Dict(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let scalar = Value::from("1.0");
        assert_eq!(scalar.as_scalar(), Some("1.0"));
        assert!(scalar.as_dict().is_none());
        assert_eq!(scalar.kind_name(), "scalar");

        let mut tree = Tree::new();
        tree.insert("R".to_string(), Value::from("0.5"));
        let dict = Value::from(tree);
        assert_eq!(dict.as_dict().map(|t| t.len()), Some(1));
        assert_eq!(dict.kind_name(), "dict");

        let list = Value::List(vec![None, Some(Value::from("x"))]);
        assert_eq!(list.as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_serialize_untagged() {
        let mut tree = Tree::new();
        tree.insert("A".to_string(), Value::from("1"));
        tree.insert(
            "L".to_string(),
            Value::List(vec![Some(Value::from("x")), None]),
        );

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"A":"1","L":["x",null]}"#);
    }
}
