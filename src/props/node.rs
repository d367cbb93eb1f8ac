//! Parameter nodes and name-indexed parameter lists.

use serde::Serialize;

use crate::error::{Result, SkinError};
use crate::parser::Value;

/// A named material parameter (`ParameterName`/`ParameterValue`/`ParameterInfo`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterNode {
    pub name: String,
    pub value: Value,
    /// The `ParameterInfo` (or `ParameterType`) string.
    pub kind: String,
}

impl ParameterNode {
    pub fn new(name: impl Into<String>, value: Value, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            kind: kind.into(),
        }
    }
}

/// Insertion-ordered parameter nodes with unique names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterList {
    nodes: Vec<ParameterNode>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Fails if a node with the same name is present.
    pub fn push(&mut self, node: ParameterNode) -> Result<()> {
        if self.contains(&node.name) {
            return Err(SkinError::Parse {
                message: format!("Parameter '{}' already in list", node.name),
                help: None,
            });
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ParameterNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a node by name, returning it.
    pub fn remove(&mut self, name: &str) -> Option<ParameterNode> {
        let index = self.nodes.iter().position(|node| node.name == name)?;
        Some(self.nodes.remove(index))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterNode> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a ParameterNode;
    type IntoIter = std::slice::Iter<'a, ParameterNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
