//! Tree nodes
//!
//! A node is either a leaf value or a branch of ordered children. A branch
//! may also carry a value of its own, which is what a scalar becomes when
//! something is later written below it. The marker key only appears when a
//! branch is rendered back to JSON.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Reserved key under which a branch's own value is rendered
pub const VALUE_KEY: &str = "[=]";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Leaf(Value),
    Branch(Branch),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Branch {
    pub(crate) value: Option<Value>,
    pub(crate) children: IndexMap<String, Node>,
}

/// A node found by walking a path. Walking into a sequence leaf yields plain
/// JSON rather than a tree node.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Resolved<'a> {
    Node(&'a Node),
    Json(&'a Value),
}

impl Node {
    /// JSON objects become branches so later paths can walk into them
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Node::Branch(Branch::from_object(map)),
            other => Node::Leaf(other),
        }
    }

    pub(crate) fn render(&self, with_marker: bool) -> Value {
        match self {
            Node::Leaf(value) if with_marker => value.clone(),
            Node::Leaf(value) => strip_markers(value.clone()),
            Node::Branch(branch) => Value::Object(branch.to_map(with_marker)),
        }
    }

    /// Turn this node into a branch in place and return it.
    ///
    /// A scalar is kept as the branch value, a sequence becomes index-keyed
    /// children and `null` counts as nothing.
    pub(crate) fn ensure_branch(&mut self) -> &mut Branch {
        match self {
            Node::Branch(branch) => branch,
            Node::Leaf(value) => {
                *self = Node::Branch(Branch::from_leaf(std::mem::take(value)));
                self.ensure_branch()
            }
        }
    }

    /// Remove what `segments` addresses below this node, walking into plain
    /// JSON by key or index once the tree ends
    pub(crate) fn remove_path(&mut self, segments: &[&str]) -> bool {
        match self {
            Node::Branch(branch) => branch.remove_path(segments),
            Node::Leaf(value) => remove_json_path(value, segments),
        }
    }
}

impl Branch {
    /// A `VALUE_KEY` entry in the input is read back as the branch value
    pub(crate) fn from_object(map: Map<String, Value>) -> Self {
        let mut branch = Branch::default();
        for (key, value) in map {
            if key == VALUE_KEY {
                branch.value = Some(value);
            } else {
                branch.children.insert(key, Node::from_value(value));
            }
        }
        branch
    }

    /// A scalar is kept as the branch value, a sequence becomes index-keyed
    /// children and `null` counts as nothing
    fn from_leaf(value: Value) -> Self {
        match value {
            Value::Null => Branch::default(),
            Value::Array(items) => Branch::from_object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            ),
            other => Branch {
                value: Some(other),
                children: IndexMap::new(),
            },
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.children.len() + usize::from(self.value.is_some())
    }

    pub(crate) fn to_map(&self, with_marker: bool) -> Map<String, Value> {
        let mut map = Map::new();
        if with_marker {
            if let Some(value) = &self.value {
                map.insert(VALUE_KEY.to_string(), value.clone());
            }
        }
        for (key, child) in &self.children {
            map.insert(key.clone(), child.render(with_marker));
        }
        map
    }

    pub(crate) fn child(&self, segment: &str) -> Option<Resolved<'_>> {
        if segment == VALUE_KEY {
            return self.value.as_ref().map(Resolved::Json);
        }
        self.children.get(segment).map(Resolved::Node)
    }

    pub(crate) fn remove_child(&mut self, segment: &str) -> bool {
        if segment == VALUE_KEY {
            return self.value.take().is_some();
        }
        self.children.shift_remove(segment).is_some()
    }

    pub(crate) fn remove_path(&mut self, segments: &[&str]) -> bool {
        match segments {
            [] => false,
            [last] => self.remove_child(last),
            [segment, rest @ ..] if *segment == VALUE_KEY => match &mut self.value {
                Some(value) => remove_json_path(value, rest),
                None => false,
            },
            [segment, rest @ ..] => match self.children.get_mut(*segment) {
                Some(child) => child.remove_path(rest),
                None => false,
            },
        }
    }

    /// Insert at `segment`, where the marker segment addresses the branch value
    pub(crate) fn assign(&mut self, segment: &str, value: Value) {
        if segment == VALUE_KEY {
            self.value = Some(value);
        } else {
            self.children.insert(segment.to_string(), Node::from_value(value));
        }
    }
}

impl<'a> Resolved<'a> {
    pub(crate) fn child(self, segment: &str) -> Option<Resolved<'a>> {
        match self {
            Resolved::Node(Node::Branch(branch)) => branch.child(segment),
            Resolved::Node(Node::Leaf(value)) | Resolved::Json(value) => {
                json_child(value, segment).map(Resolved::Json)
            }
        }
    }

    pub(crate) fn render(self, mode: crate::GetMode) -> Value {
        use crate::GetMode;

        match (self, mode) {
            (Resolved::Node(node), GetMode::All) => node.render(true),
            (Resolved::Node(Node::Branch(branch)), GetMode::Value) => match &branch.value {
                Some(value) => value.clone(),
                None => Value::Object(branch.to_map(false)),
            },
            (Resolved::Node(node), _) => node.render(false),
            (Resolved::Json(value), GetMode::All) => value.clone(),
            (Resolved::Json(Value::Object(map)), GetMode::Value) if map.contains_key(VALUE_KEY) => {
                map.get(VALUE_KEY).cloned().unwrap_or(Value::Null)
            }
            (Resolved::Json(value), _) => strip_markers(value.clone()),
        }
    }
}

fn json_child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Removing from a sequence shifts the later items down
fn remove_json_path(value: &mut Value, segments: &[&str]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return false;
    };

    match value {
        Value::Object(map) if rest.is_empty() => map.shift_remove(*segment).is_some(),
        Value::Object(map) => match map.get_mut(*segment) {
            Some(child) => remove_json_path(child, rest),
            None => false,
        },
        Value::Array(items) => match segment.parse::<usize>() {
            Ok(index) if index < items.len() && rest.is_empty() => {
                items.remove(index);
                true
            }
            Ok(index) => match items.get_mut(index) {
                Some(child) => remove_json_path(child, rest),
                None => false,
            },
            Err(_) => false,
        },
        _ => false,
    }
}

/// Drop marker entries at every depth
pub(crate) fn strip_markers(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key != VALUE_KEY)
                .map(|(key, value)| (key, strip_markers(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_markers).collect()),
        other => other,
    }
}
