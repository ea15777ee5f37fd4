//! Path map - addressed read/write/delete access into a nested mapping

use crate::error::{PathMapError, Result};
use crate::key::{GetMode, PathKey};
use crate::node::{Branch, Node, Resolved};
use crate::options::PathMapOptions;
use crate::DEFAULT_DELIMITER;
use serde_json::{Map, Value};

/// Nested ordered mapping addressed by delimiter-joined paths.
///
/// ```
/// use pathmap::PathMap;
/// use serde_json::json;
///
/// let mut map = PathMap::new();
/// map.set("dir.cache", "/var/cache");
/// assert_eq!(map.get("dir.cache").unwrap(), Some(json!("/var/cache")));
/// assert_eq!(map.get("dir").unwrap(), Some(json!({"cache": "/var/cache"})));
/// ```
///
/// Mutation goes through `&mut self`; callers sharing a map across threads
/// wrap it in a lock.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMap {
    root: Branch,
    delimiter: String,
}

impl Default for PathMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PathMap {
    /// Create an empty map using `.` as the delimiter
    pub fn new() -> Self {
        Self {
            root: Branch::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Create an empty map with a custom delimiter
    pub fn with_delimiter(delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(PathMapError::InvalidConfiguration(
                "delimiter cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            root: Branch::default(),
            delimiter,
        })
    }

    /// Create a map from an initial value.
    ///
    /// With `parse` every top-level entry goes through [`PathMap::set`], so
    /// keys containing the delimiter expand into nested structure. Without it
    /// the keys are stored literally. Non-object values are coerced: sequences
    /// become index-keyed mappings, scalars become `{"0": value}` and `null`
    /// becomes empty.
    pub fn from_value(
        initial: impl Into<Value>,
        parse: bool,
        delimiter: impl Into<String>,
    ) -> Result<Self> {
        let mut map = Self::with_delimiter(delimiter)?;
        map.set_array(initial, parse);
        Ok(map)
    }

    pub fn with_options(initial: impl Into<Value>, options: &PathMapOptions) -> Result<Self> {
        Self::from_value(initial, options.parse, options.delimiter.as_str())
    }

    /// Copy another map's contents, optionally re-parsing them with a new delimiter
    pub fn from_map(other: &PathMap, parse: bool, delimiter: impl Into<String>) -> Result<Self> {
        Self::from_value(other.all(), parse, delimiter)
    }

    /// Build a map from flat path keys, the inverse of [`PathMap::flatten`]
    pub fn unflatten<I, K, V>(flat: I, delimiter: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<PathKey>,
        V: Into<Value>,
    {
        let mut map = Self::with_delimiter(delimiter)?;
        map.set_many(flat);
        Ok(map)
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Replace the contents of the map
    pub fn set_array(&mut self, items: impl Into<Value>, parse: bool) -> &mut Self {
        let items = coerce_to_object(items.into());
        if parse {
            self.root = Branch::default();
            self.set_many(items)
        } else {
            self.root = Branch::from_object(items);
            self
        }
    }

    // ===== Writes =====

    /// Assign `value` at `path`, creating intermediate mappings on the way.
    ///
    /// A scalar met on the way is kept as the value of the mapping that
    /// replaces it. Whatever sits at the final segment is overwritten.
    ///
    /// A final [`VALUE_KEY`](crate::VALUE_KEY) segment writes the value of the
    /// mapping at its parent. An intermediate one is skipped, so `a.[=].b`
    /// writes the same place as `a.b`.
    pub fn set(&mut self, path: impl Into<PathKey>, value: impl Into<Value>) -> &mut Self {
        let path = path.into();
        tracing::trace!(path = %path, "set");

        let mut segments: Vec<&str> = path.as_str().split(self.delimiter.as_str()).collect();
        let Some(last) = segments.pop() else {
            return self;
        };

        let mut branch = &mut self.root;
        for segment in segments {
            // the marker addresses the node itself
            if segment == crate::VALUE_KEY {
                continue;
            }
            branch = branch
                .children
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(Branch::default()))
                .ensure_branch();
        }
        branch.assign(last, value.into());

        self
    }

    /// Apply each pair with [`PathMap::set`], in order
    pub fn set_many<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<PathKey>,
        V: Into<Value>,
    {
        for (path, value) in pairs {
            self.set(path, value);
        }
        self
    }

    /// Set `path` only when [`PathMap::get`] finds nothing (or `null`) there
    pub fn add(&mut self, path: impl Into<PathKey>, value: impl Into<Value>) -> Result<&mut Self> {
        let path = path.into();
        match self.get(&path)? {
            Some(current) if !current.is_null() => {}
            _ => {
                self.set(path, value);
            }
        }
        Ok(self)
    }

    /// Apply each pair with [`PathMap::add`]. Pairs applied before a failing
    /// one stay applied.
    pub fn add_many<I, K, V>(&mut self, pairs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<PathKey>,
        V: Into<Value>,
    {
        for (path, value) in pairs {
            self.add(path, value)?;
        }
        Ok(self)
    }

    /// Append `value` to the sequence at `path`.
    ///
    /// Nothing at `path` starts a new sequence; a mapping gets the value under
    /// its next integer key. Any other value is left untouched.
    pub fn push(&mut self, path: impl Into<PathKey>, value: impl Into<Value>) -> Result<&mut Self> {
        let path = path.into();
        let value = value.into();

        let items = match self.get(&path)? {
            None | Some(Value::Null) => Value::Array(vec![value]),
            Some(Value::Array(mut items)) => {
                items.push(value);
                Value::Array(items)
            }
            Some(Value::Object(mut map)) => {
                let index = next_index(map.keys().map(String::as_str));
                map.insert(index.to_string(), value);
                Value::Object(map)
            }
            Some(_) => {
                tracing::debug!(path = %path, "push target is a scalar, ignoring");
                return Ok(self);
            }
        };

        Ok(self.set(path, items))
    }

    /// Append `value` at the top level under the next integer key
    pub fn append(&mut self, value: impl Into<Value>) -> &mut Self {
        let index = next_index(self.root.children.keys().map(String::as_str));
        self.root
            .children
            .insert(index.to_string(), Node::from_value(value.into()));
        self
    }

    /// Index-style assignment: an empty or `"0"` key appends instead of keying
    pub fn assign(&mut self, key: impl Into<PathKey>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        if key.is_falsy() {
            self.append(value)
        } else {
            self.set(key, value)
        }
    }

    // ===== Reads =====

    /// Whether `path` resolves. Always false on an empty map.
    pub fn has(&self, path: impl Into<PathKey>) -> bool {
        self.has_all([path])
    }

    /// Whether every path resolves. An empty list is false.
    pub fn has_all<I, K>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: Into<PathKey>,
    {
        if self.is_empty() {
            return false;
        }

        let mut checked = false;
        for path in paths {
            checked = true;
            if self.resolve(path.into().as_str()).is_none() {
                return false;
            }
        }
        checked
    }

    /// Read the node at `path`.
    ///
    /// A trailing `.` returns the subtree with markers stripped at every
    /// depth, a trailing `:` returns it verbatim. Otherwise a node holding a
    /// value yields that value and any other mapping comes back stripped.
    /// An empty path is rejected.
    pub fn get(&self, path: impl Into<PathKey>) -> Result<Option<Value>> {
        let path = path.into();
        let (key, mode) = GetMode::parse(path.as_str())?;
        Ok(self.resolve(key).map(|found| found.render(mode)))
    }

    /// [`PathMap::get`] with a fallback for unresolved paths
    pub fn get_or(&self, path: impl Into<PathKey>, default: impl Into<Value>) -> Result<Value> {
        Ok(self.get(path)?.unwrap_or_else(|| default.into()))
    }

    /// The whole tree, markers included, as an independent copy
    pub fn all(&self) -> Value {
        Value::Object(self.root.to_map(true))
    }

    /// Flatten the whole map into `path -> leaf` pairs joined with `delimiter`.
    ///
    /// A node's own value is keyed by the node's path. Empty nested mappings
    /// are kept as `{}` leaves. An empty map has nothing to flatten and fails
    /// with [`PathMapError::MergeConflict`].
    pub fn flatten(&self, delimiter: &str) -> Result<Map<String, Value>> {
        let mut flat = Map::new();
        flatten_into(&self.root, delimiter, "", &mut flat)?;
        Ok(flat)
    }

    /// Flatten an arbitrary mapping, prefixing every key with `prefix`
    pub fn flatten_subtree(
        &self,
        delimiter: &str,
        subtree: &Value,
        prefix: &str,
    ) -> Result<Map<String, Value>> {
        let branch = Branch::from_object(coerce_to_object(subtree.clone()));
        let mut flat = Map::new();
        flatten_into(&branch, delimiter, prefix, &mut flat)?;
        Ok(flat)
    }

    // ===== Removal =====

    /// Take everything out of the map
    pub fn pull(&mut self) -> Value {
        Value::Object(std::mem::take(&mut self.root).to_map(true))
    }

    /// Read `path` (falling back to `default`) and delete it
    pub fn pull_path(&mut self, path: impl Into<PathKey>, default: impl Into<Value>) -> Result<Value> {
        let path = path.into();
        let value = self.get_or(&path, default)?;
        let (key, _) = GetMode::parse(path.as_str())?;
        self.remove(key);
        Ok(value)
    }

    /// Empty the whole map
    pub fn clear(&mut self) -> &mut Self {
        self.root = Branch::default();
        self
    }

    /// Replace each path's subtree with an empty mapping, keeping the key
    pub fn clear_paths<I, K>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PathKey>,
    {
        for path in paths {
            self.set(path, Value::Object(Map::new()));
        }
        self
    }

    /// Remove `path`. Paths whose parents don't resolve are skipped.
    pub fn delete(&mut self, path: impl Into<PathKey>) -> &mut Self {
        self.delete_many([path])
    }

    pub fn delete_many<I, K>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PathKey>,
    {
        for path in paths {
            self.remove(path.into().as_str());
        }
        self
    }

    // ===== Iteration =====

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Top-level keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let marker: Option<&str> = self.root.value.as_ref().map(|_| crate::VALUE_KEY);
        marker
            .into_iter()
            .chain(self.root.children.keys().map(String::as_str))
    }

    /// Top-level entries in insertion order, rendered verbatim
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        let marker: Option<(&str, Value)> = self
            .root
            .value
            .as_ref()
            .map(|value| (crate::VALUE_KEY, value.clone()));
        marker
            .into_iter()
            .chain(
                self.root
                    .children
                    .iter()
                    .map(|(key, node)| (key.as_str(), node.render(true))),
            )
    }

    // ===== Internals =====

    /// Literal top-level keys win over segment walking
    fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        if let Some(found) = self.root.child(path) {
            return Some(found);
        }

        let mut segments = path.split(self.delimiter.as_str());
        let first = segments.next()?;
        segments.try_fold(self.root.child(first)?, |current, segment| {
            current.child(segment)
        })
    }

    fn remove(&mut self, path: &str) {
        if self.root.remove_child(path) {
            return;
        }

        let segments: Vec<&str> = path.split(self.delimiter.as_str()).collect();
        if !self.root.remove_path(&segments) {
            tracing::trace!(path, "delete skipped, path does not resolve");
        }
    }
}

impl IntoIterator for PathMap {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.root.to_map(true).into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for PathMap
where
    K: Into<PathKey>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PathMap::new();
        map.set_many(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for PathMap
where
    K: Into<PathKey>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.set_many(iter);
    }
}

fn coerce_to_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::Null => Map::new(),
        scalar => {
            let mut map = Map::new();
            map.insert("0".to_string(), scalar);
            map
        }
    }
}

/// One past the largest canonical integer key, or zero
fn next_index<'a>(keys: impl Iterator<Item = &'a str>) -> u64 {
    keys.filter_map(|key| {
        key.parse::<u64>()
            .ok()
            .filter(|index| index.to_string() == key)
    })
    .max()
    .map_or(0, |index| index + 1)
}

fn flatten_into(
    branch: &Branch,
    delimiter: &str,
    prefix: &str,
    flat: &mut Map<String, Value>,
) -> Result<()> {
    if branch.is_empty() {
        return Err(PathMapError::MergeConflict(format!(
            "nothing to flatten at '{}'",
            prefix
        )));
    }

    if let Some(value) = &branch.value {
        let key = prefix.trim_matches(|c| delimiter.contains(c));
        flat.insert(key.to_string(), value.clone());
    }

    for (key, child) in &branch.children {
        match child {
            Node::Branch(nested) if !nested.is_empty() => {
                let nested_prefix = format!("{}{}{}", prefix, key, delimiter);
                flatten_into(nested, delimiter, &nested_prefix, flat)?;
            }
            Node::Branch(_) => {
                flat.insert(format!("{}{}", prefix, key), Value::Object(Map::new()));
            }
            Node::Leaf(value) => {
                flat.insert(format!("{}{}", prefix, key), value.clone());
            }
        }
    }

    Ok(())
}
