use indexmap::IndexMap;

use super::Value;

/// A decoded input document: nested mappings and sequences with scalar leaves.
///
/// Positions are addressed by dot-paths such as `"name.first_name"` or
/// `"tags.0.slug"`, where sequence positions use their decimal index.
/// Mapping keys keep insertion order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(untagged))]
pub enum Document {
    Value(Value),
    List(Vec<Document>),
    Map(IndexMap<String, Document>),
}

/// Append `key` to a dot-path. The empty path is the document root.
#[must_use]
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        let mut path = String::with_capacity(parent.len() + key.len() + 1);
        path.push_str(parent);
        path.push('.');
        path.push_str(key);
        path
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::Map(IndexMap::new())
    }
}

impl Document {
    /// An empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence built from the given items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Document>,
    {
        Document::List(items.into_iter().map(Into::into).collect())
    }

    /// Set a value at a dot-separated path. Creates intermediate mappings as needed.
    ///
    /// An existing sequence is indexed by numeric segments; a segment equal to
    /// the sequence length appends. Any other segment replaces the node it
    /// lands on with a fresh mapping.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<Document>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert a value at a dot-separated path (mutable reference version).
    pub fn insert(&mut self, path: &str, value: Document) {
        let segments: Vec<&str> = path.split('.').collect();
        Self::insert_recursive(self, &segments, value);
    }

    /// Look up the node at a dot-separated path. The empty path is the root.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Document> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| node.child(segment))
    }

    /// Look up a scalar leaf. Returns `None` if the path is missing or is a container.
    #[must_use]
    pub fn leaf(&self, path: &str) -> Option<&Value> {
        match self.get(path)? {
            Document::Value(v) => Some(v),
            Document::List(_) | Document::Map(_) => None,
        }
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        !matches!(self, Document::Value(_))
    }

    /// Human-readable node kind: `"mapping"`, `"sequence"` or `"leaf"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Value(_) => "leaf",
            Document::List(_) => "sequence",
            Document::Map(_) => "mapping",
        }
    }

    /// Dot-paths of every leaf, depth-first in document order.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_leaf_paths("", &mut out);
        out
    }

    /// Whether `other` has the same key sets, sequence lengths and nesting.
    /// Leaf values are not compared.
    #[must_use]
    pub fn same_shape(&self, other: &Document) -> bool {
        match (self, other) {
            (Document::Value(_), Document::Value(_)) => true,
            (Document::List(a), Document::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (Document::Map(a), Document::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_shape(vb))
            }
            _ => false,
        }
    }

    fn child(&self, segment: &str) -> Option<&Document> {
        match self {
            Document::Map(map) => map.get(segment),
            Document::List(items) => items.get(segment.parse::<usize>().ok()?),
            Document::Value(_) => None,
        }
    }

    fn collect_leaf_paths(&self, path: &str, out: &mut Vec<String>) {
        match self {
            Document::Value(_) => out.push(path.to_owned()),
            Document::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    item.collect_leaf_paths(&join_path(path, &i.to_string()), out);
                }
            }
            Document::Map(map) => {
                for (key, item) in map {
                    item.collect_leaf_paths(&join_path(path, key), out);
                }
            }
        }
    }

    fn insert_recursive(node: &mut Document, segments: &[&str], value: Document) {
        let [first, rest @ ..] = segments else {
            return;
        };
        if let Document::List(items) = node {
            match first.parse::<usize>() {
                Ok(idx) if idx <= items.len() => {
                    if idx == items.len() {
                        items.push(Document::new());
                    }
                    if rest.is_empty() {
                        items[idx] = value;
                    } else {
                        Self::insert_recursive(&mut items[idx], rest, value);
                    }
                    return;
                }
                _ => {}
            }
        }
        if !matches!(node, Document::Map(_)) {
            *node = Document::new();
        }
        if let Document::Map(map) = node {
            if rest.is_empty() {
                map.insert((*first).to_owned(), value);
            } else {
                let entry = map.entry((*first).to_owned()).or_default();
                Self::insert_recursive(entry, rest, value);
            }
        }
    }
}

impl From<Value> for Document {
    fn from(v: Value) -> Self {
        Document::Value(v)
    }
}

impl From<i64> for Document {
    fn from(v: i64) -> Self {
        Document::Value(v.into())
    }
}

impl From<f64> for Document {
    fn from(v: f64) -> Self {
        Document::Value(v.into())
    }
}

impl From<bool> for Document {
    fn from(v: bool) -> Self {
        Document::Value(v.into())
    }
}

impl From<&str> for Document {
    fn from(v: &str) -> Self {
        Document::Value(v.into())
    }
}

impl From<String> for Document {
    fn from(v: String) -> Self {
        Document::Value(v.into())
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::List(items)
    }
}

impl<K: Into<String>> FromIterator<(K, Document)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Document)>>(iter: I) -> Self {
        Document::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_at_root_and_below() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "0"), "a.0");
        assert_eq!(join_path("name", "first_name"), "name.first_name");
    }

    #[test]
    fn set_and_get_nested() {
        let doc = Document::new().set("user.profile.age", 25_i64);
        assert_eq!(doc.leaf("user.profile.age"), Some(&Value::Int(25)));
        assert!(doc.get("user.profile").is_some_and(Document::is_container));
    }

    #[test]
    fn get_through_sequence() {
        let doc = Document::new().set("a", Document::list(["1", "2"]));
        assert_eq!(doc.leaf("a.1"), Some(&Value::from("2")));
        assert_eq!(doc.leaf("a.2"), None);
        assert_eq!(doc.leaf("a.x"), None);
    }

    #[test]
    fn get_intermediate_path_is_not_a_leaf() {
        let doc = Document::new().set("user.age", 25_i64);
        assert_eq!(doc.leaf("user"), None);
        assert_eq!(doc.get("").map(Document::kind), Some("mapping"));
    }

    #[test]
    fn set_appends_to_sequence() {
        let doc = Document::new()
            .set("tags", Document::list(["x"]))
            .set("tags.1", "y")
            .set("tags.0", "z");
        assert_eq!(doc.get("tags"), Some(&Document::list(["z", "y"])));
    }

    #[test]
    fn overwrite_leaf_with_nested() {
        let doc = Document::new().set("user", "old").set("user.age", 30_i64);
        assert_eq!(doc.leaf("user.age"), Some(&Value::Int(30)));
        assert_eq!(doc.leaf("user"), None);
    }

    #[test]
    fn leaf_paths_in_document_order() {
        let doc = Document::new()
            .set("name.first_name", "Fabien")
            .set("tags", Document::list([Document::new().set("slug", "doc")]))
            .set("file", Value::Null);
        assert_eq!(
            doc.leaf_paths(),
            vec!["name.first_name", "tags.0.slug", "file"]
        );
    }

    #[test]
    fn same_shape_ignores_leaf_values() {
        let a = Document::new().set("a", Document::list(["1", "2"]));
        let b = Document::new().set("a", Document::list([1_i64, 2]));
        let c = Document::new().set("a", Document::list(["1"]));
        let d = Document::new().set("b", Document::list(["1", "2"]));
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
        assert!(!a.same_shape(&d));
    }

    #[test]
    fn from_iterator_builds_mapping() {
        let doc: Document = [("x", Document::from(1_i64)), ("y", Document::from(true))]
            .into_iter()
            .collect();
        assert_eq!(doc.leaf("y"), Some(&Value::Bool(true)));
    }
}
