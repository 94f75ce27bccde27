//! Hierarchical tag taxonomy.
//!
//! Tags form a forest stored in an arena: every node is addressed by a
//! [`TagId`] and refers to its parent and children by id. Sibling names are
//! unique ignoring case, so a dotted path resolves to at most one node.
//! Nodes are only ever added under existing parents, which keeps the forest
//! acyclic.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static TAG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").unwrap_or_else(|_| unreachable!("tag name regex is valid"))
});

/// Stable handle of a node in a [`Taxonomy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub u32);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared value kind of a tag or fixed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    String,
    #[serde(alias = "bool")]
    Boolean,
    #[serde(alias = "int")]
    Integer,
    Datetime,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Datetime => "datetime",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    pub id: TagId,
    pub name: String,
    pub parent: Option<TagId>,
    pub kind: ValueKind,
    /// Organizational node, never applied to items directly
    pub is_category: bool,
    pub children: Vec<TagId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("Invalid tag name '{0}': only letters, digits and '_' are allowed")]
    InvalidName(String),

    #[error("Tag '{name}' already exists under {parent}")]
    DuplicateSibling { name: String, parent: String },

    #[error("Unknown parent tag {0}")]
    UnknownParent(TagId),
}

/// Read interface the resolver consumes.
///
/// Implemented by [`Taxonomy`]; other tag stores can implement it to be
/// queried without copying into an arena first.
pub trait TaxonomyView {
    fn node(&self, id: TagId) -> Option<&TagNode>;

    fn roots(&self) -> &[TagId];

    /// Find the child of `parent` (or the root when `None`) called `name`,
    /// ignoring case.
    fn child_by_name(&self, parent: Option<TagId>, name: &str) -> Option<TagId>;

    fn children(&self, id: TagId) -> &[TagId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Full dotted path of a node, root first.
    fn path_of(&self, id: TagId) -> String {
        let mut parts = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            parts.push(node.name.as_str());
            current = node.parent.and_then(|p| self.node(p));
        }
        parts.reverse();
        parts.join(".")
    }
}

/// Arena-backed tag forest.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    nodes: Vec<TagNode>,
    roots: Vec<TagId>,
    /// (parent, lower-cased name) -> node
    index: HashMap<(Option<TagId>, String), TagId>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag tree seeded into a fresh photo catalog.
    pub fn with_default_tags() -> Self {
        use ValueKind::*;

        const TREE: &[(&str, Option<&str>, ValueKind, bool)] = &[
            ("favorite", None, Boolean, false),
            ("to_delete", None, Boolean, false),
            ("photographer_name", None, String, false),
            ("reviewed", None, Boolean, false),
            ("auto_tag_errors", None, Boolean, false),
            ("scene", None, String, true),
            ("scene.indoor", Some("scene"), String, false),
            ("scene.outdoor", Some("scene"), String, true),
            ("scene.outdoor.lake", Some("scene.outdoor"), String, false),
            ("scene.outdoor.hike", Some("scene.outdoor"), String, false),
            ("event", None, String, true),
            ("event.christmas", Some("event"), String, false),
            ("event.birthday", Some("event"), String, true),
            ("event.birthday.alice", Some("event.birthday"), String, false),
            ("event.birthday.bob", Some("event.birthday"), String, false),
            ("event.vacation", Some("event"), String, true),
            ("event.vacation.lake", Some("event.vacation"), String, false),
            ("event.vacation.city", Some("event.vacation"), String, false),
            ("person", None, String, true),
            ("person.alice", Some("person"), String, false),
            ("person.bob", Some("person"), String, false),
            ("datetime", None, Datetime, true),
            ("datetime.datetime_value", Some("datetime"), Datetime, false),
            ("datetime.year", Some("datetime"), Integer, false),
            ("datetime.month", Some("datetime"), Integer, false),
            ("datetime.day", Some("datetime"), Integer, false),
            ("datetime.hr", Some("datetime"), Integer, false),
            ("datetime.min", Some("datetime"), Integer, false),
            ("datetime.sec", Some("datetime"), Integer, false),
            ("location", None, String, true),
            ("location.latitude", Some("location"), String, false),
            ("location.longitude", Some("location"), String, false),
            ("location.has_lat_lon", Some("location"), Boolean, false),
            ("location.city", Some("location"), String, false),
            ("location.town", Some("location"), String, false),
            ("location.state", Some("location"), String, false),
            ("image_size", None, Integer, true),
            ("image_size.width", Some("image_size"), Integer, false),
            ("image_size.height", Some("image_size"), Integer, false),
        ];

        let mut taxonomy = Taxonomy::new();
        for &(path, parent, kind, is_category) in TREE {
            let parent = parent.and_then(|p| taxonomy.resolve_path(p));
            let name = path.rsplit('.').next().unwrap_or(path);
            if let Err(e) = taxonomy.add_tag(name, parent, kind, is_category) {
                unreachable!("default tag tree is well-formed: {e}");
            }
        }
        taxonomy
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: TagId) -> Option<&TagNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagNode> {
        self.nodes.iter()
    }

    /// Add a node under `parent` (or at the root).
    pub fn add_tag(
        &mut self,
        name: &str,
        parent: Option<TagId>,
        kind: ValueKind,
        is_category: bool,
    ) -> Result<TagId, TaxonomyError> {
        if !TAG_NAME_RE.is_match(name) {
            return Err(TaxonomyError::InvalidName(name.to_string()));
        }
        if let Some(p) = parent {
            if self.get(p).is_none() {
                return Err(TaxonomyError::UnknownParent(p));
            }
        }

        let key = (parent, name.to_lowercase());
        if self.index.contains_key(&key) {
            return Err(TaxonomyError::DuplicateSibling {
                name: name.to_string(),
                parent: parent.map_or_else(|| "the root".to_string(), |p| self.path_of(p)),
            });
        }

        let id = TagId(self.nodes.len() as u32);
        self.nodes.push(TagNode {
            id,
            name: name.to_string(),
            parent,
            kind,
            is_category,
            children: Vec::new(),
        });
        self.index.insert(key, id);
        match parent {
            Some(p) => self.nodes[p.0 as usize].children.push(id),
            None => self.roots.push(id),
        }

        log::trace!("added tag {} as {}", self.path_of(id), id);
        Ok(id)
    }

    /// Resolve a dotted path, creating missing nodes.
    ///
    /// Every segment is validated first, so an invalid path changes nothing.
    /// New intermediate nodes are categories; an existing leaf that gains a
    /// child is promoted to a category. Returns the final node.
    pub fn ensure_path(
        &mut self,
        path: &str,
        leaf_kind: ValueKind,
    ) -> Result<TagId, TaxonomyError> {
        let parts: Vec<&str> = path.split('.').collect();
        // Reject the whole path before touching any node
        if let Some(bad) = parts.iter().find(|part| !TAG_NAME_RE.is_match(part)) {
            return Err(TaxonomyError::InvalidName(bad.to_string()));
        }

        let mut parent = None;
        let mut current = None;

        for (i, part) in parts.iter().enumerate() {
            let is_leaf = i == parts.len() - 1;
            let id = match self.child_by_name(parent, part) {
                Some(id) => {
                    if !is_leaf {
                        self.nodes[id.0 as usize].is_category = true;
                    }
                    id
                }
                None => {
                    let kind = if is_leaf { leaf_kind } else { ValueKind::String };
                    self.add_tag(part, parent, kind, !is_leaf)?
                }
            };
            parent = Some(id);
            current = Some(id);
        }

        // `split` always yields at least one part
        current.ok_or_else(|| TaxonomyError::InvalidName(path.to_string()))
    }

    /// Resolve a dotted path to an existing node, ignoring case.
    pub fn resolve_path(&self, path: &str) -> Option<TagId> {
        path.split('.')
            .try_fold(None, |parent, part| self.child_by_name(parent, part).map(Some))
            .flatten()
    }
}

impl TaxonomyView for Taxonomy {
    fn node(&self, id: TagId) -> Option<&TagNode> {
        self.get(id)
    }

    fn roots(&self) -> &[TagId] {
        &self.roots
    }

    fn child_by_name(&self, parent: Option<TagId>, name: &str) -> Option<TagId> {
        self.index.get(&(parent, name.to_lowercase())).copied()
    }
}
