use indexmap::IndexMap;

/// Index of a namespace node within its [`NamespaceTree`](super::NamespaceTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// Index of a source unit within its [`NamespaceTree`](super::NamespaceTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(pub(super) usize);

/// One segment of a dotted namespace.
#[derive(Debug, Clone)]
pub struct NamespaceNode {
    pub(super) parent: Option<NodeId>,
    pub(super) name: String,
    pub(super) path: String,
    pub(super) units: IndexMap<String, UnitId>,
    pub(super) children: IndexMap<String, NodeId>,
}

impl NamespaceNode {
    pub(super) fn root() -> Self {
        Self {
            parent: None,
            name: String::new(),
            path: String::new(),
            units: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    pub(super) fn child(parent: NodeId, parent_path: &str, name: &str) -> Self {
        let path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{parent_path}.{name}")
        };
        Self {
            parent: Some(parent),
            name: name.to_string(),
            path,
            units: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// This segment's name; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full dotted path; empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Units directly owned by this node, in insertion order.
    pub fn units(&self) -> impl Iterator<Item = (&str, UnitId)> {
        self.units.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Direct child namespaces, in creation order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn has_direct_source(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn direct_source(&self, name: &str) -> Option<UnitId> {
        self.units.get(name).copied()
    }

    pub fn direct_package(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }
}
