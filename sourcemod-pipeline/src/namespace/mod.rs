//! The namespace tree generators read from and write to.
//!
//! Nodes and units live in flat arenas owned by [`NamespaceTree`]; callers
//! navigate with [`NodeId`] and [`UnitId`] handles. Parsed units are inserted
//! under the node matching their namespace. Units created through the
//! `create_*` family are additionally recorded, in creation order, as the
//! run's generated output.

mod node;

pub use node::{NamespaceNode, NodeId, UnitId};
use sourcemod_core::{SourceUnit, UnitKind};

use crate::CreationError;

const SEPARATOR: char = '.';

#[derive(Debug, Clone)]
pub struct NamespaceTree {
    nodes: Vec<NamespaceNode>,
    units: Vec<SourceUnit>,
    owners: Vec<NodeId>,
    generated: Vec<UnitId>,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTree {
    /// An empty tree holding only the root namespace.
    pub fn new() -> Self {
        Self {
            nodes: vec![NamespaceNode::root()],
            units: Vec::new(),
            owners: Vec::new(),
            generated: Vec::new(),
        }
    }

    /// Build a tree from parsed units, placing each under its namespace.
    pub fn from_units(units: impl IntoIterator<Item = SourceUnit>) -> Result<Self, CreationError> {
        let mut tree = Self::new();
        for unit in units {
            tree.insert(unit)?;
        }
        Ok(tree)
    }

    /// Add a parsed unit under the node matching its namespace, creating
    /// missing namespaces. Parsed units are not part of the generated output.
    pub fn insert(&mut self, unit: SourceUnit) -> Result<UnitId, CreationError> {
        let node = self.get_or_create(self.root(), unit.namespace())?;
        if self.nodes[node.0].units.contains_key(unit.name()) {
            return Err(CreationError::DuplicateUnit {
                namespace: unit.namespace().to_string(),
                name: unit.name().to_string(),
            });
        }
        Ok(self.attach(node, unit))
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &NamespaceNode {
        &self.nodes[id.0]
    }

    pub fn unit(&self, id: UnitId) -> &SourceUnit {
        &self.units[id.0]
    }

    /// Mutable access to a unit. Its name is fixed once it is in the tree:
    /// renaming a generated unit fails the run at
    /// [`restore_generated_namespaces`](Self::restore_generated_namespaces).
    pub fn unit_mut(&mut self, id: UnitId) -> &mut SourceUnit {
        &mut self.units[id.0]
    }

    /// The node that owns `unit`.
    pub fn owner(&self, unit: UnitId) -> NodeId {
        self.owners[unit.0]
    }

    /// Units created by generators, in creation order.
    pub fn generated(&self) -> &[UnitId] {
        &self.generated
    }

    /// Return the node at the dotted `path` below `node`, creating every
    /// missing segment. A blank path returns `node` itself.
    pub fn get_or_create(&mut self, node: NodeId, path: &str) -> Result<NodeId, CreationError> {
        if path.trim().is_empty() {
            return Ok(node);
        }

        let mut current = node;
        for segment in path.split(SEPARATOR) {
            if segment.trim().is_empty() {
                return Err(CreationError::BlankSegment {
                    path: path.to_string(),
                });
            }
            current = match self.nodes[current.0].children.get(segment) {
                Some(child) => *child,
                None => self.add_child(current, segment),
            };
        }
        Ok(current)
    }

    /// Resolve a dotted namespace path below `node`. A blank path resolves to
    /// `node` itself.
    pub fn find_package(&self, node: NodeId, path: &str) -> Option<NodeId> {
        if path.trim().is_empty() {
            return Some(node);
        }
        path.split(SEPARATOR)
            .try_fold(node, |current, segment| self.direct_package(current, segment))
    }

    pub fn direct_package(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[node.0].direct_package(name)
    }

    /// Resolve a dotted unit path (`a.b.Name`) below `node`.
    pub fn find_source(&self, node: NodeId, path: &str) -> Option<UnitId> {
        if path.trim().is_empty() {
            return None;
        }
        let (namespace, name) = match path.rfind(SEPARATOR) {
            Some(index) => (&path[..index], &path[index + 1..]),
            None => ("", path),
        };
        let owner = if namespace.is_empty() {
            node
        } else {
            namespace
                .split(SEPARATOR)
                .try_fold(node, |current, segment| self.direct_package(current, segment))?
        };
        self.direct_source(owner, name)
    }

    pub fn has_source(&self, node: NodeId, path: &str) -> bool {
        self.find_source(node, path).is_some()
    }

    pub fn direct_source(&self, node: NodeId, name: &str) -> Option<UnitId> {
        self.nodes[node.0].direct_source(name)
    }

    pub fn has_direct_source(&self, node: NodeId, name: &str) -> bool {
        self.nodes[node.0].has_direct_source(name)
    }

    pub fn find_class(&self, node: NodeId, path: &str) -> Option<UnitId> {
        self.find_of_kind(node, path, UnitKind::Class)
    }

    pub fn find_record(&self, node: NodeId, path: &str) -> Option<UnitId> {
        self.find_of_kind(node, path, UnitKind::Record)
    }

    pub fn find_interface(&self, node: NodeId, path: &str) -> Option<UnitId> {
        self.find_of_kind(node, path, UnitKind::Interface)
    }

    pub fn find_annotation(&self, node: NodeId, path: &str) -> Option<UnitId> {
        self.find_of_kind(node, path, UnitKind::Annotation)
    }

    pub fn find_enum(&self, node: NodeId, path: &str) -> Option<UnitId> {
        self.find_of_kind(node, path, UnitKind::Enum)
    }

    fn find_of_kind(&self, node: NodeId, path: &str, kind: UnitKind) -> Option<UnitId> {
        self.find_source(node, path)
            .filter(|id| self.units[id.0].kind() == kind)
    }

    /// Direct units of `node` with the given kind.
    pub fn units_of_kind(&self, node: NodeId, kind: UnitKind) -> impl Iterator<Item = UnitId> {
        self.nodes[node.0]
            .units
            .values()
            .copied()
            .filter(move |id| self.units[id.0].kind() == kind)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.nodes[node.0].children.values().copied()
    }

    /// `node` and every namespace below it, depth first.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            found.push(current);
            stack.extend(self.nodes[current.0].children.values().rev().copied());
        }
        found
    }

    pub fn create_class(&mut self, node: NodeId, name: &str) -> Result<UnitId, CreationError> {
        self.create(node, UnitKind::Class, name)
    }

    pub fn create_record(&mut self, node: NodeId, name: &str) -> Result<UnitId, CreationError> {
        self.create(node, UnitKind::Record, name)
    }

    pub fn create_interface(&mut self, node: NodeId, name: &str) -> Result<UnitId, CreationError> {
        self.create(node, UnitKind::Interface, name)
    }

    pub fn create_annotation(&mut self, node: NodeId, name: &str) -> Result<UnitId, CreationError> {
        self.create(node, UnitKind::Annotation, name)
    }

    pub fn create_enum(&mut self, node: NodeId, name: &str) -> Result<UnitId, CreationError> {
        self.create(node, UnitKind::Enum, name)
    }

    /// Allocate an empty unit of `kind` named `name` in `node` and record it
    /// as generated output.
    pub fn create(
        &mut self,
        node: NodeId,
        kind: UnitKind,
        name: &str,
    ) -> Result<UnitId, CreationError> {
        let owner = &self.nodes[node.0];
        if owner.is_root() {
            return Err(CreationError::RootNamespace {
                name: name.to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(CreationError::BlankName {
                namespace: owner.path.clone(),
                name: name.to_string(),
            });
        }
        if name.contains(SEPARATOR) {
            return Err(CreationError::QualifiedName {
                name: name.to_string(),
            });
        }
        if owner.units.contains_key(name) {
            return Err(CreationError::DuplicateUnit {
                namespace: owner.path.clone(),
                name: name.to_string(),
            });
        }

        let unit = SourceUnit::new(kind, name, owner.path.clone());
        let id = self.attach(node, unit);
        self.generated.push(id);
        Ok(id)
    }

    /// Reset every generated unit's namespace to the path of its owner.
    ///
    /// # Errors
    ///
    /// A generated unit whose name no longer matches the name it was created
    /// under is rejected with [`CreationError::RenamedUnit`].
    pub fn restore_generated_namespaces(&mut self) -> Result<(), CreationError> {
        for id in &self.generated {
            let owner = &self.nodes[self.owners[id.0].0];
            let unit = &mut self.units[id.0];
            let created = owner
                .units
                .iter()
                .find(|(_, unit_id)| *unit_id == id)
                .map(|(name, _)| name.as_str());
            if let Some(created) = created.filter(|created| *created != unit.name()) {
                return Err(CreationError::RenamedUnit {
                    namespace: owner.path.clone(),
                    name: created.to_string(),
                    renamed: unit.name().to_string(),
                });
            }
            if unit.namespace() != owner.path {
                unit.set_namespace(owner.path.clone());
            }
        }
        Ok(())
    }

    fn attach(&mut self, node: NodeId, unit: SourceUnit) -> UnitId {
        let id = UnitId(self.units.len());
        self.nodes[node.0]
            .units
            .insert(unit.name().to_string(), id);
        self.units.push(unit);
        self.owners.push(node);
        id
    }

    fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let child = NamespaceNode::child(parent, &self.nodes[parent.0].path, name);
        self.nodes.push(child);
        self.nodes[parent.0].children.insert(name.to_string(), id);
        id
    }
}
