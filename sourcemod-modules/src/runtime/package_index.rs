use std::collections::HashSet;

use eyre::Result;
use sourcemod_core::UnitKind;
use sourcemod_pipeline::{Generator, NamespaceTree, NodeId, Properties, UnitId};
use tracing::debug;

const DEFAULT_NAME: &str = "PackageIndex";

/// Writes, for every namespace holding parsed types, a class listing their
/// simple names in a `TYPES` array. `package-info` units are not listed.
#[derive(Debug)]
pub struct PackageIndex {
    name: String,
}

impl Default for PackageIndex {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl PackageIndex {
    pub const NAME: &'static str = "sourcemod.generate.PackageIndex";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn configured(properties: &Properties) -> Result<Box<dyn Generator>> {
        Ok(Box::new(Self::new(properties.get_or("name", DEFAULT_NAME).trim())))
    }

    pub(crate) fn plain() -> Result<Box<dyn Generator>> {
        Ok(Box::new(Self::default()))
    }

    fn indexed_names(
        &self,
        tree: &NamespaceTree,
        node: NodeId,
        generated: &HashSet<UnitId>,
    ) -> Vec<String> {
        let mut names: Vec<String> = tree
            .node(node)
            .units()
            .filter(|(_, id)| {
                !generated.contains(id) && tree.unit(*id).kind() != UnitKind::PackageInfo
            })
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    }
}

impl Generator for PackageIndex {
    fn generate(&mut self, tree: &mut NamespaceTree) -> Result<()> {
        let generated: HashSet<UnitId> = tree.generated().iter().copied().collect();
        let root = tree.root();

        let mut plan = Vec::new();
        for node in tree.descendants(root) {
            if tree.node(node).is_root() {
                continue;
            }
            if tree.has_direct_source(node, &self.name) {
                debug!(
                    "'{}' already has a unit named '{}', skipping index",
                    tree.node(node).path(),
                    self.name
                );
                continue;
            }
            let names = self.indexed_names(tree, node, &generated);
            if !names.is_empty() {
                plan.push((node, names));
            }
        }

        for (node, names) in plan {
            let id = tree.create_class(node, &self.name)?;
            let unit = tree.unit_mut(id);
            unit.set_header("public final ");
            unit.set_body(index_body(&self.name, &names));
        }
        Ok(())
    }
}

fn index_body(class: &str, names: &[String]) -> String {
    let entries = names
        .iter()
        .map(|name| format!("        \"{name}\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        " {{\n\n    public static final String[] TYPES = {{\n{entries}\n    }};\n\n    private {class}() {{\n    }}\n}}\n"
    )
}

#[cfg(test)]
mod tests {
    use sourcemod_core::SourceUnit;

    use super::*;

    fn tree() -> NamespaceTree {
        NamespaceTree::from_units([
            SourceUnit::new(UnitKind::Class, "Foo", "a.b"),
            SourceUnit::new(UnitKind::Interface, "Bar", "a.b"),
            SourceUnit::new(UnitKind::Class, "Top", ""),
            SourceUnit::new(UnitKind::Class, "PackageIndex", "c"),
            SourceUnit::new(UnitKind::Class, "Other", "c"),
        ])
        .unwrap()
    }

    #[test]
    fn test_indexes_namespaces_with_units() {
        let mut tree = tree();
        PackageIndex::default().generate(&mut tree).unwrap();

        // `a` holds no units, the root is never indexed, `c` already has one.
        assert_eq!(tree.generated().len(), 1);
        let index = tree.unit(tree.generated()[0]);
        assert_eq!(index.qualified_name(), "a.b.PackageIndex");
        insta::assert_snapshot!(index.to_source(), @r#"
        package a.b;

        public final class PackageIndex {

            public static final String[] TYPES = {
                "Bar",
                "Foo"
            };

            private PackageIndex() {
            }
        }
        "#);
    }

    #[test]
    fn test_generated_units_are_not_indexed() {
        let mut tree = tree();
        PackageIndex::new("First").generate(&mut tree).unwrap();
        PackageIndex::new("Second").generate(&mut tree).unwrap();

        let second = tree.find_class(tree.root(), "a.b.Second").unwrap();
        let body = tree.unit(second).body().to_string();
        assert!(!body.contains("\"First\""));
        assert!(body.contains("\"Foo\""));
    }

    #[test]
    fn test_package_info_is_not_indexed() {
        let mut tree = NamespaceTree::from_units([
            SourceUnit::parse("package a;\n").unwrap(),
            SourceUnit::parse("package b;\n").unwrap(),
            SourceUnit::new(UnitKind::Class, "Foo", "b"),
        ])
        .unwrap();
        PackageIndex::default().generate(&mut tree).unwrap();

        assert_eq!(tree.generated().len(), 1);
        let index = tree.unit(tree.generated()[0]);
        assert_eq!(index.namespace(), "b");
        assert!(index.body().contains("\"Foo\""));
        assert!(!index.body().contains("package-info"));
    }
}
