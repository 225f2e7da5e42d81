use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::{Generator, ModuleConfig, Properties, Transformer};
use crate::{Error, Result};

/// Constructor receiving the module's configured properties.
pub type ConfiguredFn<M> = fn(&Properties) -> eyre::Result<Box<M>>;

/// Constructor taking no configuration.
pub type PlainFn<M> = fn() -> eyre::Result<Box<M>>;

/// The constructors a module offers. The configured form is preferred.
pub struct Factory<M: ?Sized> {
    configured: Option<ConfiguredFn<M>>,
    plain: Option<PlainFn<M>>,
}

impl<M: ?Sized> Factory<M> {
    /// A factory with no constructors; instantiating it always fails.
    pub fn none() -> Self {
        Self {
            configured: None,
            plain: None,
        }
    }

    pub fn configured(constructor: ConfiguredFn<M>) -> Self {
        Self {
            configured: Some(constructor),
            plain: None,
        }
    }

    pub fn plain(constructor: PlainFn<M>) -> Self {
        Self {
            configured: None,
            plain: Some(constructor),
        }
    }

    /// Add a fallback constructor taking no configuration.
    pub fn or_plain(mut self, constructor: PlainFn<M>) -> Self {
        self.plain = Some(constructor);
        self
    }

    fn build(&self, properties: &Properties) -> Option<eyre::Result<Box<M>>> {
        if let Some(configured) = self.configured {
            return Some(configured(properties));
        }
        self.plain.map(|plain| plain())
    }
}

impl<M: ?Sized> Clone for Factory<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Factory<M> {}

impl<M: ?Sized> fmt::Debug for Factory<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("configured", &self.configured.is_some())
            .field("plain", &self.plain.is_some())
            .finish()
    }
}

/// A registered module, tagged with the capability it implements.
#[derive(Debug, Clone, Copy)]
pub enum ModuleEntry {
    Transformer(Factory<dyn Transformer>),
    Generator(Factory<dyn Generator>),
}

impl ModuleEntry {
    pub fn capability(&self) -> &'static str {
        match self {
            ModuleEntry::Transformer(_) => <dyn Transformer as Capability>::NAME,
            ModuleEntry::Generator(_) => <dyn Generator as Capability>::NAME,
        }
    }
}

/// A module contract that can be loaded from the registry.
pub trait Capability: 'static {
    const NAME: &'static str;

    fn factory(entry: &ModuleEntry) -> Option<Factory<Self>>;
}

impl Capability for dyn Transformer {
    const NAME: &'static str = "transformer";

    fn factory(entry: &ModuleEntry) -> Option<Factory<Self>> {
        match entry {
            ModuleEntry::Transformer(factory) => Some(*factory),
            ModuleEntry::Generator(_) => None,
        }
    }
}

impl Capability for dyn Generator {
    const NAME: &'static str = "generator";

    fn factory(entry: &ModuleEntry) -> Option<Factory<Self>> {
        match entry {
            ModuleEntry::Generator(factory) => Some(*factory),
            ModuleEntry::Transformer(_) => None,
        }
    }
}

/// One module offered by a library.
#[derive(Debug, Clone, Copy)]
pub struct ModuleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub entry: ModuleEntry,
}

/// A named bundle of modules that can be put on the classpath.
pub trait ModuleLibrary {
    fn name(&self) -> &'static str;

    fn modules(&self) -> Vec<ModuleDefinition>;
}

/// Registered module as listed by [`ModuleRegistry::modules`].
#[derive(Debug, Clone, Copy)]
pub struct ModuleInfo<'a> {
    pub name: &'a str,
    pub library: &'static str,
    pub description: &'static str,
    pub capability: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Registered {
    library: &'static str,
    description: &'static str,
    entry: ModuleEntry,
}

/// An instantiated module with the name it was loaded under.
pub struct Loaded<M: ?Sized> {
    pub name: String,
    pub module: Box<M>,
}

impl<M: ?Sized> fmt::Debug for Loaded<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loaded").field("name", &self.name).finish()
    }
}

/// Qualified module name to module entry, in registration order.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: IndexMap<String, Registered>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the registry for a run: the runtime library first, then each
    /// classpath library found in `catalog`, in classpath order.
    pub fn with_classpath(
        runtime: &dyn ModuleLibrary,
        catalog: &[Box<dyn ModuleLibrary>],
        classpath: &[String],
    ) -> Self {
        let mut registry = Self::new();
        registry.register_library(runtime);

        for name in classpath {
            let name = name.trim();
            match catalog.iter().find(|library| library.name() == name) {
                Some(library) => registry.register_library(library.as_ref()),
                None => warn!("unknown module library '{}' on classpath, skipping", name),
            }
        }

        registry
    }

    pub fn register_library(&mut self, library: &dyn ModuleLibrary) {
        for definition in library.modules() {
            self.register(library.name(), definition);
        }
    }

    /// Register a module. Returns `false` if the name was already taken, in
    /// which case the earlier registration is kept.
    pub fn register(&mut self, library: &'static str, definition: ModuleDefinition) -> bool {
        if let Some(existing) = self.modules.get(definition.name) {
            debug!(
                "module '{}' from '{}' is shadowed by '{}'",
                definition.name, library, existing.library
            );
            return false;
        }

        self.modules.insert(
            definition.name.to_string(),
            Registered {
                library,
                description: definition.description,
                entry: definition.entry,
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules.get(name).map(|registered| &registered.entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = ModuleInfo<'_>> {
        self.modules.iter().map(|(name, registered)| ModuleInfo {
            name,
            library: registered.library,
            description: registered.description,
            capability: registered.entry.capability(),
        })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Resolve and construct one module.
    pub fn instantiate<M: Capability + ?Sized>(&self, config: &ModuleConfig) -> Result<Box<M>> {
        let entry = self.get(&config.name).ok_or_else(|| Error::Resolution {
            name: config.name.clone(),
            capability: M::NAME,
        })?;

        let factory = M::factory(entry).ok_or_else(|| Error::Contract {
            name: config.name.clone(),
            capability: M::NAME,
        })?;

        match factory.build(&config.properties) {
            Some(Ok(module)) => Ok(module),
            Some(Err(e)) => Err(Error::Instantiation {
                name: config.name.clone(),
                capability: M::NAME,
                source: e.into(),
            }),
            None => Err(Error::Instantiation {
                name: config.name.clone(),
                capability: M::NAME,
                source: "module has no usable constructor".into(),
            }),
        }
    }

    /// Instantiate every configured module in order, failing on the first
    /// error.
    pub fn load<M: Capability + ?Sized>(&self, configs: &[ModuleConfig]) -> Result<Vec<Loaded<M>>> {
        configs
            .iter()
            .map(|config| {
                let module = self.instantiate::<M>(config)?;
                debug!("loaded {} '{}'", M::NAME, config.name);
                Ok(Loaded {
                    name: config.name.clone(),
                    module,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use sourcemod_core::SourceUnit;

    use super::*;
    use crate::NamespaceTree;

    struct Noop;

    impl Transformer for Noop {
        fn can_transform(&self, _unit: &SourceUnit) -> bool {
            true
        }

        fn transform(&mut self, _unit: &mut SourceUnit) -> eyre::Result<()> {
            Ok(())
        }
    }

    struct Tagged(#[allow(dead_code)] String);

    impl Generator for Tagged {
        fn generate(&mut self, _tree: &mut NamespaceTree) -> eyre::Result<()> {
            Ok(())
        }
    }

    fn noop() -> eyre::Result<Box<dyn Transformer>> {
        Ok(Box::new(Noop))
    }

    fn tagged(properties: &Properties) -> eyre::Result<Box<dyn Generator>> {
        Ok(Box::new(Tagged(properties.require("tag")?.to_string())))
    }

    fn untagged() -> eyre::Result<Box<dyn Generator>> {
        Ok(Box::new(Tagged("plain".to_string())))
    }

    struct TestLibrary(&'static str);

    impl ModuleLibrary for TestLibrary {
        fn name(&self) -> &'static str {
            self.0
        }

        fn modules(&self) -> Vec<ModuleDefinition> {
            vec![
                ModuleDefinition {
                    name: "test.Noop",
                    description: "does nothing",
                    entry: ModuleEntry::Transformer(Factory::plain(noop)),
                },
                ModuleDefinition {
                    name: "test.Tagged",
                    description: "requires a tag",
                    entry: ModuleEntry::Generator(Factory::configured(tagged)),
                },
                ModuleDefinition {
                    name: "test.Broken",
                    description: "cannot be built",
                    entry: ModuleEntry::Generator(Factory::none()),
                },
            ]
        }
    }

    fn registry() -> ModuleRegistry {
        ModuleRegistry::with_classpath(&TestLibrary("runtime"), &[], &[])
    }

    #[test]
    fn test_unknown_name_is_resolution_error() {
        let err = registry()
            .instantiate::<dyn Transformer>(&ModuleConfig::new("test.Missing"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Resolution { ref name, .. } if name == "test.Missing"));
    }

    #[test]
    fn test_wrong_capability_is_contract_error() {
        let err = registry()
            .instantiate::<dyn Generator>(&ModuleConfig::new("test.Noop"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::Contract { ref name, capability: "generator" } if name == "test.Noop"
        ));
    }

    #[test]
    fn test_instantiation_errors() {
        let registry = registry();

        let missing_property = registry
            .instantiate::<dyn Generator>(&ModuleConfig::new("test.Tagged"))
            .err()
            .unwrap();
        assert!(matches!(missing_property, Error::Instantiation { .. }));

        let no_constructor = registry
            .instantiate::<dyn Generator>(&ModuleConfig::new("test.Broken"))
            .err()
            .unwrap();
        assert!(matches!(no_constructor, Error::Instantiation { ref name, .. } if name == "test.Broken"));
    }

    #[test]
    fn test_configured_constructor_is_preferred() {
        let factory = Factory::<dyn Generator>::configured(tagged).or_plain(untagged);

        assert!(factory.build(&Properties::new()).unwrap().is_err());
        assert!(
            factory
                .build(&Properties::new().with("tag", "x"))
                .unwrap()
                .is_ok()
        );
        assert!(Factory::<dyn Generator>::plain(untagged)
            .build(&Properties::new())
            .unwrap()
            .is_ok());
    }

    #[test]
    fn test_load_preserves_order_and_stops_on_error() {
        let registry = registry();
        let configs = vec![
            ModuleConfig::new("test.Noop"),
            ModuleConfig::new("test.Noop"),
        ];
        let loaded = registry.load::<dyn Transformer>(&configs).unwrap();
        assert_eq!(loaded.len(), 2);

        let configs = vec![
            ModuleConfig::new("test.Noop"),
            ModuleConfig::new("test.Missing"),
        ];
        assert!(registry.load::<dyn Transformer>(&configs).is_err());
    }

    #[test]
    fn test_classpath_first_registration_wins() {
        let catalog: Vec<Box<dyn ModuleLibrary>> = vec![Box::new(TestLibrary("extra"))];
        let registry = ModuleRegistry::with_classpath(
            &TestLibrary("runtime"),
            &catalog,
            &["extra".to_string(), "unknown".to_string()],
        );

        assert_eq!(registry.len(), 3);
        assert!(registry.modules().all(|info| info.library == "runtime"));
        assert_eq!(
            registry.modules().next().map(|info| info.capability),
            Some("transformer")
        );
    }
}
