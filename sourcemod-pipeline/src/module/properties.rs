use indexmap::IndexMap;
use sourcemod_core::toml_value_to_string;
use sourcemod_manifest::ModuleSpec;

/// String key/value configuration handed to a module's constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(IndexMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stringify every value of a manifest properties table.
    pub fn from_table(table: &toml::Table) -> Self {
        table
            .iter()
            .map(|(key, value)| (key.clone(), toml_value_to_string(value)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Look up a property that must be present and non-blank.
    pub fn require(&self, key: &str) -> eyre::Result<&str> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(eyre::eyre!("missing required property '{key}'")),
        }
    }

    /// Interpret a property as a boolean; absent means `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    /// Entries whose key starts with `prefix`, with the prefix stripped.
    pub fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.0.iter().filter_map(move |(key, value)| {
            key.strip_prefix(prefix)
                .map(|stripped| (stripped, value.as_str()))
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A module to load: its qualified name and the properties its configured
/// constructor receives (empty when none were given).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    pub name: String,
    pub properties: Properties,
}

impl ModuleConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

impl From<&ModuleSpec> for ModuleConfig {
    fn from(spec: &ModuleSpec) -> Self {
        Self {
            name: spec.name.trim().to_string(),
            properties: Properties::from_table(&spec.properties),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table_stringifies_values() {
        let table: toml::Table = toml::from_str(
            r#"
            annotation = "Template"
            strict = true
            depth = 3
            imports = ["a.B", "c.D"]
            "#,
        )
        .unwrap();

        let properties = Properties::from_table(&table);

        assert_eq!(properties.get("annotation"), Some("Template"));
        assert_eq!(properties.get("strict"), Some("true"));
        assert_eq!(properties.get("depth"), Some("3"));
        assert_eq!(properties.get("imports"), Some("a.B,c.D"));
        assert!(properties.flag("strict"));
    }

    #[test]
    fn test_require() {
        let properties = Properties::new().with("name", "Index").with("blank", "  ");

        assert_eq!(properties.require("name").unwrap(), "Index");
        assert!(properties.require("blank").is_err());
        let err = properties.require("missing").unwrap_err();
        assert!(err.to_string().contains("'missing'"));
    }

    #[test]
    fn test_prefixed_keeps_order() {
        let properties: Properties = [
            ("constant.B", "2"),
            ("name", "Keys"),
            ("constant.A", "1"),
        ]
        .into_iter()
        .collect();

        let constants: Vec<_> = properties.prefixed("constant.").collect();
        assert_eq!(constants, vec![("B", "2"), ("A", "1")]);
    }

    #[test]
    fn test_module_config_from_spec() {
        let bare = ModuleSpec {
            name: " sourcemod.transform.FinalizeClasses ".to_string(),
            properties: toml::Table::new(),
        };
        let config = ModuleConfig::from(&bare);
        assert_eq!(config.name, "sourcemod.transform.FinalizeClasses");
        assert!(config.properties.is_empty());

        let mut table = toml::Table::new();
        table.insert("annotation".into(), toml::Value::String("Template".into()));
        let configured = ModuleConfig::from(&ModuleSpec {
            name: "sourcemod.transform.StripAnnotation".to_string(),
            properties: table,
        });
        assert_eq!(
            configured.properties.get("annotation"),
            Some("Template")
        );
    }
}
