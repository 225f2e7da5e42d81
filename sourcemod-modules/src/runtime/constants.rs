use eyre::{Result, bail};
use sourcemod_pipeline::{Generator, NamespaceTree, Properties};

const CONSTANT_PREFIX: &str = "constant.";

/// Generates one class of `public static final String` constants.
///
/// Configured with `namespace`, `name` and one `constant.<KEY>` property per
/// field.
#[derive(Debug)]
pub struct GenerateConstants {
    namespace: String,
    name: String,
    constants: Vec<(String, String)>,
}

impl GenerateConstants {
    pub const NAME: &'static str = "sourcemod.generate.Constants";

    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            constants: Vec::new(),
        }
    }

    pub fn constant(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.push((key.into(), value.into()));
        self
    }

    pub(crate) fn configured(properties: &Properties) -> Result<Box<dyn Generator>> {
        let mut generator = Self::new(
            properties.require("namespace")?.trim(),
            properties.require("name")?.trim(),
        );
        for (key, value) in properties.prefixed(CONSTANT_PREFIX) {
            if !is_identifier(key) {
                bail!("'{CONSTANT_PREFIX}{key}' does not name a valid field");
            }
            generator = generator.constant(key, value);
        }
        Ok(Box::new(generator))
    }
}

impl Generator for GenerateConstants {
    fn generate(&mut self, tree: &mut NamespaceTree) -> Result<()> {
        let root = tree.root();
        let node = tree.get_or_create(root, &self.namespace)?;
        let id = tree.create_class(node, &self.name)?;

        let fields: String = self
            .constants
            .iter()
            .map(|(key, value)| {
                format!(
                    "\n    public static final String {key} = \"{}\";\n",
                    escape(value)
                )
            })
            .collect();

        let unit = tree.unit_mut(id);
        unit.set_header("public final ");
        unit.set_body(format!(
            " {{\n{fields}\n    private {}() {{\n    }}\n}}\n",
            self.name
        ));
        Ok(())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
