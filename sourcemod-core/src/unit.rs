//! Parsed source units.

use std::fmt;

use thiserror::Error;

use crate::syntax::{self, Modifier, TYPE_DECLARATIONS};

/// Name given to units that declare only a package.
pub const PACKAGE_INFO: &str = "package-info";

/// Error raised when text cannot be read as a source unit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no type or package declaration found")]
    MissingDeclaration,

    #[error("failed to load the Java grammar")]
    Grammar,

    #[error("the parser produced no syntax tree")]
    Unparsable,
}

/// The kind of type a source unit declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Class,
    Record,
    Interface,
    Annotation,
    Enum,
    /// A `package-info` file: a package declaration without a type.
    PackageInfo,
}

impl UnitKind {
    /// The declaration keyword for this kind, empty for package-info units.
    pub fn keyword(&self) -> &'static str {
        match self {
            UnitKind::Class => "class",
            UnitKind::Record => "record",
            UnitKind::Interface => "interface",
            UnitKind::Annotation => "@interface",
            UnitKind::Enum => "enum",
            UnitKind::PackageInfo => "",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(UnitKind::Class),
            "record" => Some(UnitKind::Record),
            "interface" => Some(UnitKind::Interface),
            "@interface" => Some(UnitKind::Annotation),
            "enum" => Some(UnitKind::Enum),
            _ => None,
        }
    }

    fn empty_body(&self) -> &'static str {
        match self {
            UnitKind::Record => "() {\n}\n",
            UnitKind::PackageInfo => "",
            _ => " {\n}\n",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Annotation => write!(f, "annotation"),
            UnitKind::PackageInfo => write!(f, "{PACKAGE_INFO}"),
            other => write!(f, "{}", other.keyword()),
        }
    }
}

/// One parsed, mutable source file.
///
/// The unit is split into the pieces transformers work on: the namespace
/// (package) declaration, the import list, the header (comments, annotations
/// and modifiers in front of the declaration), the declared name and the body
/// that follows it. Printing reassembles the pieces in that order.
///
/// A file declaring only a package parses as a [`UnitKind::PackageInfo`]
/// unit named `package-info`. Its header is empty and its body holds
/// whatever follows the imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    kind: UnitKind,
    name: String,
    namespace: String,
    leading: String,
    package_annotations: String,
    imports: Vec<String>,
    header: String,
    body: String,
}

impl SourceUnit {
    /// Create an empty unit of the given kind. Type declarations are public.
    pub fn new(kind: UnitKind, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let header = match kind {
            UnitKind::PackageInfo => "",
            _ => "public ",
        };
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            leading: String::new(),
            package_annotations: String::new(),
            imports: Vec::new(),
            header: header.to_string(),
            body: kind.empty_body().to_string(),
        }
    }

    /// Parse source text.
    ///
    /// Comments on the package and import lines are dropped; everything from
    /// the line after the last import up to the declaration keyword becomes
    /// the header.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let tree = syntax::parse(text)?;
        let root = tree.root_node();

        let mut leading = String::new();
        let mut package_annotations = String::new();
        let mut namespace = None;
        let mut imports = Vec::new();
        let mut cursor = 0;
        let mut declaration = None;

        let mut walker = root.walk();
        for node in root.named_children(&mut walker) {
            match node.kind() {
                "package_declaration" if namespace.is_none() => {
                    let (annotations, path) = syntax::package_parts(node, text);
                    leading = text[..node.start_byte()].to_string();
                    package_annotations = annotations.to_string();
                    namespace = Some(path);
                    cursor = syntax::line_end(text, node.end_byte());
                }
                "import_declaration" => {
                    imports.push(syntax::import_path(node, text));
                    cursor = syntax::line_end(text, node.end_byte());
                }
                kind if TYPE_DECLARATIONS.contains(&kind) => {
                    declaration = Some(node);
                    break;
                }
                _ => {}
            }
        }

        let Some(declaration) = declaration else {
            return match namespace {
                Some(namespace) if !root.has_error() => Ok(Self {
                    kind: UnitKind::PackageInfo,
                    name: PACKAGE_INFO.to_string(),
                    namespace,
                    leading,
                    package_annotations,
                    imports,
                    header: String::new(),
                    body: trim_line_breaks(&text[cursor..]).to_string(),
                }),
                _ => Err(ParseError::MissingDeclaration),
            };
        };

        let keyword =
            syntax::declaration_keyword(declaration).ok_or(ParseError::MissingDeclaration)?;
        let kind = UnitKind::from_keyword(keyword.kind()).ok_or(ParseError::MissingDeclaration)?;
        let name = declaration
            .child_by_field_name("name")
            .ok_or(ParseError::MissingDeclaration)?;

        Ok(Self {
            kind,
            name: syntax::text_of(name, text).to_string(),
            namespace: namespace.unwrap_or_default(),
            leading,
            package_annotations,
            imports,
            header: trim_line_breaks(&text[cursor..keyword.start_byte()]).to_string(),
            body: text[name.end_byte()..].to_string(),
        })
    }

    /// The declared kind.
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// The unqualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The dot-separated namespace path, empty for the default namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    /// `namespace.Name`, or just the name in the default namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn has_import(&self, import: &str) -> bool {
        self.imports.iter().any(|i| i == import)
    }

    /// Add an import unless it is already present. Returns whether it was added.
    pub fn add_import(&mut self, import: impl Into<String>) -> bool {
        let import = import.into();
        if self.has_import(&import) {
            return false;
        }
        self.imports.push(import);
        true
    }

    /// Remove an import. Returns whether it was present.
    pub fn remove_import(&mut self, import: &str) -> bool {
        let before = self.imports.len();
        self.imports.retain(|i| i != import);
        self.imports.len() != before
    }

    /// Remove every import matching the predicate, returning how many were removed.
    pub fn remove_imports_where(&mut self, mut predicate: impl FnMut(&str) -> bool) -> usize {
        let before = self.imports.len();
        self.imports.retain(|i| !predicate(i));
        before - self.imports.len()
    }

    /// Comments, annotations and modifiers in front of the declaration keyword.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = header.into();
    }

    /// Everything following the declared name.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Whether the header carries `@name`.
    pub fn has_annotation(&self, name: &str) -> bool {
        syntax::header_modifiers(&self.header)
            .iter()
            .any(|modifier| modifier.is_annotation(name))
    }

    /// Remove every `@name` (with its arguments) from the header, along with
    /// the line break that follows it.
    pub fn remove_annotation(&mut self, name: &str) -> bool {
        let spans: Vec<_> = syntax::header_modifiers(&self.header)
            .into_iter()
            .filter(|modifier| modifier.is_annotation(name))
            .filter_map(|modifier| match modifier {
                Modifier::Annotation { range, .. } => Some(range),
                Modifier::Keyword(_) => None,
            })
            .collect();
        if spans.is_empty() {
            return false;
        }

        let mut header = String::with_capacity(self.header.len());
        let mut last = 0;
        for span in spans {
            header.push_str(&self.header[last..span.start]);
            last = skip_line_gap(&self.header, span.end);
        }
        header.push_str(&self.header[last..]);
        self.header = header;
        true
    }

    /// Whether the header contains the modifier keyword.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        syntax::header_modifiers(&self.header)
            .iter()
            .any(|found| matches!(found, Modifier::Keyword(keyword) if keyword == modifier))
    }

    /// Append a modifier directly in front of the declaration keyword.
    pub fn add_modifier(&mut self, modifier: &str) {
        if !self.header.is_empty() && !self.header.ends_with(char::is_whitespace) {
            self.header.push(' ');
        }
        self.header.push_str(modifier);
        self.header.push(' ');
    }

    /// Print the unit back to source text.
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declares_nothing =
            self.kind == UnitKind::PackageInfo && self.header.is_empty() && self.body.is_empty();
        let package_only = declares_nothing && self.imports.is_empty();

        f.write_str(&self.leading)?;
        if !self.namespace.is_empty() {
            writeln!(
                f,
                "{}package {};",
                self.package_annotations, self.namespace
            )?;
            if !package_only {
                writeln!(f)?;
            }
        }
        for import in &self.imports {
            writeln!(f, "import {};", import)?;
        }
        if !self.imports.is_empty() && !declares_nothing {
            writeln!(f)?;
        }
        match self.kind {
            UnitKind::PackageInfo => write!(f, "{}{}", self.header, self.body),
            kind => write!(
                f,
                "{}{} {}{}",
                self.header,
                kind.keyword(),
                self.name,
                self.body
            ),
        }
    }
}

fn trim_line_breaks(text: &str) -> &str {
    text.trim_start_matches(['\r', '\n'])
}

/// Offset past the spaces, single line break and indentation following `offset`.
fn skip_line_gap(text: &str, offset: usize) -> usize {
    let rest = &text[offset..];
    let after_spaces = rest.trim_start_matches([' ', '\t']);
    let after_break = after_spaces
        .strip_prefix("\r\n")
        .or_else(|| after_spaces.strip_prefix('\n'));
    let remaining = match after_break {
        Some(next_line) => next_line.trim_start_matches([' ', '\t']),
        None => after_spaces,
    };
    offset + rest.len() - remaining.len()
}
