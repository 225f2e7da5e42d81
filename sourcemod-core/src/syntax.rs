//! Java syntax trees backing [`SourceUnit`](crate::SourceUnit).

use std::ops::Range;

use tree_sitter::{Node, Parser, Tree};

use crate::unit::ParseError;

/// Top-level node kinds that declare a type.
pub(crate) const TYPE_DECLARATIONS: [&str; 5] = [
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Tokens that introduce a type declaration.
const DECLARATION_KEYWORDS: [&str; 5] = ["class", "interface", "enum", "record", "@interface"];

/// Placeholder declaration appended to a header so it can be parsed alone.
const PLACEHOLDER_DECLARATION: &str = " class __Header {}";

pub(crate) fn parse(text: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::language())
        .map_err(|_| ParseError::Grammar)?;
    parser.parse(text, None).ok_or(ParseError::Unparsable)
}

pub(crate) fn text_of<'a>(node: Node<'_>, text: &'a str) -> &'a str {
    &text[node.byte_range()]
}

/// The anonymous keyword token of a type declaration node.
pub(crate) fn declaration_keyword(declaration: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = declaration.walk();
    let keyword = declaration
        .children(&mut cursor)
        .find(|child| !child.is_named() && DECLARATION_KEYWORDS.contains(&child.kind()));
    keyword
}

/// Annotations and dotted name of a `package_declaration` node.
pub(crate) fn package_parts<'a>(package: Node<'_>, text: &'a str) -> (&'a str, String) {
    let mut cursor = package.walk();
    let mut annotations_end = package.start_byte();
    let mut path = String::new();
    for child in package.children(&mut cursor) {
        match child.kind() {
            "package" => annotations_end = child.start_byte(),
            "identifier" | "scoped_identifier" => path = squeeze(text_of(child, text), ""),
            _ => {}
        }
    }
    (&text[package.start_byte()..annotations_end], path)
}

/// The imported path of an `import_declaration`, e.g. `static a.B.c` or `a.b.*`.
pub(crate) fn import_path(import: Node<'_>, text: &str) -> String {
    let inner = text_of(import, text)
        .trim_start_matches("import")
        .trim_end_matches(';');
    squeeze(inner, " ")
}

fn squeeze(text: &str, separator: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(separator)
}

/// Byte offset just past the end of the line containing `offset`.
pub(crate) fn line_end(text: &str, offset: usize) -> usize {
    text[offset..]
        .find('\n')
        .map(|index| offset + index + 1)
        .unwrap_or(text.len())
}

/// An annotation or keyword found in a declaration header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Modifier {
    Annotation { name: String, range: Range<usize> },
    Keyword(String),
}

impl Modifier {
    /// Whether this is the annotation `name`, given simple or qualified.
    pub fn is_annotation(&self, name: &str) -> bool {
        match self {
            Modifier::Annotation { name: found, .. } => {
                found == name || found.rsplit('.').next() == Some(name)
            }
            Modifier::Keyword(_) => false,
        }
    }
}

/// Annotations and modifier keywords of a declaration header, in order.
///
/// Comments are skipped. A header that does not parse as modifiers yields
/// nothing.
pub(crate) fn header_modifiers(header: &str) -> Vec<Modifier> {
    let source = format!("{header}{PLACEHOLDER_DECLARATION}");
    let Ok(tree) = parse(&source) else {
        return Vec::new();
    };

    let root = tree.root_node();
    let mut cursor = root.walk();
    let Some(declaration) = root
        .named_children(&mut cursor)
        .find(|node| node.kind() == "class_declaration")
    else {
        return Vec::new();
    };

    let mut cursor = declaration.walk();
    let Some(modifiers) = declaration
        .named_children(&mut cursor)
        .find(|node| node.kind() == "modifiers")
    else {
        return Vec::new();
    };

    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .filter(|node| node.end_byte() <= header.len())
        .filter_map(|node| match node.kind() {
            "line_comment" | "block_comment" => None,
            "annotation" | "marker_annotation" => {
                let name = node.child_by_field_name("name")?;
                Some(Modifier::Annotation {
                    name: squeeze(text_of(name, &source), ""),
                    range: node.byte_range(),
                })
            }
            _ => Some(Modifier::Keyword(text_of(node, &source).to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_modifiers_skip_comments() {
        let modifiers = header_modifiers("/** @Fake final */\n@Template(\"x\")\npublic final ");

        assert_eq!(
            modifiers,
            vec![
                Modifier::Annotation {
                    name: "Template".to_string(),
                    range: 19..34,
                },
                Modifier::Keyword("public".to_string()),
                Modifier::Keyword("final".to_string()),
            ]
        );
    }

    #[test]
    fn test_qualified_annotation_matches_simple_name() {
        let modifiers = header_modifiers("@com.example.Template ");
        assert!(modifiers[0].is_annotation("Template"));
        assert!(modifiers[0].is_annotation("com.example.Template"));
        assert!(!modifiers[0].is_annotation("Temp"));
    }

    #[test]
    fn test_char_literal_argument() {
        let modifiers = header_modifiers("@Sep('\"') public ");
        assert!(modifiers[0].is_annotation("Sep"));
        assert_eq!(modifiers[1], Modifier::Keyword("public".to_string()));
    }

    #[test]
    fn test_import_path_is_normalized() {
        let text = "import  static java.util.Objects.requireNonNull;\nimport java.util.*;\n";
        let tree = parse(text).unwrap();
        let root = tree.root_node();
        let mut cursor = root.walk();
        let paths: Vec<_> = root
            .named_children(&mut cursor)
            .map(|node| import_path(node, text))
            .collect();

        assert_eq!(paths, ["static java.util.Objects.requireNonNull", "java.util.*"]);
    }

    #[test]
    fn test_line_end() {
        assert_eq!(line_end("a; // x\nb", 2), 8);
        assert_eq!(line_end("a;", 2), 2);
    }
}
