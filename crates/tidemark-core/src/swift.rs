//! Swift structure extractor using Tree-sitter.
//!
//! [`SwiftSyntax`] is the default [`SyntaxService`]. It maps the concrete
//! syntax tree onto [`DeclarationNode`]s:
//!
//! - `protocol`, `class`/`actor`, `struct`, `enum`, `extension` and `func`
//!   declarations, nested by their bodies and located at their keyword;
//! - parenthesised call expressions, located at their opening parenthesis,
//!   with one [`DeclarationKind::Argument`] per value argument. Trailing
//!   closures are not arguments, and subscripts are not calls.
//!
//! Anything else is transparent: its declarations and calls are attached to
//! the nearest enclosing node.

use tree_sitter::{Language, Node, Parser};

use crate::source::{DeclarationKind, DeclarationNode};
use crate::syntax::{SyntaxError, SyntaxService};

/// Extracts declarations and call arguments from Swift source.
#[derive(Clone)]
pub struct SwiftSyntax {
    language: Language,
}

impl SwiftSyntax {
    /// Creates a new Swift extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_swift::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    fn classify(node: &Node<'_>) -> Option<DeclarationKind> {
        match node.kind() {
            "protocol_declaration" => Some(DeclarationKind::Protocol),
            "class_declaration" => {
                let keyword = node
                    .child_by_field_name("declaration_kind")
                    .map_or("class", |keyword| keyword.kind());
                Some(match keyword {
                    "struct" => DeclarationKind::Struct,
                    "enum" => DeclarationKind::Enum,
                    "extension" => DeclarationKind::Extension,
                    _ => DeclarationKind::Class,
                })
            }
            "function_declaration" | "protocol_function_declaration" => {
                Some(DeclarationKind::Function)
            }
            _ => None,
        }
    }

    /// Start of the introducing keyword, skipping attributes and modifiers.
    fn keyword_start(node: &Node<'_>) -> usize {
        if let Some(keyword) = node.child_by_field_name("declaration_kind") {
            return keyword.start_byte();
        }
        let mut cursor = node.walk();
        let func = node.children(&mut cursor).find(|child| child.kind() == "func");
        func.map_or(node.start_byte(), |keyword| keyword.start_byte())
    }

    fn visit(node: Node<'_>, src: &[u8], out: &mut Vec<DeclarationNode>) {
        if let Some(kind) = Self::classify(&node) {
            out.push(Self::declaration(node, kind, src));
            return;
        }
        if node.kind() == "call_expression" {
            if let Some(call) = Self::call(node, src) {
                out.push(call);
                return;
            }
        }
        Self::visit_children(node, src, out);
    }

    fn visit_children(node: Node<'_>, src: &[u8], out: &mut Vec<DeclarationNode>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            Self::visit(child, src, out);
        }
    }

    fn declaration(node: Node<'_>, kind: DeclarationKind, src: &[u8]) -> DeclarationNode {
        let offset = Self::keyword_start(&node);
        let mut children = Vec::new();
        Self::visit_children(node, src, &mut children);

        let declaration = DeclarationNode::new(kind, offset, node.end_byte().saturating_sub(offset))
            .with_children(children);
        match node.child_by_field_name("name") {
            Some(name) => declaration.named(Self::text(&name, src)),
            None => declaration,
        }
    }

    /// Builds a call node, or `None` when the expression has no parenthesised
    /// argument list.
    fn call(node: Node<'_>, src: &[u8]) -> Option<DeclarationNode> {
        let mut cursor = node.walk();
        let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        let (suffix, callee) = parts.split_last()?;
        if suffix.kind() != "call_suffix" {
            return None;
        }

        let mut suffix_cursor = suffix.walk();
        let suffix_parts: Vec<Node<'_>> = suffix.named_children(&mut suffix_cursor).collect();
        let arguments = suffix_parts
            .iter()
            .find(|part| part.kind() == "value_arguments")?;
        let mut arguments_cursor = arguments.walk();
        let parenthesised = arguments
            .children(&mut arguments_cursor)
            .next()
            .is_some_and(|open| open.kind() == "(");
        if !parenthesised {
            return None;
        }

        let mut children = Vec::new();
        for part in callee {
            Self::visit(*part, src, &mut children);
        }
        let mut argument_cursor = arguments.walk();
        for argument in arguments.named_children(&mut argument_cursor) {
            if argument.kind() == "value_argument" {
                children.push(Self::argument(argument, src));
            } else {
                Self::visit(argument, src, &mut children);
            }
        }
        for part in suffix_parts.iter().filter(|part| part.id() != arguments.id()) {
            Self::visit(*part, src, &mut children);
        }

        let open = arguments.start_byte();
        let call = DeclarationNode::new(DeclarationKind::Call, open, node.end_byte() - open)
            .with_children(children);
        Some(match (callee.first(), callee.last()) {
            (Some(first), Some(last)) => call.named(
                std::str::from_utf8(&src[first.start_byte()..last.end_byte()]).unwrap_or(""),
            ),
            _ => call,
        })
    }

    fn argument(node: Node<'_>, src: &[u8]) -> DeclarationNode {
        let mut children = Vec::new();
        Self::visit_children(node, src, &mut children);
        let argument = DeclarationNode::new(
            DeclarationKind::Argument,
            node.start_byte(),
            node.end_byte() - node.start_byte(),
        )
        .with_children(children);
        match node.child_by_field_name("name") {
            Some(label) => argument.named(Self::text(&label, src)),
            None => argument,
        }
    }
}

impl Default for SwiftSyntax {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxService for SwiftSyntax {
    fn structure(&self, contents: &str) -> Result<DeclarationNode, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| SyntaxError::Extraction {
                message: e.to_string(),
            })?;

        let src = contents.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or_else(|| SyntaxError::Extraction {
                message: "parser returned no tree".to_string(),
            })?;

        let mut children = Vec::new();
        Self::visit_children(tree.root_node(), src, &mut children);
        Ok(DeclarationNode::file(contents.len(), children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> DeclarationNode {
        SwiftSyntax::new()
            .structure(src)
            .expect("swift language loads")
    }

    fn summary(node: &DeclarationNode) -> Vec<(DeclarationKind, Option<&str>)> {
        node.walk()
            .skip(1)
            .filter(|n| n.kind != DeclarationKind::Call && n.kind != DeclarationKind::Argument)
            .map(|n| (n.kind, n.name.as_deref()))
            .collect()
    }

    fn calls(node: &DeclarationNode) -> Vec<&DeclarationNode> {
        node.walk()
            .filter(|n| n.kind == DeclarationKind::Call)
            .collect()
    }

    #[test]
    fn finds_nested_declarations() {
        let src = "protocol Drawable {\n    func draw()\n    func erase()\n}\n\nstruct Circle: Drawable {\n    func draw() {}\n}\n";
        let tree = parse(src);
        assert_eq!(
            summary(&tree),
            vec![
                (DeclarationKind::Protocol, Some("Drawable")),
                (DeclarationKind::Function, Some("draw")),
                (DeclarationKind::Function, Some("erase")),
                (DeclarationKind::Struct, Some("Circle")),
                (DeclarationKind::Function, Some("draw")),
            ]
        );
        let protocol = &tree.children[0];
        assert_eq!(protocol.offset, 0);
        assert_eq!(protocol.length, src.find('}').unwrap() + 1);
    }

    #[test]
    fn declaration_offset_skips_modifiers() {
        let src = "public final class Box {}\n";
        let tree = parse(src);
        assert_eq!(tree.children[0].kind, DeclarationKind::Class);
        assert_eq!(tree.children[0].offset, src.find("class").unwrap());
    }

    #[test]
    fn ignores_keywords_in_comments_and_strings() {
        let src = "// protocol Hidden {}\nlet s = \"protocol Quoted {}\"\n/* class Gone {} */\nprotocol Visible {}\n";
        let tree = parse(src);
        let names: Vec<_> = summary(&tree).into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec![Some("Visible")]);
    }

    #[test]
    fn classifies_type_keywords() {
        let src = "enum E {}\nextension E {}\nclass C {\n    class func make() -> C { C() }\n}\n";
        let kinds: Vec<_> = summary(&parse(src)).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                DeclarationKind::Enum,
                DeclarationKind::Extension,
                DeclarationKind::Class,
                DeclarationKind::Function,
            ]
        );
    }

    #[test]
    fn extracts_call_arguments_with_labels() {
        let src = "foo(1, bar: baz) { }";
        let tree = parse(src);
        let call = &tree.children[0];
        assert_eq!(call.kind, DeclarationKind::Call);
        assert_eq!(call.name.as_deref(), Some("foo"));
        let args: Vec<_> = call
            .children
            .iter()
            .filter(|a| a.kind == DeclarationKind::Argument)
            .map(|a| (a.name.as_deref(), &src[a.offset..a.offset + a.length]))
            .collect();
        assert_eq!(args, vec![(None, "1"), (Some("bar"), "bar: baz")]);
    }

    #[test]
    fn generic_arguments_do_not_split_call_arguments() {
        let src = "foo(x as Dictionary<String, Int>,\n    y)\n";
        let tree = parse(src);
        let found = calls(&tree);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].children.len(), 2);
    }

    #[test]
    fn nested_calls_belong_to_their_argument() {
        let src = "outer(inner(1, 2), x.y(3))";
        let tree = parse(src);
        let outer = &tree.children[0];
        assert_eq!(outer.children.len(), 2);
        assert_eq!(outer.children[0].children[0].name.as_deref(), Some("inner"));
        assert_eq!(outer.children[0].children[0].children.len(), 2);
        assert_eq!(outer.children[1].children[0].name.as_deref(), Some("x.y"));
    }

    #[test]
    fn call_is_located_at_its_parenthesis() {
        let src = "let x = foo\n    .bar(a,\n         b)\n";
        let tree = parse(src);
        let call = calls(&tree)[0];
        assert_eq!(call.offset, src.find('(').unwrap());
    }

    #[test]
    fn empty_call_has_no_arguments() {
        let tree = parse("foo()");
        assert_eq!(tree.children[0].kind, DeclarationKind::Call);
        assert!(tree.children[0].children.is_empty());
    }

    #[test]
    fn control_flow_and_subscripts_are_not_calls() {
        let src = "func run(a: Int) {\n    if (a > 1) { print(a) }\n    let b = values[0, 1]\n}\n";
        let names: Vec<_> = calls(&parse(src))
            .into_iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(names, vec![Some("print".to_string())]);
    }

    #[test]
    fn malformed_input_still_produces_a_tree() {
        let tree = parse("protocol Open {\n    func f(\n");
        assert_eq!(tree.kind, DeclarationKind::File);
        assert_eq!(tree.offset, 0);
    }
}
