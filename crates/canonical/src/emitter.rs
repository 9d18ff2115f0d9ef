//! Re-emits a tree-sitter Python syntax tree as canonical text.
//!
//! Layout comes from the tree, never from the input: one statement per
//! line, four spaces per block level, tokens joined by a fixed spacing
//! table. Comments, blank lines and line continuations are dropped.
//!
//! A few rewrites happen on nodes before tokens are joined: redundant
//! grouping parentheses are unwrapped, string literals are requoted, and a
//! bare tuple such as `1, 2` is printed as `(1, 2)`.

use std::borrow::Cow;

use tree_sitter::Node;

use crate::literals::canonical_string;
use crate::parens::redundant_inner;

/// Clauses that continue a compound statement on a new line at its depth.
pub(crate) const CLAUSES: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "case_clause",
];

/// Containers whose trailing comma carries no meaning.
const TRAILING_COMMA_PARENTS: &[&str] = &[
    "argument_list",
    "parameters",
    "list",
    "dictionary",
    "set",
    "import_from_statement",
];

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
struct Token<'a> {
    text: Cow<'a, str>,
    kind: &'static str,
    parent: &'static str,
}

impl Token<'_> {
    fn text(&self) -> &str {
        &self.text
    }

    /// Punctuation that has no node of its own in the tree.
    fn synthetic(text: &'static str, parent: &'static str) -> Token<'static> {
        Token {
            text: Cow::Borrowed(text),
            kind: text,
            parent,
        }
    }
}

pub(crate) struct Emitter<'a> {
    source: &'a str,
    lines: Vec<String>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: Vec::new(),
        }
    }

    pub(crate) fn emit_module(mut self, root: Node<'_>) -> String {
        self.emit_block(root, 0);
        self.lines.join("\n")
    }

    fn emit_block(&mut self, node: Node<'_>, depth: usize) {
        for child in children(node) {
            if child.is_named() && !child.is_extra() {
                self.emit_statement(child, depth);
            }
        }
    }

    fn emit_statement(&mut self, node: Node<'_>, depth: usize) {
        if node.kind() == "decorated_definition" {
            // Each decorator gets its own line above the definition
            self.emit_block(node, depth);
            return;
        }

        let mut tokens = Vec::new();
        for child in children(node) {
            if child.is_extra() {
                continue;
            }
            match child.kind() {
                "block" => {
                    self.push_line(depth, &mut tokens);
                    self.emit_block(child, depth + 1);
                }
                kind if CLAUSES.contains(&kind) => {
                    self.push_line(depth, &mut tokens);
                    self.emit_statement(child, depth);
                }
                _ => self.collect_tokens(child, &mut tokens),
            }
        }
        self.push_line(depth, &mut tokens);
    }

    fn collect_tokens(&self, node: Node<'_>, tokens: &mut Vec<Token<'a>>) {
        if node.is_extra() {
            return;
        }
        match node.kind() {
            // String literals are atomic: their inner whitespace is content
            "string" => {
                let raw = self.text_of(node);
                let text = canonical_string(raw).map_or(Cow::Borrowed(raw), Cow::Owned);
                tokens.push(Token {
                    text,
                    kind: "string",
                    parent: parent_kind(node),
                });
            }
            "parenthesized_expression" => match redundant_inner(node) {
                Some(inner) => self.collect_tokens(inner, tokens),
                None => self.collect_children(node, tokens),
            },
            "tuple" => self.collect_sequence(node, tokens),
            "expression_list" | "pattern_list" if is_bare_tuple(node) => {
                tokens.push(Token::synthetic("(", "tuple"));
                self.collect_sequence(node, tokens);
                tokens.push(Token::synthetic(")", "tuple"));
            }
            kind if node.child_count() == 0 => tokens.push(Token {
                text: Cow::Borrowed(self.text_of(node)),
                kind,
                parent: parent_kind(node),
            }),
            _ => self.collect_children(node, tokens),
        }
    }

    fn collect_children(&self, node: Node<'_>, tokens: &mut Vec<Token<'a>>) {
        for child in children(node) {
            self.collect_tokens(child, tokens);
        }
    }

    /// Tuple elements; a trailing comma survives only on a one-element tuple.
    fn collect_sequence(&self, node: Node<'_>, tokens: &mut Vec<Token<'a>>) {
        let items: Vec<Node<'_>> = children(node).into_iter().filter(|c| !c.is_extra()).collect();
        let elements = items.iter().filter(|c| c.is_named()).count();
        for (i, child) in items.iter().enumerate() {
            let trailing =
                child.kind() == "," && items.get(i + 1).map_or(true, |next| next.kind() == ")");
            if trailing && elements > 1 {
                continue;
            }
            self.collect_tokens(*child, tokens);
        }
    }

    fn text_of(&self, node: Node<'_>) -> &'a str {
        let source: &'a str = self.source;
        &source[node.byte_range()]
    }

    fn push_line(&mut self, depth: usize, tokens: &mut Vec<Token<'a>>) {
        if tokens.is_empty() {
            return;
        }
        let mut line = INDENT.repeat(depth);
        line.push_str(&render(tokens));
        self.lines.push(line);
        tokens.clear();
    }
}

pub(crate) fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn parent_kind(node: Node<'_>) -> &'static str {
    node.parent().map(|p| p.kind()).unwrap_or("")
}

/// An unparenthesized tuple in value position: `return a, b`, `t = 1, 2`.
/// `del a, b` names several targets and stays as written.
fn is_bare_tuple(node: Node<'_>) -> bool {
    if node.kind() == "expression_list" {
        return node.parent().is_some_and(|p| p.kind() != "delete_statement");
    }
    // `x = a, b` may parse its right side as a pattern list
    node.parent()
        .and_then(|p| p.child_by_field_name("right"))
        .is_some_and(|right| right == node)
}

fn render(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token<'_>> = None;
    for (i, token) in tokens.iter().enumerate() {
        if is_trailing_comma(token, tokens.get(i + 1)) {
            continue;
        }
        if let Some(p) = prev {
            if needs_space(p, token) {
                out.push(' ');
            }
        }
        out.push_str(token.text());
        prev = Some(token);
    }
    out
}

fn is_trailing_comma(token: &Token<'_>, next: Option<&Token<'_>>) -> bool {
    token.text() == ","
        && TRAILING_COMMA_PARENTS.contains(&token.parent)
        && matches!(next.map(|t| t.text()), Some(")" | "]" | "}"))
}

fn needs_space(prev: &Token<'_>, next: &Token<'_>) -> bool {
    // Relative imports: `from . import x`, `from ..pkg import y`
    if next.text() == "." && next.parent == "import_prefix" {
        return prev.text() == "from";
    }
    if prev.text() == "." && prev.parent == "import_prefix" {
        return next.text() == "import";
    }

    if matches!(next.text(), "," | ")" | "]" | "}" | ":" | ";" | ".") {
        return false;
    }
    if matches!(prev.text(), "(" | "[" | "{" | ".") {
        return false;
    }
    if matches!(next.text(), "(" | "[") && ends_primary(prev) {
        return false;
    }
    if prev.text() == ":" && prev.parent == "slice" {
        return false;
    }
    if [prev, next]
        .iter()
        .any(|t| t.text() == "=" && is_keyword_binding(t))
    {
        return false;
    }
    if is_prefix_operator(prev) {
        return false;
    }
    true
}

/// Tokens after which `(` or `[` is a call or subscript.
fn ends_primary(token: &Token<'_>) -> bool {
    token.kind == "identifier" || token.kind == "string" || matches!(token.text(), ")" | "]" | "}")
}

fn is_keyword_binding(eq: &Token<'_>) -> bool {
    matches!(eq.parent, "keyword_argument" | "default_parameter")
}

fn is_prefix_operator(token: &Token<'_>) -> bool {
    match token.text() {
        "-" | "+" | "~" => token.parent == "unary_operator",
        "*" | "**" => matches!(
            token.parent,
            "list_splat" | "dictionary_splat" | "list_splat_pattern" | "dictionary_splat_pattern"
        ),
        "@" => token.parent == "decorator",
        _ => false,
    }
}
