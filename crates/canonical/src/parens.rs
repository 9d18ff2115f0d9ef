//! Grouping parentheses that carry no meaning.
//!
//! `(x)` is dropped when the enclosing context would parse the bare
//! expression the same way, judged by Python operator precedence. Anything
//! the table below does not recognise keeps its parentheses.

use tree_sitter::Node;

use crate::emitter::children;

/// Atoms, calls, subscripts, attributes and displays.
const PRIMARY: u8 = 16;
const AWAIT: u8 = 15;
const POWER: u8 = 14;
const UNARY: u8 = 13;
const NOT: u8 = 5;
const CONDITIONAL: u8 = 2;
const LAMBDA: u8 = 1;

/// Contexts that accept any expression short of a walrus or `yield`.
const OPEN_CONTEXTS: &[&str] = &[
    "expression_statement",
    "assignment",
    "augmented_assignment",
    "return_statement",
    "argument_list",
    "keyword_argument",
    "list",
    "set",
    "tuple",
    "expression_list",
    "pair",
    "if_statement",
    "elif_clause",
    "while_statement",
    "for_statement",
    "with_item",
    "assert_statement",
    "delete_statement",
    "raise_statement",
    "decorator",
    "default_parameter",
    "typed_default_parameter",
    "slice",
    "list_comprehension",
    "set_comprehension",
    "generator_expression",
    "lambda",
];

/// The expression inside `node` when its parentheses can go.
pub(crate) fn redundant_inner(node: Node<'_>) -> Option<Node<'_>> {
    let inner = children(node)
        .into_iter()
        .find(|c| c.is_named() && !c.is_extra())?;

    // Nested parentheses are judged against the outermost context
    let mut context = node;
    while let Some(parent) = context.parent().filter(|p| p.kind() == "parenthesized_expression") {
        context = parent;
    }

    let required = required_precedence(context, inner)?;
    (precedence(inner) >= required).then_some(inner)
}

fn precedence(node: Node<'_>) -> u8 {
    match node.kind() {
        "named_expression" | "yield" => 0,
        "lambda" => LAMBDA,
        "conditional_expression" => CONDITIONAL,
        "boolean_operator" => match operator(node) {
            Some("or") => 3,
            _ => 4,
        },
        "not_operator" => NOT,
        "comparison_operator" => 6,
        "binary_operator" => operator(node).map_or(PRIMARY, binary_precedence),
        "unary_operator" => UNARY,
        "await" => AWAIT,
        _ => PRIMARY,
    }
}

fn binary_precedence(op: &str) -> u8 {
    match op {
        "|" => 7,
        "^" => 8,
        "&" => 9,
        "<<" | ">>" => 10,
        "+" | "-" => 11,
        "*" | "@" | "/" | "//" | "%" => 12,
        "**" => POWER,
        _ => PRIMARY,
    }
}

fn operator(node: Node<'_>) -> Option<&'static str> {
    node.child_by_field_name("operator").map(|op| op.kind())
}

/// Lowest precedence `inner` may have to stand unparenthesized at `context`.
fn required_precedence(context: Node<'_>, inner: Node<'_>) -> Option<u8> {
    let parent = context.parent()?;
    let is_field = |name: &str| parent.child_by_field_name(name) == Some(context);

    match parent.kind() {
        "binary_operator" => {
            let own = precedence(parent);
            let left = is_field("left");
            Some(match (own, left) {
                (POWER, true) => AWAIT,
                (POWER, false) => UNARY,
                (_, true) => own,
                (_, false) => own + 1,
            })
        }
        // Chains would merge with the inner operator
        "boolean_operator" => Some(precedence(parent) + 1),
        "comparison_operator" => Some(7),
        "not_operator" => Some(NOT),
        "unary_operator" => Some(UNARY),
        "await" => Some(PRIMARY),
        "conditional_expression" => {
            let last = children(parent)
                .into_iter()
                .filter(|c| c.is_named() && !c.is_extra())
                .last();
            Some(if last == Some(context) {
                CONDITIONAL
            } else {
                CONDITIONAL + 1
            })
        }
        "subscript" if !is_field("value") => Some(LAMBDA),
        // `(1).real` needs its parentheses
        "attribute" if matches!(inner.kind(), "integer" | "float") => None,
        "attribute" | "call" | "subscript" => Some(PRIMARY),
        "for_in_clause" | "if_clause" => Some(3),
        kind if OPEN_CONTEXTS.contains(&kind) => Some(LAMBDA),
        _ => None,
    }
}
