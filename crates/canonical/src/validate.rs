//! Rejects source that Python 3 would not compile.
//!
//! tree-sitter-python is tolerant: it accepts Python 2 `print` and `exec`
//! statements, deleting a call, and a block that mixes tabs and spaces. Those
//! are reported here with the same position format as parse errors.

use complexity_common::{EvalError, Result};
use tree_sitter::Node;

use crate::emitter::{children, CLAUSES};

/// Longest source excerpt quoted in a syntax error.
const SNIPPET_LEN: usize = 24;

const TAB_SIZE: usize = 8;

pub(crate) fn check(root: Node<'_>, source: &str) -> Result<()> {
    if root.has_error() {
        return Err(parse_error(root, source));
    }
    if let Some((node, message)) = first_invalid(root) {
        return Err(error_at(node, message));
    }
    check_indentation(root, source)
}

fn error_at(node: Node<'_>, message: String) -> EvalError {
    let position = node.start_position();
    EvalError::Syntax {
        line: position.row + 1,
        column: position.column + 1,
        message,
    }
}

fn parse_error(root: Node<'_>, source: &str) -> EvalError {
    let node = first_error(root).unwrap_or(root);
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet: String = source[node.byte_range()]
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(SNIPPET_LEN)
            .collect();
        format!("unexpected `{snippet}`")
    };
    error_at(node, message)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    children(node).into_iter().find_map(first_error)
}

/// First construct, in source order, that parses but is not Python 3.
fn first_invalid(node: Node<'_>) -> Option<(Node<'_>, String)> {
    match node.kind() {
        "print_statement" => return Some((node, "Python 2 `print` statement".to_string())),
        "exec_statement" => return Some((node, "Python 2 `exec` statement".to_string())),
        "delete_statement" => {
            let bad = children(node)
                .into_iter()
                .filter(|c| c.is_named() && !c.is_extra())
                .find_map(invalid_target);
            if let Some(target) = bad {
                return Some((target, format!("cannot delete {}", describe(target))));
            }
        }
        "assignment" | "augmented_assignment" => {
            let bad = node.child_by_field_name("left").and_then(|left| {
                if node.kind() == "augmented_assignment" {
                    (!matches!(left.kind(), "identifier" | "attribute" | "subscript")).then_some(left)
                } else {
                    invalid_target(left)
                }
            });
            if let Some(target) = bad {
                return Some((target, format!("cannot assign to {}", describe(target))));
            }
        }
        _ => {}
    }
    children(node).into_iter().find_map(first_invalid)
}

/// The first part of `node` that cannot be bound or deleted.
fn invalid_target(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "identifier" | "attribute" | "subscript" => None,
        "tuple" | "list" | "expression_list" | "pattern_list" | "tuple_pattern"
        | "list_pattern" | "parenthesized_expression" | "list_splat" | "list_splat_pattern" => {
            children(node)
                .into_iter()
                .filter(|c| c.is_named() && !c.is_extra())
                .find_map(invalid_target)
        }
        _ => Some(node),
    }
}

fn describe(node: Node<'_>) -> &'static str {
    match node.kind() {
        "call" => "function call",
        "integer" | "float" | "string" | "concatenated_string" | "true" | "false" | "none" => {
            "literal"
        }
        kind => kind,
    }
}

/// Python compares every indent twice, with tabs as 8 columns and as 1.
/// Disagreement between the two is a TabError; tree-sitter only uses the
/// first.
fn check_indentation(root: Node<'_>, source: &str) -> Result<()> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut rows = Vec::new();
    statement_rows(root, &lines, &mut rows);
    rows.sort_unstable();
    rows.dedup();

    let mut stack = vec![(0usize, 0usize)];
    for row in rows {
        let (col, alt) = indentation(lines.get(row).copied().unwrap_or(""));
        let &(top_col, top_alt) = stack.last().unwrap_or(&(0, 0));
        let consistent = if col > top_col {
            stack.push((col, alt));
            alt > top_alt
        } else {
            while stack.len() > 1 && stack.last().is_some_and(|&(c, _)| col < c) {
                stack.pop();
            }
            stack.last().is_some_and(|&(c, a)| c != col || a == alt)
        };
        if !consistent {
            return Err(EvalError::Syntax {
                line: row + 1,
                column: 1,
                message: "inconsistent use of tabs and spaces in indentation".to_string(),
            });
        }
    }
    Ok(())
}

/// Rows on which a statement or clause starts its line.
fn statement_rows(node: Node<'_>, lines: &[&str], rows: &mut Vec<usize>) {
    for child in children(node) {
        if !child.is_named() || child.is_extra() {
            continue;
        }
        let starts_statement = matches!(
            node.kind(),
            "module" | "block" | "decorated_definition"
        ) || CLAUSES.contains(&child.kind());
        if starts_statement {
            let position = child.start_position();
            let line = lines.get(position.row).copied().unwrap_or("");
            let leads = line
                .get(..position.column)
                .is_some_and(|prefix| prefix.chars().all(|c| matches!(c, ' ' | '\t' | '\x0c')));
            if leads {
                rows.push(position.row);
            }
        }
        statement_rows(child, lines, rows);
    }
}

/// Indent width with tabs to the next multiple of 8, and with tabs as 1.
fn indentation(line: &str) -> (usize, usize) {
    let (mut col, mut alt) = (0, 0);
    for c in line.chars() {
        match c {
            ' ' => {
                col += 1;
                alt += 1;
            }
            '\t' => {
                col = (col / TAB_SIZE + 1) * TAB_SIZE;
                alt += 1;
            }
            '\x0c' => {
                col = 0;
                alt = 0;
            }
            _ => break,
        }
    }
    (col, alt)
}
