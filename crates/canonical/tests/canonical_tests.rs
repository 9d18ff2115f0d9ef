//! Canonical form of Python snippets

use complexity_canonical::{canonicalize, structurally_equal, Canonicalizer};
use complexity_common::EvalError;

const COUNT_PAIRS_FOUR_SPACE: &str = "def count_pairs(arr):\n    count = 0\n    for i in range(len(arr)):\n        for j in range(len(arr)):\n            if arr[i] < arr[j]:\n                count += 1\n    return count\n";

const COUNT_PAIRS_MIXED: &str = "def count_pairs(arr):\n count = 0\n for i in range(len(arr)):\n   for j in range(len(arr)):\n        if arr[i] < arr[j]:\n             count += 1\n return count\n";

const MAX_VALUE_DEEP: &str = "def max_value(arr):
            m = arr[0]
            for x in arr:
                if x > m:
                    m = x
            return m";

const MAX_VALUE_FLAT: &str = "def max_value(arr):
    m = arr[0]
    for x in arr:
        if x > m:
            m = x
    return m";

// ============================================================================
// Formatting-only differences
// ============================================================================

#[test]
fn test_count_pairs_variants_are_equal() {
    assert!(structurally_equal(COUNT_PAIRS_FOUR_SPACE, COUNT_PAIRS_MIXED).unwrap());
}

#[test]
fn test_count_pairs_canonical_text() {
    let canonical = canonicalize(COUNT_PAIRS_MIXED).unwrap();
    assert_eq!(canonical, COUNT_PAIRS_FOUR_SPACE.trim_end());
}

#[test]
fn test_max_value_variants_are_equal() {
    assert!(structurally_equal(MAX_VALUE_DEEP, MAX_VALUE_FLAT).unwrap());
    assert_eq!(canonicalize(MAX_VALUE_DEEP).unwrap(), MAX_VALUE_FLAT);
}

#[test]
fn test_comments_and_blank_lines_are_dropped() {
    let source = "# header\nx = 1  # note\n\n\ny = 2\n";
    assert_eq!(canonicalize(source).unwrap(), "x = 1\ny = 2");
}

#[test]
fn test_token_spacing_is_normalized() {
    assert_eq!(canonicalize("x=f( a ,b )").unwrap(), "x = f(a, b)");
    assert_eq!(canonicalize("d = {'k' :1}").unwrap(), "d = {'k': 1}");
    assert_eq!(canonicalize("y = obj . attr [ 0 ]").unwrap(), "y = obj.attr[0]");
}

#[test]
fn test_line_continuation_is_joined() {
    assert_eq!(canonicalize("x = 1 + \\\n    2\n").unwrap(), "x = 1 + 2");
}

#[test]
fn test_one_line_body_matches_block_body() {
    assert!(structurally_equal("if x: y = 1\n", "if x:\n    y = 1\n").unwrap());
}

#[test]
fn test_semicolons_split_statements() {
    assert_eq!(canonicalize("a = 1; b = 2\n").unwrap(), "a = 1\nb = 2");
}

#[test]
fn test_trailing_comma_in_call_is_ignored() {
    assert!(structurally_equal("f(a, b,)\n", "f(a, b)\n").unwrap());
    assert!(structurally_equal("xs = [1, 2,]\n", "xs = [1, 2]\n").unwrap());
}

#[test]
fn test_one_element_tuple_keeps_its_comma() {
    assert!(!structurally_equal("t = (a,)\n", "t = (a)\n").unwrap());
}

// ============================================================================
// Redundant syntax
// ============================================================================

#[test]
fn test_redundant_parentheses_are_dropped() {
    assert!(structurally_equal("x = (1)\n", "x = 1\n").unwrap());
    assert!(structurally_equal("if (x > 0):\n    pass\n", "if x > 0:\n    pass\n").unwrap());
    assert!(structurally_equal("return ((n))\n", "return n\n").unwrap());
    assert_eq!(canonicalize("y = (a) + (b * c)").unwrap(), "y = a + b * c");
    assert_eq!(canonicalize("y = (a - b) - c").unwrap(), "y = a - b - c");
}

#[test]
fn test_grouping_parentheses_are_kept() {
    assert_eq!(canonicalize("y = (a + b) * c").unwrap(), "y = (a + b) * c");
    assert_eq!(canonicalize("y = ((a + b)) * c").unwrap(), "y = (a + b) * c");
    assert_eq!(canonicalize("y = a - (b - c)").unwrap(), "y = a - (b - c)");
    assert_eq!(canonicalize("y = (-x) ** 2").unwrap(), "y = (-x) ** 2");
    assert_eq!(canonicalize("y = (1).real").unwrap(), "y = (1).real");
    assert!(!structurally_equal("y = a - (b - c)\n", "y = a - b - c\n").unwrap());
}

#[test]
fn test_quote_style_is_ignored() {
    assert!(structurally_equal("s = 'a'\n", "s = \"a\"\n").unwrap());
    assert!(structurally_equal("s = 'it\\'s'\n", "s = \"it's\"\n").unwrap());
    assert_eq!(canonicalize("s = \"a\"").unwrap(), "s = 'a'");
    assert!(!structurally_equal("s = 'a'\n", "s = \"b\"\n").unwrap());
}

#[test]
fn test_bare_tuple_gets_parentheses() {
    assert!(structurally_equal("t = 1, 2\n", "t = (1, 2)\n").unwrap());
    assert!(structurally_equal("t = 1,\n", "t = (1,)\n").unwrap());
    assert!(structurally_equal("def f():\n    return a, b\n", "def f():\n    return (a, b)\n").unwrap());
    assert_eq!(canonicalize("t = 1, 2,").unwrap(), "t = (1, 2)");
    assert_eq!(canonicalize("for x, y in pairs:\n    pass").unwrap(), "for x, y in pairs:\n    pass");
}

// ============================================================================
// Structural differences
// ============================================================================

#[test]
fn test_different_nesting_is_not_equal() {
    let inside = "for x in xs:\n    if x:\n        y = x\n    z = 1\n";
    let outside = "for x in xs:\n    if x:\n        y = x\nz = 1\n";
    assert!(!structurally_equal(inside, outside).unwrap());
}

#[test]
fn test_string_contents_are_preserved() {
    assert!(!structurally_equal("s = 'a  b'\n", "s = 'a b'\n").unwrap());
    assert_eq!(canonicalize("s = 'a  b'").unwrap(), "s = 'a  b'");
}

#[test]
fn test_renamed_identifier_is_not_equal() {
    assert!(!structurally_equal("x = 1\n", "y = 1\n").unwrap());
}

// ============================================================================
// Compound statements
// ============================================================================

#[test]
fn test_if_elif_else_layout() {
    let source = "if a:\n  x = 1\nelif b:\n        x = 2\nelse:\n x = 3\n";
    let expected = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3";
    assert_eq!(canonicalize(source).unwrap(), expected);
}

#[test]
fn test_try_except_finally_layout() {
    let source = "try:\n  f()\nexcept ValueError as e:\n  g(e)\nfinally:\n  h()\n";
    let expected = "try:\n    f()\nexcept ValueError as e:\n    g(e)\nfinally:\n    h()";
    assert_eq!(canonicalize(source).unwrap(), expected);
}

#[test]
fn test_decorated_function_layout() {
    let source = "@cache\ndef fib(n, memo=None):\n  return n if n < 2 else fib(n - 1) + fib(n - 2)\n";
    let expected =
        "@cache\ndef fib(n, memo=None):\n    return n if n < 2 else fib(n - 1) + fib(n - 2)";
    assert_eq!(canonicalize(source).unwrap(), expected);
}

// ============================================================================
// Errors and degenerate input
// ============================================================================

#[test]
fn test_syntax_errors_are_reported() {
    for source in ["def broken(:\n    return 1\n", "x = (1, 2\n"] {
        match canonicalize(source) {
            Err(EvalError::Syntax { line, column, .. }) => {
                assert!(line >= 1 && column >= 1, "{source:?}");
            }
            other => panic!("expected a syntax error for {source:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_non_python3_statements_are_rejected() {
    let cases = [
        ("print 'hello'\n", 1),
        ("x = 1\nexec 'x = 1'\n", 2),
        ("if x:\n\ty = 1\n        z = 2\n", 3),
        ("del f()\n", 1),
        ("del a, 1\n", 1),
    ];
    for (source, expected_line) in cases {
        match canonicalize(source) {
            Err(EvalError::Syntax { line, column, .. }) => {
                assert_eq!(line, expected_line, "{source:?}");
                assert!(column >= 1, "{source:?}");
            }
            other => panic!("expected a syntax error for {source:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_valid_targets_and_consistent_tabs_are_accepted() {
    assert_eq!(canonicalize("del a, b[0], c.d\n").unwrap(), "del a, b[0], c.d");
    assert_eq!(canonicalize("print('hi')\n").unwrap(), "print('hi')");
    assert_eq!(canonicalize("if x:\n\ty = 1\n\tz = 2\n").unwrap(), "if x:\n    y = 1\n    z = 2");
}

#[test]
fn test_empty_source_is_empty() {
    assert_eq!(canonicalize("").unwrap(), "");
    assert_eq!(canonicalize("\n\n# only a comment\n").unwrap(), "");
}

#[test]
fn test_canonical_form_is_a_fixed_point() {
    let mut canonicalizer = Canonicalizer::new().unwrap();
    for source in [COUNT_PAIRS_MIXED, MAX_VALUE_DEEP] {
        let once = canonicalizer.canonicalize(source).unwrap();
        let twice = canonicalizer.canonicalize(&once).unwrap();
        assert_eq!(once, twice);
    }
}
