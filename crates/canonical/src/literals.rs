//! One spelling per string literal.
//!
//! Quote style carries no meaning, so `"a"`, `'a'` and `'''a'''` all come
//! out as `'a'`. Double quotes are kept only when the value contains a
//! single quote and no double quote. Escapes other than escaped quotes are
//! left as written. f-strings are returned unchanged.

/// Canonical spelling of a string literal, or `None` to keep `raw` as is.
pub(crate) fn canonical_string(raw: &str) -> Option<String> {
    let prefix_len = raw
        .find(|c: char| c == '\'' || c == '"')
        .filter(|&i| raw[..i].chars().all(|c| c.is_ascii_alphabetic()))?;
    let prefix = raw[..prefix_len].to_ascii_lowercase();
    if prefix.contains('f') {
        return None;
    }
    let quoted = &raw[prefix_len..];

    let triple = quoted.starts_with("'''") || quoted.starts_with("\"\"\"");
    let delim_len = if triple { 3 } else { 1 };
    if quoted.len() < 2 * delim_len {
        return None;
    }
    let body = &quoted[delim_len..quoted.len() - delim_len];

    if prefix.contains('r') {
        // Raw strings cannot re-escape quotes; only swap delimiters when neither
        // quote character appears in the body
        if body.contains('\'') || body.contains('"') || (triple && body.contains('\n')) {
            return (triple && !body.contains('\'')).then(|| format!("{prefix}'''{body}'''"));
        }
        return Some(format!("{prefix}'{body}'"));
    }

    let value = unescape_quotes(body);
    if triple && value.contains('\n') {
        return if !value.contains('\'') {
            Some(format!("{prefix}'''{value}'''"))
        } else if !value.contains('"') {
            Some(format!("{prefix}\"\"\"{value}\"\"\""))
        } else {
            None
        };
    }

    if value.contains('\'') && !value.contains('"') {
        Some(format!("{prefix}\"{value}\""))
    } else {
        Some(format!("{prefix}'{}'", value.replace('\'', "\\'")))
    }
}

/// Resolve `\'` and `\"`; every other escape pair is copied through.
fn unescape_quotes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(q @ ('\'' | '"')) => out.push(q),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quotes_become_single() {
        assert_eq!(canonical_string("\"abc\"").as_deref(), Some("'abc'"));
        assert_eq!(canonical_string("'abc'").as_deref(), Some("'abc'"));
        assert_eq!(canonical_string("\"\"").as_deref(), Some("''"));
    }

    #[test]
    fn test_embedded_single_quote_prefers_double() {
        assert_eq!(canonical_string("'it\\'s'").as_deref(), Some("\"it's\""));
        assert_eq!(canonical_string("\"it's\"").as_deref(), Some("\"it's\""));
    }

    #[test]
    fn test_both_quotes_escape_the_single() {
        assert_eq!(
            canonical_string("\"a'b\\\"c\"").as_deref(),
            Some("'a\\'b\"c'")
        );
    }

    #[test]
    fn test_other_escapes_are_untouched() {
        assert_eq!(canonical_string("\"a\\nb\\\\\"").as_deref(), Some("'a\\nb\\\\'"));
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(canonical_string("B\"x\"").as_deref(), Some("b'x'"));
        assert_eq!(canonical_string("r\"\\d+\"").as_deref(), Some("r'\\d+'"));
        assert_eq!(canonical_string("r\"it's\"").as_deref(), None);
        assert_eq!(canonical_string("f\"{x}\""), None);
    }

    #[test]
    fn test_triple_quotes() {
        assert_eq!(canonical_string("\"\"\"doc\"\"\"").as_deref(), Some("'doc'"));
        assert_eq!(
            canonical_string("\"\"\"two\nlines\"\"\"").as_deref(),
            Some("'''two\nlines'''")
        );
    }
}
