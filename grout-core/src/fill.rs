use crate::is_ident_char;
use std::{borrow::Cow, collections::HashSet};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Occurrence {
    First,
    All,
}

/// Escaping/substitution primitives applied to segment text, chosen once
/// per template. The `_raw` variants never escape; they serve
/// condition-derived values, whose text the condition author controls.
///
/// A `#name` match is only a fill site when the following character is not
/// an identifier character, so `#a` never corrupts `#ab`.
pub trait Fill: Send + Sync {
    /// Replace the first remaining `#name` occurrence.
    fn fill_first(&self, text: &str, name: &str, value: &str) -> String {
        self.fill_first_raw(text, name, value)
    }

    /// Replace every `#name` occurrence.
    fn fill_all(&self, text: &str, name: &str, value: &str) -> String {
        self.fill_all_raw(text, name, value)
    }

    /// Replace every `'#name'` occurrence, quotes included. Used to inject
    /// a bare NULL where the template wrote a quoted placeholder.
    fn fill_quoted(&self, text: &str, name: &str, value: &str) -> String {
        self.fill_quoted_raw(text, name, value)
    }

    fn fill_first_raw(&self, text: &str, name: &str, value: &str) -> String {
        replace_placeholder(text, name, value, Occurrence::First)
    }

    fn fill_all_raw(&self, text: &str, name: &str, value: &str) -> String {
        replace_placeholder(text, name, value, Occurrence::All)
    }

    fn fill_quoted_raw(&self, text: &str, name: &str, value: &str) -> String {
        replace_quoted(text, name, value, Occurrence::All)
    }

    /// Remove every `#name` occurrence.
    fn fill_blank(&self, text: &str, name: &str) -> String {
        replace_placeholder(text, name, "", Occurrence::All)
    }
}

/// No character escaping; values are substituted verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFill;

impl Fill for DefaultFill {}

/// Doubles embedded single quotes so a value cannot break out of the
/// string literal the template wrote it into. Individual names can be
/// exempted; values already shaped like quoted lists are left alone.
#[derive(Clone, Debug, Default)]
pub struct KeyEscapedFill {
    exempt: HashSet<String>,
}

impl KeyEscapedFill {
    pub fn new(exempt: HashSet<String>) -> Self {
        KeyEscapedFill { exempt }
    }

    fn escape<'v>(&self, name: &str, value: &'v str) -> Cow<'v, str> {
        if self.exempt.contains(name) || !is_safe_to_escape(value) {
            Cow::Borrowed(value)
        } else {
            Cow::Owned(value.replace('\'', "''"))
        }
    }
}

impl Fill for KeyEscapedFill {
    fn fill_first(&self, text: &str, name: &str, value: &str) -> String {
        replace_placeholder(text, name, &self.escape(name, value), Occurrence::First)
    }

    fn fill_all(&self, text: &str, name: &str, value: &str) -> String {
        replace_placeholder(text, name, &self.escape(name, value), Occurrence::All)
    }

    fn fill_quoted(&self, text: &str, name: &str, value: &str) -> String {
        replace_quoted(text, name, &self.escape(name, value), Occurrence::All)
    }
}

/// Guard protecting caller-supplied `IN ('A','B','C')`-style literal lists
/// from quote doubling. Escaping is safe unless the quote count is even and
/// the value is shaped like a comma-separated list of quoted tokens: the
/// quote-pair count must match the comma count, plus one when the trimmed
/// value both starts and ends with a quote.
fn is_safe_to_escape(value: &str) -> bool {
    let quotes = value.matches('\'').count();
    if quotes % 2 != 0 {
        return true;
    }
    let trimmed = value.trim();
    let starts = trimmed.starts_with('\'');
    let ends = trimmed.ends_with('\'');
    let commas = value.matches(',').count();
    if starts && ends {
        quotes / 2 != commas + 1
    } else if !starts && !ends {
        quotes / 2 != commas
    } else {
        true
    }
}

fn replace_placeholder(text: &str, name: &str, value: &str, occurrence: Occurrence) -> String {
    let token = format!("#{name}");
    replace_token(text, &token, value, occurrence, true)
}

fn replace_quoted(text: &str, name: &str, value: &str, occurrence: Occurrence) -> String {
    let token = format!("'#{name}'");
    replace_token(text, &token, value, occurrence, false)
}

fn replace_token(
    text: &str,
    token: &str,
    value: &str,
    occurrence: Occurrence,
    boundary: bool,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(token) {
        let after = &rest[pos + token.len()..];
        if boundary && after.chars().next().is_some_and(is_ident_char) {
            // Prefix of a longer placeholder; not a fill site.
            let end = pos + token.len();
            out.push_str(&rest[..end]);
            rest = after;
            continue;
        }
        out.push_str(&rest[..pos]);
        out.push_str(value);
        rest = after;
        if occurrence == Occurrence::First {
            break;
        }
    }
    out.push_str(rest);
    out
}

/// Whether the text still contains a fillable `#name` occurrence.
pub(crate) fn contains_placeholder(text: &str, name: &str) -> bool {
    let token = format!("#{name}");
    let mut rest = text;
    while let Some(pos) = rest.find(&token) {
        let after = &rest[pos + token.len()..];
        if !after.chars().next().is_some_and(is_ident_char) {
            return true;
        }
        rest = after;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_aware_replacement() {
        let fill = DefaultFill;
        assert_eq!(fill.fill_all("#a + #ab + #a", "a", "1"), "1 + #ab + 1");
        assert_eq!(fill.fill_first("#a + #a", "a", "1"), "1 + #a");
        assert_eq!(fill.fill_blank("x = #a!", "a"), "x = !");
        assert_eq!(fill.fill_quoted("v = '#a'", "a", "NULL"), "v = NULL");
        assert!(contains_placeholder("#ab #a", "a"));
        assert!(!contains_placeholder("#ab", "a"));
    }

    #[test]
    fn quote_doubling() {
        let fill = KeyEscapedFill::default();
        assert_eq!(fill.fill_all("n = '#v'", "v", "O'Brien"), "n = 'O''Brien'");
        assert_eq!(fill.fill_all_raw("n = '#v'", "v", "O'Brien"), "n = 'O'Brien'");
    }

    #[test]
    fn exempt_names_are_not_escaped() {
        let fill = KeyEscapedFill::new(HashSet::from(["v".to_owned()]));
        assert_eq!(fill.fill_all("n = '#v'", "v", "O'Brien"), "n = 'O'Brien'");
        assert_eq!(fill.fill_all("n = '#w'", "w", "O'Brien"), "n = 'O''Brien'");
    }

    #[test]
    fn quoted_list_shapes_are_preserved() {
        assert!(!is_safe_to_escape("'A','B','C'"));
        assert!(!is_safe_to_escape(" 'A' ,'B' "));
        assert!(is_safe_to_escape("O'Brien"));
        assert!(is_safe_to_escape("'A','B"));
        let fill = KeyEscapedFill::default();
        assert_eq!(
            fill.fill_all("id IN (#list)", "list", "'A','B','C'"),
            "id IN ('A','B','C')"
        );
    }
}
