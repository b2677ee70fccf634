use crate::{Fill, Value};

const NULL: &str = "NULL";

/// Substitution applied when a placeholder resolved to nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NullFill {
    /// The `NULL` keyword, written through the quoted pass first so a
    /// `'#name'` site receives a bare NULL, then the plain pass for any
    /// unquoted sites of the same name.
    Keyword,
    /// Empty text; only for accessors with a declared textual type.
    Empty,
}

/// Decide the null substitution. A governing condition or the template's
/// default-null flag force the NULL keyword; otherwise a declared textual
/// type empties the placeholder and anything else (including an
/// undeterminable type) becomes NULL.
pub(crate) fn decide(condition: bool, default_null: bool, declared: &Value) -> NullFill {
    if condition || default_null {
        NullFill::Keyword
    } else if declared.is_textual() {
        NullFill::Empty
    } else {
        NullFill::Keyword
    }
}

pub(crate) fn apply(fill: &dyn Fill, text: &str, name: &str, kind: NullFill) -> String {
    match kind {
        NullFill::Keyword => {
            let text = fill.fill_quoted(text, name, NULL);
            fill.fill_all(&text, name, NULL)
        }
        NullFill::Empty => fill.fill_all(text, name, ""),
    }
}
