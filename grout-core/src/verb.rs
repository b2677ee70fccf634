use crate::{contains_keyword_seq, leading_keyword_seq};

/// Statement verb a template classifies as.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Verb {
    Match,
    Create,
    Set,
    Delete,
    Ddl,
    #[default]
    Unknown,
}

enum Shape {
    /// Keyword sequence at the start of the statement.
    Leading(&'static [&'static str]),
    /// Keyword sequence at any word boundary.
    Anywhere(&'static [&'static str]),
}

/// Ordered classification table; first match wins. The DDL forms come first
/// because their texts would also match the generic CREATE pattern.
const CLASSIFIERS: &[(Shape, Verb)] = &[
    (Shape::Leading(&["CREATE", "INDEX"]), Verb::Ddl),
    (Shape::Leading(&["DROP", "INDEX"]), Verb::Ddl),
    (Shape::Leading(&["CREATE", "CONSTRAINT"]), Verb::Ddl),
    (Shape::Leading(&["DROP", "CONSTRAINT"]), Verb::Ddl),
    (Shape::Anywhere(&["DELETE"]), Verb::Delete),
    (Shape::Anywhere(&["REMOVE"]), Verb::Delete),
    (Shape::Anywhere(&["SET"]), Verb::Set),
    (Shape::Anywhere(&["CREATE"]), Verb::Create),
    (Shape::Leading(&["MATCH"]), Verb::Match),
];

impl Verb {
    pub fn classify(text: &str) -> Verb {
        CLASSIFIERS
            .iter()
            .find(|(shape, _)| match shape {
                Shape::Leading(words) => leading_keyword_seq(text, words),
                Shape::Anywhere(words) => contains_keyword_seq(text, words),
            })
            .map(|&(_, verb)| verb)
            .unwrap_or(Verb::Unknown)
    }
}
