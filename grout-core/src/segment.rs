use crate::consume_while;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SegmentKind {
    /// Always emitted, after substitution.
    Literal,
    /// A `<[ ... ]>` fragment, emitted only when fully resolved.
    Optional,
}

/// One `#name` occurrence found in a segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlaceholderRef {
    pub name: String,
    /// Occurrence index of this name within the segment.
    pub index: usize,
    /// Name sits in the exclusion set: never substituted, counts as
    /// trivially resolved.
    pub excluded: bool,
}

/// Literal or optional contiguous span of a template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    pub placeholders: Vec<PlaceholderRef>,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: String, exclusions: &HashSet<String>) -> Self {
        let placeholders = extract(&text, exclusions);
        Segment {
            kind,
            text,
            placeholders,
        }
    }

    /// First occurrence of each distinct name, in source order. This is the
    /// resolution worklist: resolving a name normally fills all of its
    /// occurrences at once.
    pub fn distinct(&self) -> impl Iterator<Item = &PlaceholderRef> {
        self.placeholders.iter().filter(|p| p.index == 0)
    }

    /// Number of distinct names, excluded ones included (they auto-resolve).
    /// A segment is kept when the fill count reaches this.
    pub fn required(&self) -> usize {
        self.distinct().count()
    }
}

/// Scan segment text left to right for `#` + identifier tokens. Every
/// occurrence is recorded, duplicates included, in order. Identifiers start
/// with a letter and continue with letters, digits, `_` and `.` path
/// separators; trailing dots are punctuation, not part of the name.
fn extract(text: &str, exclusions: &HashSet<String>) -> Vec<PlaceholderRef> {
    let mut placeholders: Vec<PlaceholderRef> = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('#') {
        rest = &rest[pos + 1..];
        if !rest.chars().next().is_some_and(char::is_alphabetic) {
            continue;
        }
        let name = consume_while(&mut rest, crate::is_ident_char).trim_end_matches('.');
        if name.is_empty() {
            continue;
        }
        let index = placeholders.iter().filter(|p| p.name == name).count();
        placeholders.push(PlaceholderRef {
            name: name.to_owned(),
            index,
            excluded: exclusions.contains(name),
        });
    }
    placeholders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<(String, usize, bool)> {
        let exclusions = HashSet::from(["MI".to_owned(), "ss".to_owned()]);
        extract(text, &exclusions)
            .into_iter()
            .map(|p| (p.name, p.index, p.excluded))
            .collect()
    }

    #[test]
    fn occurrences_in_order() {
        assert_eq!(
            names("n.a = '#a' AND n.b = '#b' AND n.c = '#a'"),
            [
                ("a".to_owned(), 0, false),
                ("b".to_owned(), 0, false),
                ("a".to_owned(), 1, false),
            ]
        );
    }

    #[test]
    fn paths_and_punctuation() {
        assert_eq!(names("v = '#user.address.city'."), [("user.address.city".to_owned(), 0, false)]);
        assert_eq!(names("x = #count."), [("count".to_owned(), 0, false)]);
        assert_eq!(names("# 1 #2 #"), []);
    }

    #[test]
    fn exclusions_are_case_sensitive() {
        assert_eq!(
            names("t = '#MI:#mi'"),
            [("MI".to_owned(), 0, true), ("mi".to_owned(), 0, false)]
        );
    }

    #[test]
    fn required_counts_distinct_names() {
        let segment = Segment::new(
            SegmentKind::Optional,
            " AND n.a = '#a' AND n.b = '#a' ".to_owned(),
            &HashSet::new(),
        );
        assert_eq!(segment.placeholders.len(), 2);
        assert_eq!(segment.required(), 1);
    }
}
