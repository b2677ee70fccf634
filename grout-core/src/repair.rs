use crate::{ends_with_ignore_case, space_run};

/// Post-assembly normalization for templates flagged with the dangling
/// WHERE + fragment shape. Dropped fragments can leave a bare `WHERE`, or
/// `WHERE` jammed against the next keyword (the dropped fragment absorbed
/// the whitespace between them), so the junction tolerates zero spaces.
///
/// AND/OR collapse first: removing them can newly expose a verb keyword
/// adjacent to WHERE.
pub(crate) fn repair(text: &str) -> String {
    let mut cql = text.trim().to_owned();
    if ends_with_ignore_case(&cql, " WHERE") {
        cql.truncate(cql.len() - " WHERE".len());
    }
    for (follower, replacement) in [
        ("AND", "WHERE"),
        ("OR", "WHERE"),
        ("CREATE", "CREATE"),
        ("DELETE", "DELETE"),
        ("REMOVE", "REMOVE"),
        ("SET", "SET"),
        ("RETURN", "RETURN"),
    ] {
        cql = rewrite_where(&cql, follower, replacement);
    }
    cql
}

/// Replace every `WHERE <follower>` junction (any spacing, any case, the
/// follower trailed by at least one space) with a single canonical
/// ` <replacement> `, consuming the surrounding space runs.
fn rewrite_where(text: &str, follower: &str, replacement: &str) -> String {
    const WHERE: &str = "WHERE";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(junction) = find_junction(rest, follower) else {
            out.push_str(rest);
            return out;
        };
        let (start, end) = junction;
        out.push_str(rest[..start].trim_end_matches(' '));
        out.push(' ');
        out.push_str(replacement);
        out.push(' ');
        rest = &rest[end..];
    }

    fn find_junction(text: &str, follower: &str) -> Option<(usize, usize)> {
        let bytes = text.as_bytes();
        for at in 0..text.len() {
            if at > 0 && bytes[at - 1] != b' ' {
                continue;
            }
            let Some(word) = text.get(at..at + WHERE.len()) else {
                continue;
            };
            if !word.eq_ignore_ascii_case(WHERE) {
                continue;
            }
            let mut pos = at + WHERE.len();
            pos += space_run(text, pos);
            let Some(word) = text.get(pos..pos + follower.len()) else {
                continue;
            };
            if !word.eq_ignore_ascii_case(follower) {
                continue;
            }
            pos += follower.len();
            let spaces = space_run(text, pos);
            if spaces == 0 {
                continue;
            }
            return Some((at, pos + spaces));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_bare_where() {
        assert_eq!(repair("MATCH (n) WHERE"), "MATCH (n)");
        assert_eq!(repair("  MATCH (n) where  "), "MATCH (n)");
    }

    #[test]
    fn boolean_keywords_collapse() {
        assert_eq!(
            repair("MATCH (n) WHERE AND n.a = 'X' RETURN n"),
            "MATCH (n) WHERE n.a = 'X' RETURN n"
        );
        assert_eq!(
            repair("MATCH (n) WHERE OR n.a = 'X'"),
            "MATCH (n) WHERE n.a = 'X'"
        );
    }

    #[test]
    fn verb_keywords_absorb_where() {
        assert_eq!(repair("MATCH (n) WHERE RETURN n"), "MATCH (n) RETURN n");
        assert_eq!(repair("MATCH (n) WHERERETURN n"), "MATCH (n) RETURN n");
        assert_eq!(repair("MATCH (n) WHERE SET n.a = 1"), "MATCH (n) SET n.a = 1");
        assert_eq!(repair("MATCH (n) WHERE DELETE n"), "MATCH (n) DELETE n");
    }

    #[test]
    fn collapsing_and_exposes_verbs() {
        // WHERE AND -> WHERE runs before WHERE RETURN -> RETURN.
        assert_eq!(repair("MATCH (n) WHERE AND RETURN n"), "MATCH (n) RETURN n");
    }

    #[test]
    fn untouched_when_valid() {
        assert_eq!(
            repair("MATCH (n) WHERE n.a = 'X' RETURN n"),
            "MATCH (n) WHERE n.a = 'X' RETURN n"
        );
    }
}
