/// Characters that may continue a placeholder identifier. The leading
/// character must additionally be a letter.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

pub fn consume_while<'s>(input: &mut &'s str, mut predicate: impl FnMut(char) -> bool) -> &'s str {
    let len = input
        .char_indices()
        .find(|&(_, c)| !predicate(c))
        .map_or(input.len(), |(i, _)| i);
    let (result, rest) = input.split_at(len);
    *input = rest;
    result
}

/// Byte position of the first case-insensitive occurrence of `needle`.
/// The needle is expected to be ASCII; the haystack may not be.
pub fn find_ignore_case(text: &str, needle: &str) -> Option<usize> {
    if needle.len() > text.len() {
        return None;
    }
    (0..=text.len() - needle.len())
        .find(|&i| text.get(i..i + needle.len()).is_some_and(|s| s.eq_ignore_ascii_case(needle)))
}

pub fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len() && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Match a keyword sequence at byte offset `pos`: keywords separated by one
/// or more spaces, the last one followed by at least one space. Returns the
/// offset right after the trailing spaces.
pub fn match_keyword_seq(text: &str, pos: usize, words: &[&str]) -> Option<usize> {
    let mut at = pos;
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            let spaces = space_run(text, at);
            if spaces == 0 {
                return None;
            }
            at += spaces;
        }
        let end = at + word.len();
        if !text.get(at..end)?.eq_ignore_ascii_case(word) {
            return None;
        }
        at = end;
    }
    let spaces = space_run(text, at);
    if spaces == 0 {
        return None;
    }
    Some(at + spaces)
}

/// Keyword sequence at the start of the text, leading spaces allowed.
pub fn leading_keyword_seq(text: &str, words: &[&str]) -> bool {
    match_keyword_seq(text, space_run(text, 0), words).is_some()
}

/// Keyword sequence anywhere in the text, starting at a word boundary
/// (start of text or preceded by a space).
pub fn contains_keyword_seq(text: &str, words: &[&str]) -> bool {
    (0..text.len())
        .filter(|&i| i == 0 || text.as_bytes()[i - 1] == b' ')
        .any(|i| match_keyword_seq(text, i, words).is_some())
}

pub(crate) fn space_run(text: &str, pos: usize) -> usize {
    text.as_bytes()[pos.min(text.len())..]
        .iter()
        .take_while(|&&b| b == b' ')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_sequences() {
        assert!(leading_keyword_seq("CREATE INDEX idx", &["CREATE", "INDEX"]));
        assert!(leading_keyword_seq("  create  index idx", &["CREATE", "INDEX"]));
        assert!(!leading_keyword_seq("CREATE (n)", &["CREATE", "INDEX"]));
        assert!(!leading_keyword_seq("CREATE INDEX", &["CREATE", "INDEX"]));
        assert!(contains_keyword_seq("MATCH (n) DELETE n", &["DELETE"]));
        assert!(!contains_keyword_seq("MATCH (n) UNDELETE n", &["DELETE"]));
    }

    #[test]
    fn consume() {
        let mut input = "abc12.def#";
        assert_eq!(consume_while(&mut input, is_ident_char), "abc12.def");
        assert_eq!(input, "#");
    }
}
