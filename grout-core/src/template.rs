use crate::{
    ConditionSet, DefaultFill, Error, Fetch, Fill, GlobalRegistry, KeyEscapedFill, Result, Segment,
    SegmentKind, ValueSource, Values, Verb, assemble::assemble, repair::repair, space_run,
};
use log::debug;
use std::collections::{HashMap, HashSet};

const OPEN: &str = "<[";
const CLOSE: &str = "]>";

/// Parse-time and evaluation configuration for a [`Template`].
pub struct TemplateConfig {
    /// Names that look like placeholders but are not (they collide with
    /// time-format syntax) and never take part in substitution.
    pub exclusions: HashSet<String>,
    /// Double embedded single quotes in substituted values.
    pub escape_quotes: bool,
    /// Names never escaped even when `escape_quotes` is on.
    pub escape_exempt: HashSet<String>,
    /// Write unresolved placeholders as NULL regardless of declared type.
    pub default_null: bool,
    /// Per-name condition rules overriding default resolution.
    pub conditions: HashMap<String, ConditionSet>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            exclusions: ["MI", "SS", "mi", "ss"].map(str::to_owned).into(),
            escape_quotes: true,
            escape_exempt: HashSet::new(),
            default_null: false,
            conditions: HashMap::new(),
        }
    }
}

/// Immutable parse result of a placeholder-bearing statement.
///
/// Parsing is pure and deterministic: identical raw text always yields an
/// identical template. A template is parsed once and evaluated many times;
/// all per-evaluation state is call-local, so one instance can be shared
/// across threads freely.
pub struct Template {
    text: String,
    verb: Verb,
    where_dynamic: bool,
    segments: Vec<Segment>,
    fill: Box<dyn Fill>,
    default_null: bool,
    conditions: HashMap<String, ConditionSet>,
}

impl Template {
    pub fn parse(text: impl AsRef<str>) -> Self {
        Self::parse_with(text, TemplateConfig::default())
    }

    pub fn parse_with(text: impl AsRef<str>, config: TemplateConfig) -> Self {
        let text = normalize(text.as_ref());
        let verb = Verb::classify(&text);
        let where_dynamic = detect_where_dynamic(&text);
        let segments = split_segments(&text, &config.exclusions);
        let fill: Box<dyn Fill> = if config.escape_quotes {
            Box::new(KeyEscapedFill::new(config.escape_exempt))
        } else {
            Box::new(DefaultFill)
        };
        Template {
            text,
            verb,
            where_dynamic,
            segments,
            fill,
            default_null: config.default_null,
            conditions: config.conditions,
        }
    }

    /// Evaluate against a value source, producing the final statement. The
    /// only caller-visible failure is evaluating an empty template; every
    /// per-placeholder problem is recovered into a best-effort string.
    pub fn render(&self, source: ValueSource<'_>, globals: &GlobalRegistry) -> Result<String> {
        if self.text.is_empty() {
            return Err(Error::msg("Cannot render an empty template"));
        }
        let out = assemble(self, &source, globals);
        let out = if self.where_dynamic { repair(&out) } else { out };
        debug!("rendered {:?} statement from {source:?}: {out}", self.verb);
        Ok(out)
    }

    pub fn render_object(&self, object: &dyn Fetch, globals: &GlobalRegistry) -> Result<String> {
        self.render(ValueSource::Object(object), globals)
    }

    pub fn render_values(&self, values: &Values, globals: &GlobalRegistry) -> Result<String> {
        self.render(ValueSource::Values(values), globals)
    }

    pub fn render_globals(&self, globals: &GlobalRegistry) -> Result<String> {
        self.render(ValueSource::None, globals)
    }

    /// Normalized raw text of the template.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Whether the statement has a WHERE clause immediately followed by an
    /// optional fragment or bare placeholder; clause repair runs on the
    /// rendered output when set.
    pub fn where_dynamic(&self) -> bool {
        self.where_dynamic
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn fill(&self) -> &dyn Fill {
        self.fill.as_ref()
    }

    pub(crate) fn default_null(&self) -> bool {
        self.default_null
    }

    pub(crate) fn conditions(&self) -> &HashMap<String, ConditionSet> {
        &self.conditions
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("text", &self.text)
            .field("verb", &self.verb)
            .field("where_dynamic", &self.where_dynamic)
            .field("segments", &self.segments)
            .finish()
    }
}

/// Control whitespace becomes a plain space; the ends are trimmed.
fn normalize(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ").trim().to_owned()
}

/// A WHERE clause trailed directly by `<[` or a bare placeholder, with no
/// literal condition in between.
fn detect_where_dynamic(text: &str) -> bool {
    let bytes = text.as_bytes();
    (0..text.len())
        .filter(|&i| i == 0 || bytes[i - 1] == b' ')
        .any(|i| {
            let Some(word) = text.get(i..i + "WHERE".len()) else {
                return false;
            };
            if !word.eq_ignore_ascii_case("WHERE") {
                return false;
            }
            let mut pos = i + "WHERE".len();
            let spaces = space_run(text, pos);
            if spaces == 0 {
                return false;
            }
            pos += spaces;
            text[pos..].starts_with(OPEN) || text[pos..].starts_with('#')
        })
}

/// Split at each non-nesting `<[ ... ]>` pair into alternating literal and
/// optional segments, in source order. One whitespace character on either
/// side of a pair is absorbed. Empty literal spans are dropped; an
/// unterminated delimiter degrades to literal text.
fn split_segments(text: &str, exclusions: &HashSet<String>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = |span: &str| {
        if !span.is_empty() {
            Some(Segment::new(SegmentKind::Literal, span.to_owned(), exclusions))
        } else {
            None
        }
    };
    let mut cursor = 0;
    let mut open = cursor;
    loop {
        let Some(found) = text[open..].find(OPEN).map(|i| open + i) else {
            segments.extend(literal(&text[cursor..]));
            break;
        };
        let content_start = found + OPEN.len();
        let Some(close) = text[content_start..].find(CLOSE).map(|i| content_start + i) else {
            // Unterminated fragment: the rest is literal text.
            segments.extend(literal(&text[cursor..]));
            break;
        };
        if let Some(inner) = text[content_start..close].find(OPEN) {
            // `<[` inside an open fragment: the outer opener was not a
            // fragment after all, retry from the inner one.
            open = content_start + inner;
            continue;
        }
        let mut literal_end = found;
        if text[cursor..found].ends_with(' ') {
            literal_end -= 1;
        }
        segments.extend(literal(&text[cursor..literal_end]));
        segments.push(Segment::new(
            SegmentKind::Optional,
            text[content_start..close].to_owned(),
            exclusions,
        ));
        cursor = close + CLOSE.len();
        if text[cursor..].starts_with(' ') {
            cursor += 1;
        }
        open = cursor;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(template: &Template) -> Vec<(SegmentKind, &str)> {
        template
            .segments()
            .iter()
            .map(|s| (s.kind, s.text.as_str()))
            .collect()
    }

    #[test]
    fn splits_into_alternating_segments() {
        let template =
            Template::parse("MATCH (n) WHERE <[ AND n.a = '#a' ]> <[ AND n.b = '#b' ]> RETURN n");
        assert_eq!(
            kinds(&template),
            [
                (SegmentKind::Literal, "MATCH (n) WHERE"),
                (SegmentKind::Optional, " AND n.a = '#a' "),
                (SegmentKind::Optional, " AND n.b = '#b' "),
                (SegmentKind::Literal, "RETURN n"),
            ]
        );
        assert!(template.where_dynamic());
        assert_eq!(template.verb(), Verb::Match);
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "MATCH (n {name: '#name'}) <[ WHERE n.age = #age ]> RETURN n";
        let first = Template::parse(text);
        let second = Template::parse(text);
        assert_eq!(kinds(&first), kinds(&second));
        assert_eq!(first.verb(), second.verb());
        assert_eq!(first.where_dynamic(), second.where_dynamic());
    }

    #[test]
    fn control_whitespace_normalizes() {
        let template = Template::parse("MATCH (n)\r\n\tWHERE n.id = '#id'\n");
        assert_eq!(template.text(), "MATCH (n)   WHERE n.id = '#id'");
    }

    #[test]
    fn unterminated_delimiter_degrades_to_literal() {
        let template = Template::parse("MATCH (n) WHERE <[ AND n.a = '#a' RETURN n");
        assert_eq!(
            kinds(&template),
            [(SegmentKind::Literal, "MATCH (n) WHERE <[ AND n.a = '#a' RETURN n")]
        );
    }

    #[test]
    fn nested_opener_retries_from_inner() {
        let template = Template::parse("a <[ b <[ c ]> d");
        assert_eq!(
            kinds(&template),
            [
                (SegmentKind::Literal, "a <[ b"),
                (SegmentKind::Optional, " c "),
                (SegmentKind::Literal, "d"),
            ]
        );
    }

    #[test]
    fn where_dynamic_shapes() {
        assert!(Template::parse("MATCH (n) WHERE <[ n.a = '#a' ]>").where_dynamic());
        assert!(Template::parse("MATCH (n) WHERE #cond RETURN n").where_dynamic());
        assert!(!Template::parse("MATCH (n) WHERE n.a = '#a'").where_dynamic());
    }
}
