use crate::{
    Fill, GlobalRegistry, SegmentKind, Template, ValueSource,
    fill::contains_placeholder,
    null_policy::{self, NullFill},
    resolve::{Resolution, resolve},
};

/// Drive extraction results, the resolver, the fill strategy and the null
/// policy across every segment, deciding inclusion as it goes. All mutable
/// state lives in this call; a template can be evaluated concurrently.
pub(crate) fn assemble(
    template: &Template,
    source: &ValueSource<'_>,
    globals: &GlobalRegistry,
) -> String {
    let mut out = String::with_capacity(template.text().len());
    let single_segment = template.segments().len() == 1;
    for segment in template.segments() {
        if segment.placeholders.is_empty() {
            out.push_str(&segment.text);
            continue;
        }
        let fill = template.fill();
        let mut text = segment.text.clone();
        let mut filled = 0usize;
        for placeholder in segment.distinct() {
            if placeholder.excluded {
                filled += 1;
                continue;
            }
            let name = placeholder.name.as_str();
            match resolve(name, source, template.conditions(), globals) {
                Resolution::Scalar { value, condition } => {
                    let rendered = value.to_text();
                    text = if condition {
                        fill.fill_all_raw(&text, name, &rendered)
                    } else {
                        fill.fill_all(&text, name, &rendered)
                    };
                    filled += 1;
                }
                Resolution::Provider {
                    mut values,
                    declared,
                    condition,
                } => {
                    // Occurrences fill one at a time, left to right, so a
                    // repeatable provider can supply distinct values.
                    let mut replaced = false;
                    while contains_placeholder(&text, name) {
                        match values.next() {
                            Some(value) if !value.is_null() => {
                                let rendered = value.to_text();
                                text = if condition {
                                    fill.fill_first_raw(&text, name, &rendered)
                                } else {
                                    fill.fill_first(&text, name, &rendered)
                                };
                                replaced = true;
                            }
                            _ => {
                                // First exhausted call: the null policy
                                // covers all remaining occurrences, and the
                                // name does not count as resolved.
                                if !matches!(source, ValueSource::None) {
                                    let kind =
                                        null_policy::decide(condition, template.default_null(), &declared);
                                    text = null_policy::apply(fill, &text, name, kind);
                                }
                                replaced = false;
                                break;
                            }
                        }
                    }
                    if replaced {
                        filled += 1;
                    }
                }
                Resolution::Null { declared, condition } => {
                    let kind = null_policy::decide(condition, template.default_null(), &declared);
                    text = null_policy::apply(fill, &text, name, kind);
                }
                Resolution::Absent => match source {
                    ValueSource::Object(..) => {
                        text = null_policy::apply(fill, &text, name, NullFill::Keyword);
                    }
                    ValueSource::Values(..) if single_segment => {
                        // Single-fragment templates stay usable without
                        // forcing every key to be present: the placeholder
                        // is simply removed.
                        text = if template.default_null() {
                            null_policy::apply(fill, &text, name, NullFill::Keyword)
                        } else {
                            fill.fill_blank(&text, name)
                        };
                        filled += 1;
                    }
                    ValueSource::Values(..) => {
                        text = if template.default_null() {
                            null_policy::apply(fill, &text, name, NullFill::Keyword)
                        } else {
                            fill.fill_all(&text, name, "")
                        };
                    }
                    // No per-call values: leave the placeholder untouched.
                    ValueSource::None => {}
                },
            }
        }
        match segment.kind {
            SegmentKind::Literal => out.push_str(&text),
            SegmentKind::Optional => {
                if filled == segment.required() {
                    out.push_str(&text);
                }
            }
        }
    }
    out
}
