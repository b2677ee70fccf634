use crate::ValueSource;
use std::fmt;

/// Value expression a condition branch yields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConditionValue {
    /// Literal substitution text, taken as-is (never escaped: the
    /// condition author controls it).
    Literal(String),
    /// Resolve another placeholder name through the value source and the
    /// global registry.
    Placeholder(String),
    /// Explicit NULL marker, written as the bare `NULL` keyword.
    Null,
}

type Predicate = Box<dyn for<'a> Fn(&ValueSource<'a>) -> bool + Send + Sync>;

/// Ordered predicate table overriding default resolution for one
/// placeholder name. The first branch whose predicate holds wins; a
/// fallback branch applies when none does. A governing condition that
/// yields nothing resolves as an explicit null.
#[derive(Default)]
pub struct ConditionSet {
    branches: Vec<(Predicate, ConditionValue)>,
    fallback: Option<ConditionValue>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(
        mut self,
        predicate: impl for<'a> Fn(&ValueSource<'a>) -> bool + Send + Sync + 'static,
        value: ConditionValue,
    ) -> Self {
        self.branches.push((Box::new(predicate), value));
        self
    }

    pub fn otherwise(mut self, value: ConditionValue) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn evaluate(&self, source: &ValueSource<'_>) -> Option<&ConditionValue> {
        self.branches
            .iter()
            .find(|(predicate, _)| predicate(source))
            .map(|(_, value)| value)
            .or(self.fallback.as_ref())
    }
}

impl fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionSet")
            .field("branches", &self.branches.len())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, Values};

    #[test]
    fn first_true_branch_wins() {
        let set = ConditionSet::new()
            .when(
                |s| s.peek("kind") == Some(Value::Varchar(Some("a".into()))),
                ConditionValue::Literal("first".into()),
            )
            .when(|_| true, ConditionValue::Literal("second".into()))
            .otherwise(ConditionValue::Null);

        let values = Values::new().with("kind", "a");
        assert_eq!(
            set.evaluate(&ValueSource::Values(&values)),
            Some(&ConditionValue::Literal("first".into()))
        );
        let values = Values::new().with("kind", "b");
        assert_eq!(
            set.evaluate(&ValueSource::Values(&values)),
            Some(&ConditionValue::Literal("second".into()))
        );
    }

    #[test]
    fn fallback_applies() {
        let set = ConditionSet::new()
            .when(|_| false, ConditionValue::Literal("never".into()))
            .otherwise(ConditionValue::Placeholder("other".into()));
        assert_eq!(
            set.evaluate(&ValueSource::None),
            Some(&ConditionValue::Placeholder("other".into()))
        );
        let empty = ConditionSet::new().when(|_| false, ConditionValue::Null);
        assert_eq!(empty.evaluate(&ValueSource::None), None);
    }
}
