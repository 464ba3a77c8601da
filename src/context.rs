use std::collections::HashMap;

/// Truth values of named predicates.
///
/// Names are case-sensitive. A predicate that was never assigned reads as
/// `false`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    predicates: HashMap<String, bool>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a predicate, defaulting to `false`.
    pub fn get(&self, name: &str) -> bool {
        self.predicates.get(name).copied().unwrap_or(false)
    }

    /// Whether the predicate has been assigned explicitly.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Assign a predicate, returning the previous explicit value.
    pub fn set(&mut self, name: impl Into<String>, value: bool) -> Option<bool> {
        self.predicates.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Build a context pairing the i-th name with the i-th value.
    pub fn from_assignment<S: AsRef<str>>(names: &[S], values: &[bool]) -> Self {
        assert_eq!(names.len(), values.len(), "Assignment length mismatch");
        let predicates = names
            .iter()
            .zip(values)
            .map(|(name, &value)| (name.as_ref().to_string(), value))
            .collect();
        Self { predicates }
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for EvaluationContext {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_unknown_defaults_to_false() {
        let ctx = EvaluationContext::new();
        assert!(!ctx.get("p"));
        assert!(!ctx.contains("p"));
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_set_and_overwrite() {
        let mut ctx = EvaluationContext::new();
        assert_eq!(ctx.set("p", true), None);
        assert!(ctx.get("p"));
        assert_eq!(ctx.set("p", false), Some(true));
        assert!(!ctx.get("p"));
        assert!(ctx.contains("p"));
    }

    #[test]
    fn test_case_sensitive() {
        let mut ctx = EvaluationContext::new();
        ctx.set("P", true);
        assert!(ctx.get("P"));
        assert!(!ctx.get("p"));
    }

    #[test]
    fn test_from_assignment() {
        let ctx = EvaluationContext::from_assignment(&["a", "b"], &[true, false]);
        assert!(ctx.get("a"));
        assert!(!ctx.get("b"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_from_iter() {
        let ctx: EvaluationContext = [("x", true), ("y", false)].into_iter().collect();
        assert!(ctx.get("x"));
        assert!(ctx.contains("y"));
    }
}
