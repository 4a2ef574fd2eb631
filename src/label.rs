//! Symbolic and numeric branch/jump targets.

/// A branch or jump target: a symbolic name resolved against the label
/// table, a fixed numeric displacement, or the implicit zero displacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Resolved by name against the declared label table at replay time.
    Named(String),
    /// A displacement fixed at construction time, never looked up.
    At(i32),
    /// Shorthand for `At(0)`, used by `jr`/`jalr`/`ret` and similar.
    Empty,
}

impl Label {
    /// The displacement this label denotes, given a lookup function for the
    /// `Named` case. Panics (via the lookup closure) if the name is
    /// undeclared.
    pub(crate) fn resolve(&self, lookup: impl FnOnce(&str) -> i32) -> i32 {
        match self {
            Label::Named(name) => lookup(name),
            Label::At(offset) => *offset,
            Label::Empty => 0,
        }
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Named(name.to_owned())
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label::Named(name)
    }
}

impl From<i32> for Label {
    fn from(offset: i32) -> Self {
        Label::At(offset)
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resolves_to_zero() {
        assert_eq!(Label::Empty.resolve(|_| panic!("should not be called")), 0);
    }

    #[test]
    fn at_ignores_the_lookup() {
        assert_eq!(Label::At(42).resolve(|_| panic!("should not be called")), 42);
    }

    #[test]
    fn named_defers_to_the_lookup() {
        let label: Label = "top".into();
        assert_eq!(label.resolve(|name| if name == "top" { 16 } else { -1 }), 16);
    }

    #[test]
    fn string_and_str_both_convert() {
        assert_eq!(Label::from("top"), Label::from(String::from("top")));
    }
}
