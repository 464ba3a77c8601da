use std::fmt::{Display, Formatter};

/// Handle to a node stored in a [`Formula`][crate::expr::Formula] arena.
///
/// Handles are plain indices: they are only meaningful for the formula that
/// issued them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExprId(u32);

impl ExprId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the internal representation of the handle.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the arena index of the handle.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ExprId {
    fn from(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "Arena index overflow");
        Self(index as u32)
    }
}

impl Display for ExprId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_index_roundtrip() {
        let id = ExprId::from(7usize);
        assert_eq!(id.index(), 7);
        assert_eq!(id.get(), 7);
        assert_eq!(id, ExprId::new(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(ExprId::new(3).to_string(), "@3");
    }
}
