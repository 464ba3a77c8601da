use std::fmt::{Display, Formatter};

use crate::reference::ExprId;

/// Binary connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Connective {
    And,
    Or,
    /// Implication, `lhs → rhs`.
    Impl,
    /// Biconditional, `lhs ↔ rhs`.
    BiImpl,
}

impl Connective {
    /// The glyph used when rendering the connective.
    pub const fn glyph(self) -> &'static str {
        match self {
            Connective::And => "∧",
            Connective::Or => "∨",
            Connective::Impl => "→",
            Connective::BiImpl => "↔",
        }
    }

    /// Apply the connective to two truth values.
    ///
    /// Both values must already be known, so there is no short-circuiting here.
    pub const fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Connective::And => lhs && rhs,
            Connective::Or => lhs || rhs,
            Connective::Impl => !lhs || rhs,
            Connective::BiImpl => lhs == rhs,
        }
    }

    /// The De Morgan dual (`And` <-> `Or`), if any.
    pub const fn dual(self) -> Option<Connective> {
        match self {
            Connective::And => Some(Connective::Or),
            Connective::Or => Some(Connective::And),
            Connective::Impl | Connective::BiImpl => None,
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Variant tag of a [`Node`], without its payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Constant,
    Predicate,
    Not,
    Binary(Connective),
}

/// A formula node. Children are referenced by arena handles.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Constant(bool),
    Predicate(String),
    Not(ExprId),
    Binary(Connective, ExprId, ExprId),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Constant(_) => NodeKind::Constant,
            Node::Predicate(_) => NodeKind::Predicate,
            Node::Not(_) => NodeKind::Not,
            Node::Binary(op, ..) => NodeKind::Binary(*op),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Constant(_) | Node::Predicate(_))
    }

    /// Number of children: 0 for leaves, 1 for negation, 2 for connectives.
    pub fn arity(&self) -> usize {
        match self {
            Node::Constant(_) | Node::Predicate(_) => 0,
            Node::Not(_) => 1,
            Node::Binary(..) => 2,
        }
    }

    /// Children in left-to-right order.
    pub fn children(&self) -> Vec<ExprId> {
        match *self {
            Node::Constant(_) | Node::Predicate(_) => vec![],
            Node::Not(a) => vec![a],
            Node::Binary(_, a, b) => vec![a, b],
        }
    }

    /// Swap child `old` for `new`, returning whether a slot matched.
    pub(crate) fn replace_child(&mut self, old: ExprId, new: ExprId) -> bool {
        match self {
            Node::Constant(_) | Node::Predicate(_) => false,
            Node::Not(a) => {
                if *a == old {
                    *a = new;
                    true
                } else {
                    false
                }
            }
            Node::Binary(_, a, b) => {
                if *a == old {
                    *a = new;
                    true
                } else if *b == old {
                    *b = new;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Arena slot: a node together with its back-reference.
#[derive(Debug, Clone)]
pub struct Entry {
    pub node: Node,
    pub parent: Option<ExprId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_apply_truth_tables() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(Connective::And.apply(a, b), a && b);
                assert_eq!(Connective::Or.apply(a, b), a || b);
                assert_eq!(Connective::Impl.apply(a, b), !a || b);
                assert_eq!(Connective::BiImpl.apply(a, b), a == b);
            }
        }
    }

    #[test]
    fn test_dual() {
        assert_eq!(Connective::And.dual(), Some(Connective::Or));
        assert_eq!(Connective::Or.dual(), Some(Connective::And));
        assert_eq!(Connective::Impl.dual(), None);
    }

    #[test]
    fn test_replace_child() {
        let a = ExprId::new(1);
        let b = ExprId::new(2);
        let c = ExprId::new(3);
        let mut node = Node::Binary(Connective::And, a, b);
        assert!(node.replace_child(b, c));
        assert_eq!(node, Node::Binary(Connective::And, a, c));
        assert!(!node.replace_child(b, a));
        assert_eq!(node.arity(), 2);
        assert_eq!(node.children(), vec![a, c]);
    }
}
