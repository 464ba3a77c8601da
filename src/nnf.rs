//! Negation normal form.
//!
//! The rewrite runs in two fixed stages over the formula's own arena:
//!
//! 1. **Connective elimination.** `A → B` becomes `¬A ∨ B` in place.
//!    `A ↔ B` becomes `(¬A ∨ B) ∧ (¬B' ∨ A')`, where `A'` and `B'` are deep
//!    copies: the original operands go into the first disjunct, the copies into
//!    the second.
//! 2. **Negation pushdown.** `¬¬A` is replaced by `A` itself, and `¬(A ∧ B)` /
//!    `¬(A ∨ B)` by `¬A ∨ ¬B` / `¬A ∧ ¬B`; the replacement is then rewritten
//!    again. Every replacement takes over the parent slot of the node it
//!    replaces.
//!
//! Afterwards the only negated nodes are predicates and constants.
//!
//! ```
//! use prop_rs::expr::Formula;
//! use prop_rs::nnf::{is_nnf, to_nnf};
//!
//! let mut f = Formula::build(|f| {
//!     let p = f.predicate("p");
//!     let q = f.predicate("q");
//!     let pq = f.and(p, q);
//!     f.not(pq)
//! });
//! to_nnf(&mut f).unwrap();
//! assert_eq!(f.to_string(), "(¬p ∨ ¬q)");
//! assert!(is_nnf(&f));
//! ```

use log::debug;

use crate::error::{Error, Result};
use crate::expr::Formula;
use crate::node::{Connective, Node};
use crate::reference::ExprId;
use crate::visit::{descend, Handlers, Visitor};

/// Rewrite `formula` into negation normal form, in place.
pub fn to_nnf(formula: &mut Formula) -> Result<()> {
    debug!("to_nnf({})", formula);
    eliminate_connectives(formula)?;
    push_negations(formula)?;
    debug!("to_nnf => {}", formula);
    Ok(())
}

/// Rewrite a compact copy of `formula` into negation normal form.
pub fn nnf_of(formula: &Formula) -> Result<Formula> {
    let mut copy = formula.subformula(formula.root());
    to_nnf(&mut copy)?;
    Ok(copy)
}

/// Stage 1: remove every `→` and `↔` from the tree.
pub fn eliminate_connectives(formula: &mut Formula) -> Result<()> {
    let mut visitor = Handlers::new(descend, descend, descend, |f: &mut Formula, id| {
        match *f.node(id) {
            Node::Binary(Connective::Impl, a, b) => {
                debug!("A → B => ¬A ∨ B at {}", id);
                f.detach(a);
                let not_a = f.not(a);
                f.set_node(id, Node::Binary(Connective::Or, not_a, b));
            }
            Node::Binary(Connective::BiImpl, a, b) => {
                debug!("A ↔ B => (¬A ∨ B) ∧ (¬B ∨ A) at {}", id);
                let a_copy = f.deep_copy(a);
                let b_copy = f.deep_copy(b);
                f.detach(a);
                f.detach(b);
                let not_a = f.not(a);
                let lhs = f.or(not_a, b);
                let not_b = f.not(b_copy);
                let rhs = f.or(not_b, a_copy);
                f.set_node(id, Node::Binary(Connective::And, lhs, rhs));
            }
            _ => {}
        }
        Ok(true)
    });
    let root = formula.root();
    formula.dispatch(root, &mut visitor)
}

/// Stage 2: drive negations down to the leaves.
///
/// Expects a tree without `→` and `↔`; meeting one is a structural error.
pub fn push_negations(formula: &mut Formula) -> Result<()> {
    let root = formula.root();
    formula.dispatch(root, &mut PushNegations)
}

struct PushNegations;

impl Visitor for PushNegations {
    fn visit_constant(&mut self, _formula: &mut Formula, _id: ExprId) -> Result<bool> {
        Ok(false)
    }

    fn visit_predicate(&mut self, _formula: &mut Formula, _id: ExprId) -> Result<bool> {
        Ok(false)
    }

    fn visit_not(&mut self, f: &mut Formula, id: ExprId) -> Result<bool> {
        let Node::Not(operand) = *f.node(id) else {
            return Err(Error::Structure {
                node: id,
                message: "expected a negation".to_string(),
            });
        };

        match *f.node(operand) {
            Node::Constant(_) | Node::Predicate(_) => {}
            Node::Not(inner) => {
                debug!("¬¬A => A at {}", id);
                f.replace(id, inner)?;
                f.dispatch(inner, self)?;
            }
            Node::Binary(op, b, c) => {
                let Some(dual) = op.dual() else {
                    return Err(Error::Structure {
                        node: operand,
                        message: format!("connective {} survived elimination", op),
                    });
                };
                debug!("¬(A {} B) => ¬A {} ¬B at {}", op, dual, id);
                f.detach(b);
                f.detach(c);
                let not_b = f.not(b);
                let not_c = f.not(c);
                let replacement = f.binary(dual, not_b, not_c);
                f.replace(id, replacement)?;
                f.dispatch(replacement, self)?;
            }
        }
        Ok(false)
    }

    fn visit_binary(&mut self, f: &mut Formula, id: ExprId) -> Result<bool> {
        match *f.node(id) {
            Node::Binary(Connective::And | Connective::Or, ..) => Ok(true),
            Node::Binary(op, ..) => Err(Error::Structure {
                node: id,
                message: format!("connective {} survived elimination", op),
            }),
            _ => Err(Error::Structure {
                node: id,
                message: "expected a binary connective".to_string(),
            }),
        }
    }
}

/// Check that no `→`/`↔` remains and only leaves are negated.
pub fn is_nnf(formula: &Formula) -> bool {
    let mut stack = vec![formula.root()];
    while let Some(id) = stack.pop() {
        match formula.node(id) {
            Node::Constant(_) | Node::Predicate(_) => {}
            Node::Not(a) => {
                if !formula.node(*a).is_leaf() {
                    return false;
                }
            }
            Node::Binary(Connective::Impl | Connective::BiImpl, ..) => return false,
            Node::Binary(_, a, b) => {
                stack.push(*a);
                stack.push(*b);
            }
        }
    }
    true
}
