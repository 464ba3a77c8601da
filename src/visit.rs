//! Per-variant dispatch over a formula tree.
//!
//! A [`Visitor`] has one handler per node variant. [`Formula::dispatch`] calls
//! the handler matching the node and, if it returns `true`, dispatches into
//! each child in turn. Handlers receive the formula mutably, so a pass can
//! rewrite the node it is looking at; children are read *after* the handler
//! returns, so descent follows the rewritten shape.
//!
//! For small passes, [`Handlers`] builds a visitor from four closures:
//!
//! ```
//! use prop_rs::expr::Formula;
//! use prop_rs::visit::{descend, Handlers};
//!
//! let mut f = Formula::build(|f| {
//!     let p = f.predicate("p");
//!     let q = f.predicate("q");
//!     f.and(p, q)
//! });
//!
//! let mut count = 0;
//! let mut visitor = Handlers::new(descend, |_: &mut Formula, _| {
//!     count += 1;
//!     Ok(true)
//! }, descend, descend);
//! let root = f.root();
//! f.dispatch(root, &mut visitor).unwrap();
//! assert_eq!(count, 2);
//! ```

use crate::error::Result;
use crate::expr::Formula;
use crate::node::NodeKind;
use crate::reference::ExprId;

/// One handler per node variant. Each returns whether to descend.
///
/// The defaults descend everywhere.
pub trait Visitor {
    fn visit_constant(&mut self, _formula: &mut Formula, _id: ExprId) -> Result<bool> {
        Ok(true)
    }

    fn visit_predicate(&mut self, _formula: &mut Formula, _id: ExprId) -> Result<bool> {
        Ok(true)
    }

    fn visit_not(&mut self, _formula: &mut Formula, _id: ExprId) -> Result<bool> {
        Ok(true)
    }

    fn visit_binary(&mut self, _formula: &mut Formula, _id: ExprId) -> Result<bool> {
        Ok(true)
    }
}

impl Formula {
    /// Run `visitor` on the subtree rooted at `id`.
    pub fn dispatch<V>(&mut self, id: ExprId, visitor: &mut V) -> Result<()>
    where
        V: Visitor + ?Sized,
    {
        let descend = match self.node(id).kind() {
            NodeKind::Constant => visitor.visit_constant(self, id)?,
            NodeKind::Predicate => visitor.visit_predicate(self, id)?,
            NodeKind::Not => visitor.visit_not(self, id)?,
            NodeKind::Binary(_) => visitor.visit_binary(self, id)?,
        };
        if descend {
            for child in self.children(id) {
                self.dispatch(child, visitor)?;
            }
        }
        Ok(())
    }
}

/// Handler that always descends.
pub fn descend(_formula: &mut Formula, _id: ExprId) -> Result<bool> {
    Ok(true)
}

/// Handler that never descends.
pub fn stop(_formula: &mut Formula, _id: ExprId) -> Result<bool> {
    Ok(false)
}

/// A visitor assembled from one closure per variant.
pub struct Handlers<C, P, N, B> {
    pub constant: C,
    pub predicate: P,
    pub not: N,
    pub binary: B,
}

impl<C, P, N, B> Handlers<C, P, N, B>
where
    C: FnMut(&mut Formula, ExprId) -> Result<bool>,
    P: FnMut(&mut Formula, ExprId) -> Result<bool>,
    N: FnMut(&mut Formula, ExprId) -> Result<bool>,
    B: FnMut(&mut Formula, ExprId) -> Result<bool>,
{
    pub fn new(constant: C, predicate: P, not: N, binary: B) -> Self {
        Self {
            constant,
            predicate,
            not,
            binary,
        }
    }
}

impl<C, P, N, B> Visitor for Handlers<C, P, N, B>
where
    C: FnMut(&mut Formula, ExprId) -> Result<bool>,
    P: FnMut(&mut Formula, ExprId) -> Result<bool>,
    N: FnMut(&mut Formula, ExprId) -> Result<bool>,
    B: FnMut(&mut Formula, ExprId) -> Result<bool>,
{
    fn visit_constant(&mut self, formula: &mut Formula, id: ExprId) -> Result<bool> {
        (self.constant)(formula, id)
    }

    fn visit_predicate(&mut self, formula: &mut Formula, id: ExprId) -> Result<bool> {
        (self.predicate)(formula, id)
    }

    fn visit_not(&mut self, formula: &mut Formula, id: ExprId) -> Result<bool> {
        (self.not)(formula, id)
    }

    fn visit_binary(&mut self, formula: &mut Formula, id: ExprId) -> Result<bool> {
        (self.binary)(formula, id)
    }
}
