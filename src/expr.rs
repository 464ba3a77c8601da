//! Arena-backed formula trees.
//!
//! A [`Formula`] owns every node of one tree in a contiguous arena and hands
//! out [`ExprId`] handles to them. Each node records its parent, which is kept
//! in sync by the builders and by [`Formula::replace`]. The parent link is a
//! plain index, so it never owns anything: ownership flows strictly from the
//! root down through the child handles stored in each [`Node`].
//!
//! Rewrites never free nodes. A node that is cut out of the tree stays in the
//! arena, unreachable from the root, until the formula is dropped. Use
//! [`Formula::subformula`] to obtain a compact copy.
//!
//! # Examples
//!
//! ```
//! use prop_rs::context::EvaluationContext;
//! use prop_rs::expr::Formula;
//!
//! let f = Formula::build(|f| {
//!     let p = f.predicate("p");
//!     let q = f.predicate("q");
//!     f.implies(p, q)
//! });
//! assert_eq!(f.to_string(), "(p → q)");
//! assert_eq!(f.atoms(), vec!["p", "q"]);
//!
//! let mut ctx = EvaluationContext::new();
//! ctx.set("p", true);
//! assert!(!f.evaluate(&ctx));
//! ```

use std::fmt::{self, Display, Formatter, Write};

use crate::error::{Error, Result};
use crate::node::{Connective, Entry, Node};
use crate::reference::ExprId;

pub const TRUE_GLYPH: &str = "⊤";
pub const FALSE_GLYPH: &str = "⊥";
pub const NOT_GLYPH: &str = "¬";

#[derive(Debug, Clone)]
pub struct Formula {
    nodes: Vec<Entry>,
    root: ExprId,
}

impl Formula {
    /// Build a formula by allocating nodes in a fresh arena.
    ///
    /// The handle returned by `build` becomes the root.
    ///
    /// # Panics
    ///
    /// Panics if the returned handle does not name a detached node of the arena.
    pub fn build<F>(build: F) -> Self
    where
        F: FnOnce(&mut Formula) -> ExprId,
    {
        let mut formula = Self::empty();
        let root = build(&mut formula);
        formula.set_root(root);
        formula
    }

    /// Fallible version of [`Formula::build`], used by the parser.
    pub fn try_build<F>(build: F) -> Result<Self>
    where
        F: FnOnce(&mut Formula) -> Result<ExprId>,
    {
        let mut formula = Self::empty();
        let root = build(&mut formula)?;
        formula.set_root(root);
        Ok(formula)
    }

    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: ExprId::new(0),
        }
    }

    pub fn root(&self) -> ExprId {
        self.root
    }

    /// Install `root` as the root of the tree.
    pub fn set_root(&mut self, root: ExprId) {
        assert!(root.index() < self.nodes.len(), "Root {} is out of bounds", root);
        assert!(self.parent(root).is_none(), "Root {} is attached to a parent", root);
        self.root = root;
    }

    /// Total number of arena slots, including nodes orphaned by rewrites.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes reachable from the root.
    pub fn reachable_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.children(id));
        }
        count
    }

    pub fn node(&self, id: ExprId) -> &Node {
        &self.nodes[id.index()].node
    }

    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.nodes[id.index()].parent
    }

    /// Immediate children of `id`, left to right.
    pub fn children(&self, id: ExprId) -> Vec<ExprId> {
        self.node(id).children()
    }
}

// Construction
impl Formula {
    fn alloc(&mut self, node: Node) -> ExprId {
        let id = ExprId::from(self.nodes.len());
        for child in node.children() {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(Entry { node, parent: None });
        id
    }

    fn assert_detached(&self, id: ExprId) {
        assert!(id.index() < self.nodes.len(), "Node {} is out of bounds", id);
        assert!(self.parent(id).is_none(), "Node {} already has a parent", id);
    }

    pub fn constant(&mut self, value: bool) -> ExprId {
        self.alloc(Node::Constant(value))
    }

    pub fn predicate(&mut self, name: impl Into<String>) -> ExprId {
        self.alloc(Node::Predicate(name.into()))
    }

    /// Negate a detached node.
    pub fn not(&mut self, operand: ExprId) -> ExprId {
        self.assert_detached(operand);
        self.alloc(Node::Not(operand))
    }

    /// Join two detached nodes with a connective.
    pub fn binary(&mut self, op: Connective, lhs: ExprId, rhs: ExprId) -> ExprId {
        assert_ne!(lhs, rhs, "A node cannot be both operands");
        self.assert_detached(lhs);
        self.assert_detached(rhs);
        self.alloc(Node::Binary(op, lhs, rhs))
    }

    pub fn and(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(Connective::And, lhs, rhs)
    }

    pub fn or(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(Connective::Or, lhs, rhs)
    }

    pub fn implies(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(Connective::Impl, lhs, rhs)
    }

    pub fn iff(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(Connective::BiImpl, lhs, rhs)
    }
}

// Editing
impl Formula {
    /// Cut the back-reference of `id`, so it can be attached elsewhere.
    ///
    /// The former parent still lists `id` as a child until its slot is
    /// overwritten; callers must do that before the tree is observed again.
    pub(crate) fn detach(&mut self, id: ExprId) {
        self.nodes[id.index()].parent = None;
    }

    /// Overwrite the node stored at `id`, adopting the new children.
    pub(crate) fn set_node(&mut self, id: ExprId, node: Node) {
        for child in node.children() {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes[id.index()].node = node;
    }

    /// Put `new` into the slot that currently holds `old`.
    ///
    /// The slot is either a child slot of `old`'s parent or the root. `new`
    /// takes over `old`'s parent, and `old` is left detached.
    pub fn replace(&mut self, old: ExprId, new: ExprId) -> Result<()> {
        if old == new {
            return Ok(());
        }
        match self.parent(old) {
            Some(parent) => {
                if !self.nodes[parent.index()].node.replace_child(old, new) {
                    return Err(Error::Structure {
                        node: old,
                        message: format!("parent {} does not hold this node", parent),
                    });
                }
                self.nodes[new.index()].parent = Some(parent);
            }
            None if old == self.root => {
                self.root = new;
                self.nodes[new.index()].parent = None;
            }
            None => {
                return Err(Error::Structure {
                    node: old,
                    message: "node is detached from the tree".to_string(),
                });
            }
        }
        self.detach(old);
        Ok(())
    }

    /// Copy the subtree at `id` into fresh nodes of the same arena.
    ///
    /// The copy shares nothing with the source and has no parent.
    pub fn deep_copy(&mut self, id: ExprId) -> ExprId {
        let node = match self.node(id).clone() {
            Node::Not(a) => Node::Not(self.deep_copy(a)),
            Node::Binary(op, a, b) => {
                let a = self.deep_copy(a);
                let b = self.deep_copy(b);
                Node::Binary(op, a, b)
            }
            leaf => leaf,
        };
        self.alloc(node)
    }

    /// Copy the subtree at `id` into a new, compact formula.
    pub fn subformula(&self, id: ExprId) -> Formula {
        fn copy_into(src: &Formula, dst: &mut Formula, id: ExprId) -> ExprId {
            let node = match src.node(id) {
                Node::Not(a) => Node::Not(copy_into(src, dst, *a)),
                Node::Binary(op, a, b) => {
                    let a = copy_into(src, dst, *a);
                    let b = copy_into(src, dst, *b);
                    Node::Binary(*op, a, b)
                }
                leaf => leaf.clone(),
            };
            dst.alloc(node)
        }

        Formula::build(|dst| copy_into(self, dst, id))
    }

    /// Verify that every node reachable from the root appears exactly once and
    /// points back at the node that holds it.
    pub fn check_links(&self) -> Result<()> {
        if let Some(parent) = self.parent(self.root) {
            return Err(Error::Structure {
                node: self.root,
                message: format!("root has parent {}", parent),
            });
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(Error::Structure {
                    node: id,
                    message: "node is reachable twice".to_string(),
                });
            }
            for child in self.children(id) {
                if self.parent(child) != Some(id) {
                    return Err(Error::Structure {
                        node: child,
                        message: format!("back-reference does not point at {}", id),
                    });
                }
                stack.push(child);
            }
        }
        Ok(())
    }
}

// Queries
impl Formula {
    /// Predicate names in the whole formula, in traversal order, duplicates kept.
    pub fn atoms(&self) -> Vec<&str> {
        self.atoms_of(self.root)
    }

    /// Predicate names below `id`, in traversal order, duplicates kept.
    pub fn atoms_of(&self, id: ExprId) -> Vec<&str> {
        let mut atoms = Vec::new();
        self.collect_atoms(id, &mut atoms);
        atoms
    }

    fn collect_atoms<'a>(&'a self, id: ExprId, atoms: &mut Vec<&'a str>) {
        match self.node(id) {
            Node::Constant(_) => {}
            Node::Predicate(name) => atoms.push(name),
            Node::Not(a) => self.collect_atoms(*a, atoms),
            Node::Binary(_, a, b) => {
                self.collect_atoms(*a, atoms);
                self.collect_atoms(*b, atoms);
            }
        }
    }

    /// Write the subtree at `id` and return the number of characters written.
    pub fn render<W: Write>(&self, id: ExprId, out: &mut W) -> Result<usize> {
        Ok(self.render_fmt(id, out)?)
    }

    pub(crate) fn render_fmt<W: Write>(&self, id: ExprId, out: &mut W) -> std::result::Result<usize, fmt::Error> {
        fn emit<W: Write>(out: &mut W, text: &str) -> std::result::Result<usize, fmt::Error> {
            out.write_str(text)?;
            Ok(text.chars().count())
        }

        match self.node(id) {
            Node::Constant(true) => emit(out, TRUE_GLYPH),
            Node::Constant(false) => emit(out, FALSE_GLYPH),
            Node::Predicate(name) => emit(out, name),
            Node::Not(a) => Ok(emit(out, NOT_GLYPH)? + self.render_fmt(*a, out)?),
            Node::Binary(op, a, b) => {
                let mut width = emit(out, "(")?;
                width += self.render_fmt(*a, out)?;
                width += emit(out, " ")?;
                width += emit(out, op.glyph())?;
                width += emit(out, " ")?;
                width += self.render_fmt(*b, out)?;
                width += emit(out, ")")?;
                Ok(width)
            }
        }
    }

    /// Render the subtree at `id` into a new string, with its width.
    pub fn render_string(&self, id: ExprId) -> (String, usize) {
        let mut text = String::new();
        let width = self.render_fmt(id, &mut text).unwrap_or_default();
        (text, width)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render_fmt(self.root, f).map(|_| ())
    }
}
