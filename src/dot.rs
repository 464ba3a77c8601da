//! Formula tree to DOT (Graphviz) conversion.
//!
//! The generated graph has one vertex per node reachable from the root:
//! - **Leaves** (constants and predicates) are boxes, ranked together at the bottom
//! - **Connectives** are circles labeled with their glyph
//! - **Edges** point from a node to its operands: solid for the left (or only)
//!   operand, dashed for the right one
//! - **The root** gets an extra entry vertex at the top, labeled with the
//!   rendered formula
//!
//! # Examples
//!
//! ```
//! use prop_rs::expr::Formula;
//!
//! let f = Formula::build(|f| {
//!     let p = f.predicate("p");
//!     let q = f.predicate("q");
//!     f.and(p, q)
//! });
//! let dot = f.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Render with: dot -Tpng formula.dot -o formula.png
//! ```

use std::fmt::Write as _;

use crate::expr::{Formula, FALSE_GLYPH, NOT_GLYPH, TRUE_GLYPH};
use crate::node::Node;
use crate::reference::ExprId;

/// Configuration options for DOT output generation.
///
/// ```
/// use prop_rs::dot::DotConfig;
/// use prop_rs::expr::Formula;
///
/// let f = Formula::build(|f| f.predicate("p"));
/// let config = DotConfig {
///     leaf_shape: "ellipse",
///     ..DotConfig::default()
/// };
/// let dot = f.to_dot_with_config(&config).unwrap();
/// assert!(dot.contains("shape=ellipse"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for connective nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for constants and predicates (default: "box")
    pub leaf_shape: &'static str,
    /// Shape for the root entry (default: "plaintext")
    pub root_shape: &'static str,
    /// Style for edges to the left operand (default: "solid")
    pub lhs_edge_style: &'static str,
    /// Style for edges to the right operand (default: "dashed")
    pub rhs_edge_style: &'static str,
    /// Whether to show arena indices next to labels (default: false)
    pub show_ids: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            leaf_shape: "box",
            root_shape: "plaintext",
            lhs_edge_style: "solid",
            rhs_edge_style: "dashed",
            show_ids: false,
        }
    }
}

impl Formula {
    /// Converts the formula tree to DOT format with the default configuration.
    ///
    /// Nodes orphaned by earlier rewrites are not part of the tree and are left out.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let nodes = self.preorder();

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        let (leaves, inner): (Vec<ExprId>, Vec<ExprId>) =
            nodes.iter().partition(|&&id| self.node(id).is_leaf());

        for &id in &inner {
            writeln!(dot, "{} [label={:?}];", id.index(), self.dot_label(id, config))?;
        }

        writeln!(dot, "{{ rank=sink")?;
        for &id in &leaves {
            writeln!(
                dot,
                "{} [shape={}, label={:?}];",
                id.index(),
                config.leaf_shape,
                self.dot_label(id, config)
            )?;
        }
        writeln!(dot, "}}")?;

        for &id in &inner {
            let children = self.children(id);
            for (i, child) in children.iter().enumerate() {
                let style = if i == 0 {
                    config.lhs_edge_style
                } else {
                    config.rhs_edge_style
                };
                writeln!(dot, "{} -> {} [style={}];", id.index(), child.index(), style)?;
            }
        }

        writeln!(dot, "{{ rank=source")?;
        writeln!(
            dot,
            "r [shape={}, label={:?}];",
            config.root_shape,
            self.to_string()
        )?;
        writeln!(dot, "}}")?;
        writeln!(dot, "r -> {};", self.root().index())?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    fn dot_label(&self, id: ExprId, config: &DotConfig) -> String {
        let label = match self.node(id) {
            Node::Constant(true) => TRUE_GLYPH,
            Node::Constant(false) => FALSE_GLYPH,
            Node::Predicate(name) => name.as_str(),
            Node::Not(_) => NOT_GLYPH,
            Node::Binary(op, _, _) => op.glyph(),
        };
        if config.show_ids {
            format!("{} {}", label, id)
        } else {
            label.to_string()
        }
    }

    /// Reachable nodes, parents before children, left operands first.
    fn preorder(&self) -> Vec<ExprId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        order
    }
}
