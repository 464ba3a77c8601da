//! # prop-rs: propositional logic in Rust
//!
//! **`prop-rs`** evaluates, tabulates and normalizes propositional formulas.
//! Formulas are trees of constants, named predicates, negation and the binary
//! connectives `∧ ∨ → ↔`, evaluated against a mapping from predicate names to
//! truth values.
//!
//! ## Key Features
//!
//! - **Arena Trees**: A [`Formula`][crate::expr::Formula] owns its nodes in one arena and hands out
//!   [`ExprId`][crate::reference::ExprId] handles. Every node knows its parent, so a rewrite can
//!   replace a node in whichever slot holds it.
//! - **Visitors**: [`Visitor`][crate::visit::Visitor] dispatches per node variant, and handlers may
//!   rewrite the node they are looking at.
//! - **Negation Normal Form**: [`to_nnf`][crate::nnf::to_nnf] removes `→` and `↔`, then pushes
//!   negations down to the leaves.
//! - **Truth Tables**: [`TruthTable`][crate::table::TruthTable] enumerates all assignments of the atoms.
//! - **Statements**: A small language of `print`, assignment, `atoms`, `table` and `nnf` statements,
//!   run in order against one shared context.
//!
//! ## Basic Usage
//!
//! ```rust
//! use prop_rs::parser::parse_program;
//! use prop_rs::statement::{Program, RunConfig};
//!
//! let statements = parse_program("
//!     rain = true;
//!     print rain -> wet;
//!     nnf !(rain & wet);
//! ").unwrap();
//!
//! let mut out = Vec::new();
//! let report = Program::from(statements).run(&RunConfig::default(), &mut out).unwrap();
//! assert!(report.is_success());
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "(rain → wet) ⇒ ff\n(¬rain ∨ ¬wet) ⇒ tt\n"
//! );
//! ```
//!
//! ## Core Components
//!
//! - **[`expr`]**: The [`Formula`][crate::expr::Formula] arena, builders, rendering and atoms.
//! - **[`nnf`]**: The two-stage negation normal form rewrite.
//! - **[`table`]**: Truth-table enumeration and layout.
//! - **[`statement`]**: Statements and the sequencer that runs them.
//! - **[`dot`]**: Utilities for visualizing formula trees using Graphviz.

pub mod context;
pub mod dot;
pub mod error;
pub mod eval;
pub mod expr;
pub mod nnf;
pub mod node;
pub mod parser;
pub mod reference;
pub mod statement;
pub mod table;
pub mod visit;
