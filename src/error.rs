use thiserror::Error;

use crate::reference::ExprId;

#[derive(Debug, Error)]
pub enum Error {
    /// The source text does not follow the statement grammar.
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A statement failed its internal-consistency check before running.
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    /// A rewrite met a tree shape it cannot handle.
    #[error("Structural violation at node {node}: {message}")]
    Structure { node: ExprId, message: String },

    /// A truth table over this many atoms cannot be enumerated.
    #[error("Too many atoms for a truth table: {atoms} (at most {max})")]
    TooManyAtoms { atoms: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
