//! Top-level statements and the sequencer that runs them.
//!
//! Every statement owns its formula. A [`Program`] runs its statements in
//! order against one shared [`EvaluationContext`]: `Assign` writes to it, all
//! other statements only read it. `PrintNnf` rewrites its own formula, which
//! no other statement can see.
//!
//! Each statement renders its block into a buffer first, so a statement that
//! fails writes nothing. The failure is logged and recorded, and the next
//! statement runs regardless.

use std::fmt::{self, Display, Formatter, Write as _};
use std::io;

use log::{debug, error};

use crate::context::EvaluationContext;
use crate::error::{Error, Result};
use crate::expr::Formula;
use crate::nnf::to_nnf;
use crate::table::{cell, TableConfig, TruthTable};

/// Glyph between a formula and its value.
pub const YIELDS: &str = "⇒";

#[derive(Debug, Clone)]
pub enum Statement {
    /// Print the formula and its value.
    Print(Formula),
    /// Evaluate the formula and store the value under a predicate name.
    Assign(String, Formula),
    /// Print the atoms of the formula in traversal order.
    PrintAtoms(Formula),
    /// Print the full truth table of the formula.
    PrintTable(Formula),
    /// Rewrite the formula into negation normal form, then print it and its value.
    PrintNnf(Formula),
}

impl Statement {
    pub fn formula(&self) -> &Formula {
        match self {
            Statement::Print(f)
            | Statement::Assign(_, f)
            | Statement::PrintAtoms(f)
            | Statement::PrintTable(f)
            | Statement::PrintNnf(f) => f,
        }
    }

    /// Internal-consistency check run before a statement executes.
    pub fn validate(&self) -> Result<()> {
        if let Statement::Assign(name, _) = self {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(Error::MalformedStatement(format!(
                    "invalid assignment target {:?}",
                    name
                )));
            }
        }
        self.formula()
            .check_links()
            .map_err(|e| Error::MalformedStatement(e.to_string()))
    }

    /// Run the statement and return the text block it prints.
    pub fn exec(&mut self, ctx: &mut EvaluationContext, config: &RunConfig) -> Result<String> {
        self.validate()?;

        let mut block = String::new();
        if config.echo {
            writeln!(block, "{}", self)?;
        }

        match self {
            Statement::Print(f) => {
                writeln!(block, "{} {} {}", f, YIELDS, cell(f.evaluate(ctx)))?;
            }
            Statement::Assign(name, f) => {
                let value = f.evaluate(ctx);
                debug!("{} := {}", name, value);
                ctx.set(name.as_str(), value);
            }
            Statement::PrintAtoms(f) => {
                writeln!(block, "Atoms in {}: {}", f, f.atoms().join(", "))?;
            }
            Statement::PrintTable(f) => {
                TruthTable::with_config(f, config.table.clone())?.render(&mut block)?;
                block.push('\n');
            }
            Statement::PrintNnf(f) => {
                to_nnf(f)?;
                writeln!(block, "{} {} {}", f, YIELDS, cell(f.evaluate(ctx)))?;
            }
        }
        Ok(block)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Print(e) => write!(f, "Print: {}", e),
            Statement::Assign(name, e) => write!(f, "Set {} to {}", name, e),
            Statement::PrintAtoms(e) => write!(f, "Printing atoms of {}", e),
            Statement::PrintTable(e) => write!(f, "Table of {}", e),
            Statement::PrintNnf(e) => write!(f, "NNF of {}", e),
        }
    }
}

/// Options for running a [`Program`].
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub table: TableConfig,
    /// Print each statement's description before its output.
    pub echo: bool,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of statements that ran to completion.
    pub executed: usize,
    /// Failed statements, by position, with the reason.
    pub failures: Vec<(usize, Error)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered list of statements.
#[derive(Debug, Clone, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Run every statement once, in order, against a fresh context.
    pub fn run<W: io::Write>(&mut self, config: &RunConfig, out: &mut W) -> Result<RunReport> {
        let mut ctx = EvaluationContext::new();
        self.run_with(&mut ctx, config, out)
    }

    /// Run every statement once, in order, against `ctx`.
    ///
    /// Statement failures are collected in the report. Only a failure to
    /// write to `out` aborts the run.
    pub fn run_with<W: io::Write>(
        &mut self,
        ctx: &mut EvaluationContext,
        config: &RunConfig,
        out: &mut W,
    ) -> Result<RunReport> {
        let mut report = RunReport::default();
        for (index, statement) in self.statements.iter_mut().enumerate() {
            debug!("statement #{}: {}", index + 1, statement);
            match statement.exec(ctx, config) {
                Ok(block) => {
                    out.write_all(block.as_bytes())?;
                    report.executed += 1;
                }
                Err(e) => {
                    error!("statement #{} failed: {}", index + 1, e);
                    report.failures.push((index, e));
                }
            }
        }
        out.flush()?;
        Ok(report)
    }
}

impl From<Vec<Statement>> for Program {
    fn from(statements: Vec<Statement>) -> Self {
        Self::new(statements)
    }
}
