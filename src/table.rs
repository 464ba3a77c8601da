//! Truth tables.
//!
//! The columns of a table are, left to right: the distinct atoms of the formula
//! in lexicographic order, the immediate children of the root, and the root
//! itself. Rows enumerate all `2^N` assignments of the `N` atoms with the first
//! atom varying slowest and the last atom fastest, as nested loops would.
//!
//! Every cell is written as `" | "` followed by its content; every line ends
//! with `" |"`. A column is as wide as its header (the atom name, or the
//! rendered sub-formula), but never narrower than [`TableConfig::min_width`].
//! Headers are left-aligned and `tt`/`ff` cells right-aligned, so all lines of
//! a table have the same number of characters even for long atom names.
//!
//! ```
//! use prop_rs::expr::Formula;
//! use prop_rs::table::TruthTable;
//!
//! let f = Formula::build(|f| {
//!     let p = f.predicate("p");
//!     let q = f.predicate("q");
//!     f.implies(p, q)
//! });
//! let table = TruthTable::new(&f).unwrap();
//! assert_eq!(table.row_count(), 4);
//! let values: Vec<bool> = table.rows().map(|row| row.value()).collect();
//! assert_eq!(values, vec![true, true, false, true]);
//! ```

use std::fmt::{self, Display, Formatter, Write};

use log::debug;

use crate::context::EvaluationContext;
use crate::error::{Error, Result};
use crate::expr::Formula;
use crate::reference::ExprId;

/// Largest number of distinct atoms a table can enumerate.
pub const MAX_ATOMS: usize = 63;

pub const TRUE_CELL: &str = "tt";
pub const FALSE_CELL: &str = "ff";

/// Render a truth value as a table cell.
pub fn cell(value: bool) -> &'static str {
    if value {
        TRUE_CELL
    } else {
        FALSE_CELL
    }
}

/// Layout options for [`TruthTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Minimum column width (default: 2, the width of `tt`/`ff`)
    pub min_width: usize,
    /// Whether to draw the `|----|` line under the header (default: true)
    pub separator: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_width: 2,
            separator: true,
        }
    }
}

impl TableConfig {
    pub fn with_min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }
}

/// The distinct atoms of `formula`, sorted.
pub fn sorted_atoms(formula: &Formula) -> Vec<&str> {
    let mut atoms = formula.atoms();
    atoms.sort_unstable();
    atoms.dedup();
    atoms
}

/// All assignments of `n` variables, first variable slowest.
#[derive(Debug, Clone)]
pub struct Assignments {
    n: usize,
    next: u64,
    end: u64,
}

impl Assignments {
    /// All `2^n` assignments of `n` variables.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`MAX_ATOMS`]. [`TruthTable::new`] checks the
    /// limit and reports [`Error::TooManyAtoms`] instead.
    pub fn new(n: usize) -> Self {
        assert!(n <= MAX_ATOMS, "Too many atoms for a truth table: {}", n);
        Self {
            n,
            next: 0,
            end: 1 << n,
        }
    }
}

impl Iterator for Assignments {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        let bits = self.next;
        self.next += 1;
        Some(
            (0..self.n)
                .map(|i| (bits >> (self.n - 1 - i)) & 1 == 1)
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Assignments {}

/// One evaluated row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Values of the atoms, in column order.
    pub assignment: Vec<bool>,
    /// Values of the root's children, then of the root.
    pub results: Vec<bool>,
}

impl Row {
    /// Value of the whole formula.
    pub fn value(&self) -> bool {
        self.results.last().copied().unwrap_or_default()
    }
}

pub struct TruthTable<'a> {
    formula: &'a Formula,
    atoms: Vec<&'a str>,
    /// Evaluated columns: the root's children, then the root.
    nodes: Vec<ExprId>,
    config: TableConfig,
}

impl<'a> TruthTable<'a> {
    pub fn new(formula: &'a Formula) -> Result<Self> {
        Self::with_config(formula, TableConfig::default())
    }

    /// # Errors
    ///
    /// Fails with [`Error::TooManyAtoms`] if the formula has more than
    /// [`MAX_ATOMS`] distinct atoms.
    pub fn with_config(formula: &'a Formula, config: TableConfig) -> Result<Self> {
        let atoms = sorted_atoms(formula);
        if atoms.len() > MAX_ATOMS {
            return Err(Error::TooManyAtoms {
                atoms: atoms.len(),
                max: MAX_ATOMS,
            });
        }
        let root = formula.root();
        let mut nodes = formula.children(root);
        nodes.push(root);
        debug!("truth table: atoms = {:?}, 2^{} rows", atoms, atoms.len());
        Ok(Self {
            formula,
            atoms,
            nodes,
            config,
        })
    }

    pub fn atoms(&self) -> &[&'a str] {
        &self.atoms
    }

    pub fn column_count(&self) -> usize {
        self.atoms.len() + self.nodes.len()
    }

    pub fn row_count(&self) -> usize {
        1 << self.atoms.len()
    }

    /// Evaluate the row for one assignment, in a fresh context.
    pub fn row(&self, assignment: Vec<bool>) -> Row {
        let ctx = EvaluationContext::from_assignment(&self.atoms, &assignment);
        let results = self
            .nodes
            .iter()
            .map(|&id| self.formula.evaluate_node(id, &ctx))
            .collect();
        Row { assignment, results }
    }

    /// All rows, in enumeration order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        Assignments::new(self.atoms.len()).map(move |assignment| self.row(assignment))
    }

    /// Write the header, the separator and all rows.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        Ok(self.render_fmt(out)?)
    }

    fn render_fmt<W: Write>(&self, out: &mut W) -> fmt::Result {
        let min = self.config.min_width;
        let mut widths = Vec::with_capacity(self.column_count());

        for atom in &self.atoms {
            out.write_str(" | ")?;
            out.write_str(atom)?;
            let written = atom.chars().count();
            pad(out, written, min)?;
            widths.push(written.max(min));
        }
        for &id in &self.nodes {
            out.write_str(" | ")?;
            let written = self.formula.render_fmt(id, out)?;
            pad(out, written, min)?;
            widths.push(written.max(min));
        }
        out.write_str(" |\n")?;

        if self.config.separator {
            out.write_str(" |")?;
            for width in &widths {
                for _ in 0..width + 2 {
                    out.write_char('-')?;
                }
                out.write_char('|')?;
            }
            out.write_char('\n')?;
        }

        for row in self.rows() {
            let values = row.assignment.iter().chain(&row.results);
            for (value, width) in values.zip(&widths) {
                write!(out, " | {:>width$}", cell(*value), width = *width)?;
            }
            out.write_str(" |\n")?;
        }
        Ok(())
    }
}

fn pad<W: Write>(out: &mut W, written: usize, width: usize) -> fmt::Result {
    for _ in written..width {
        out.write_char(' ')?;
    }
    Ok(())
}

impl Display for TruthTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render_fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn implication() -> Formula {
        Formula::build(|f| {
            let p = f.predicate("p");
            let q = f.predicate("q");
            f.implies(p, q)
        })
    }

    #[test]
    fn test_assignments_order() {
        let rows: Vec<Vec<bool>> = Assignments::new(2).collect();
        assert_eq!(
            rows,
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true],
            ]
        );
    }

    #[test]
    fn test_assignments_zero_atoms() {
        let rows: Vec<Vec<bool>> = Assignments::new(0).collect();
        assert_eq!(rows, vec![Vec::<bool>::new()]);
        assert_eq!(Assignments::new(5).len(), 32);
    }

    #[test]
    fn test_sorted_atoms_dedup() {
        let f = Formula::build(|f| {
            let p = f.predicate("p");
            let q = f.predicate("q");
            let pq = f.and(p, q);
            let p2 = f.predicate("p");
            f.or(pq, p2)
        });
        assert_eq!(f.atoms(), vec!["p", "q", "p"]);
        assert_eq!(sorted_atoms(&f), vec!["p", "q"]);
    }

    #[test]
    fn test_implication_rows() {
        let f = implication();
        let table = TruthTable::new(&f).unwrap();
        assert_eq!(table.atoms(), &["p", "q"]);
        assert_eq!(table.column_count(), 5);
        let rows: Vec<Row> = table.rows().collect();
        assert_eq!(rows.len(), 4);
        let expected = [
            ([false, false], true),
            ([false, true], true),
            ([true, false], false),
            ([true, true], true),
        ];
        for (row, (assignment, value)) in rows.iter().zip(expected) {
            assert_eq!(row.assignment, assignment);
            assert_eq!(row.value(), value);
            // Children are the atoms themselves here.
            assert_eq!(&row.results[..2], &assignment);
        }
    }

    #[test]
    fn test_render_implication() {
        let f = implication();
        let text = TruthTable::new(&f).unwrap().to_string();
        let expected = "\
 | p  | q  | p  | q  | (p → q) |
 |----|----|----|----|---------|
 | ff | ff | ff | ff |      tt |
 | ff | tt | ff | tt |      tt |
 | tt | ff | tt | ff |      ff |
 | tt | tt | tt | tt |      tt |
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_long_atom_names_stay_aligned() {
        let f = Formula::build(|f| {
            let rain = f.predicate("rain");
            let wet = f.predicate("wet");
            let n = f.not(wet);
            f.and(rain, n)
        });
        let text = TruthTable::new(&f).unwrap().to_string();
        let expected = "\
 | rain | wet | rain | ¬wet | (rain ∧ ¬wet) |
 |------|-----|------|------|---------------|
 |   ff |  ff |   ff |   tt |            ff |
 |   ff |  tt |   ff |   ff |            ff |
 |   tt |  ff |   tt |   tt |            tt |
 |   tt |  tt |   tt |   ff |            ff |
";
        assert_eq!(text, expected);
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn test_render_without_separator() {
        let f = Formula::build(|f| f.predicate("p"));
        let config = TableConfig::default().with_separator(false).with_min_width(3);
        let text = TruthTable::with_config(&f, config).unwrap().to_string();
        assert_eq!(text, " | p   | p   |\n |  ff |  ff |\n |  tt |  tt |\n");
    }

    #[test]
    fn test_constant_formula_has_one_row() {
        let f = Formula::build(|f| f.constant(true));
        let table = TruthTable::new(&f).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.to_string(), " | ⊤  |\n |----|\n | tt |\n");
    }

    #[test]
    fn test_row_count_is_power_of_two() {
        let f = Formula::build(|f| {
            let a = f.predicate("a");
            let b = f.predicate("b");
            let c = f.predicate("c");
            let ab = f.or(a, b);
            f.and(ab, c)
        });
        let table = TruthTable::new(&f).unwrap();
        assert_eq!(table.rows().count(), 8);
        // Header + separator + 8 rows.
        assert_eq!(table.to_string().lines().count(), 10);
    }

    fn conjunction_of(n: usize) -> Formula {
        Formula::build(|f| {
            let mut acc = f.predicate("x0");
            for i in 1..n {
                let x = f.predicate(format!("x{}", i));
                acc = f.and(acc, x);
            }
            acc
        })
    }

    #[test]
    fn test_too_many_atoms_is_an_error() {
        let f = conjunction_of(MAX_ATOMS + 1);
        assert!(matches!(
            TruthTable::new(&f),
            Err(Error::TooManyAtoms { atoms: 64, max: 63 })
        ));
        let g = conjunction_of(MAX_ATOMS);
        assert_eq!(TruthTable::new(&g).unwrap().atoms().len(), MAX_ATOMS);
    }
}
