use test_log::test;

use prop_rs::context::EvaluationContext;
use prop_rs::error::Error;
use prop_rs::expr::Formula;
use prop_rs::nnf::{is_nnf, nnf_of, to_nnf};
use prop_rs::node::{Connective, Node};
use prop_rs::parser::{parse_formula, parse_program};
use prop_rs::statement::{Program, RunConfig, Statement};
use prop_rs::table::{sorted_atoms, Assignments, TableConfig};

fn run_source(source: &str, config: &RunConfig) -> (String, usize, usize) {
    let statements = parse_program(source).unwrap();
    let mut program = Program::from(statements);
    let mut out = Vec::new();
    let report = program.run(config, &mut out).unwrap();
    (
        String::from_utf8(out).unwrap(),
        report.executed,
        report.failures.len(),
    )
}

const FORMULAS: &[&str] = &[
    "p -> q",
    "p <-> q",
    "!(p & q) | r",
    "!!(a -> !b)",
    "!(a <-> (b | !c))",
    "(a -> b) <-> (!b -> !a)",
    "!(true & p) -> false",
    "!!!!x",
    "~(x ∨ y) ∧ (y → ⊥)",
];

/// Evaluate `f` and `g` under every assignment of `f`'s atoms.
fn assert_equivalent(f: &Formula, g: &Formula) {
    let atoms = sorted_atoms(f);
    for assignment in Assignments::new(atoms.len()) {
        let ctx = EvaluationContext::from_assignment(&atoms, &assignment);
        assert_eq!(
            f.evaluate(&ctx),
            g.evaluate(&ctx),
            "{} and {} differ on {:?}",
            f,
            g,
            assignment
        );
    }
}

#[test]
fn test_end_to_end_implication() {
    let source = "
        atoms p -> q;
        nnf p -> q;
        table p -> q;
    ";
    let (out, executed, failed) = run_source(source, &RunConfig::default());
    let expected = "\
Atoms in (p → q): p, q
(¬p ∨ q) ⇒ tt
 | p  | q  | p  | q  | (p → q) |
 |----|----|----|----|---------|
 | ff | ff | ff | ff |      tt |
 | ff | tt | ff | tt |      tt |
 | tt | ff | tt | ff |      ff |
 | tt | tt | tt | tt |      tt |

";
    assert_eq!(out, expected);
    assert_eq!((executed, failed), (3, 0));
}

#[test]
fn test_assignments_flow_through_the_program() {
    let source = "
        rain = true;
        wet = rain & !false;
        print rain -> wet;
        rain = false;
        print rain;
        print wet;
    ";
    let (out, _, _) = run_source(source, &RunConfig::default());
    assert_eq!(out, "(rain → wet) ⇒ tt\nrain ⇒ ff\nwet ⇒ tt\n");
}

#[test]
fn test_echo_and_table_config() {
    let config = RunConfig {
        table: TableConfig::default().with_separator(false),
        echo: true,
    };
    let (out, _, _) = run_source("table !p;", &config);
    assert_eq!(
        out,
        "Table of ¬p\n | p  | p  | ¬p |\n | ff | ff | tt |\n | tt | tt | ff |\n\n"
    );
}

#[test]
fn test_table_of_biconditional_has_children_columns() {
    let (out, _, _) = run_source("table a <-> !b;", &RunConfig::default());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], " | a  | b  | a  | ¬b | (a ↔ ¬b) |");
    assert_eq!(lines[1], " |----|----|----|----|----------|");
    assert_eq!(lines[2], " | ff | ff | ff | tt |       ff |");
    assert_eq!(lines[5], " | tt | tt | tt | ff |       ff |");
    assert_eq!(lines[6], "");
}

#[test]
fn test_nnf_outputs() {
    let source = "
        nnf !!p;
        nnf !(a & b);
        nnf !(a | (b & !c));
        nnf p <-> q;
    ";
    let (out, _, _) = run_source(source, &RunConfig::default());
    assert_eq!(
        out,
        "\
p ⇒ ff
(¬a ∨ ¬b) ⇒ tt
(¬a ∧ (¬b ∨ c)) ⇒ tt
((¬p ∨ q) ∧ (¬q ∨ p)) ⇒ tt
"
    );
}

#[test]
fn test_implication_equivalences() {
    let a = ["a", "b"];
    let impl_ab = parse_formula("a -> b").unwrap();
    let or_form = parse_formula("!a | b").unwrap();
    let iff_ab = parse_formula("a <-> b").unwrap();
    let both_ways = parse_formula("(a -> b) & (b -> a)").unwrap();
    for assignment in Assignments::new(a.len()) {
        let ctx = EvaluationContext::from_assignment(&a, &assignment);
        assert_eq!(impl_ab.evaluate(&ctx), or_form.evaluate(&ctx));
        assert_eq!(iff_ab.evaluate(&ctx), both_ways.evaluate(&ctx));
    }
}

#[test]
fn test_nnf_is_well_formed_and_equivalent() {
    for source in FORMULAS {
        let original = parse_formula(source).unwrap();
        let nnf = nnf_of(&original).unwrap();
        assert!(is_nnf(&nnf), "not in NNF: {}", nnf);
        nnf.check_links().unwrap();
        assert_equivalent(&original, &nnf);
    }
}

#[test]
fn test_nnf_in_place_leaves_no_forbidden_nodes() {
    for source in FORMULAS {
        let mut f = parse_formula(source).unwrap();
        to_nnf(&mut f).unwrap();
        let mut stack = vec![f.root()];
        while let Some(id) = stack.pop() {
            match f.node(id) {
                Node::Binary(Connective::Impl | Connective::BiImpl, ..) => {
                    panic!("{:?} survived in {}", f.node(id), f)
                }
                Node::Not(operand) => assert!(f.node(*operand).is_leaf(), "{}", f),
                _ => {}
            }
            stack.extend(f.children(id));
        }
    }
}

#[test]
fn test_double_negation_keeps_leaf() {
    let mut f = parse_formula("q & !!p").unwrap();
    let root = f.root();
    let Node::Binary(_, _, not_not) = *f.node(root) else {
        panic!("expected a conjunction");
    };
    let Node::Not(not) = *f.node(not_not) else {
        panic!("expected a negation");
    };
    let Node::Not(p) = *f.node(not) else {
        panic!("expected a negation");
    };

    to_nnf(&mut f).unwrap();

    assert_eq!(f.to_string(), "(q ∧ p)");
    assert_eq!(f.children(root)[1], p);
    assert_eq!(f.parent(p), Some(root));
    assert!(matches!(f.node(p), Node::Predicate(name) if name == "p"));
}

#[test]
fn test_row_count() {
    for (source, atoms) in [("p", 1), ("p & p", 1), ("a | b -> c", 3), ("true", 0)] {
        let (out, _, _) = run_source(&format!("table {};", source), &RunConfig::default());
        // Header, separator, rows, blank line.
        assert_eq!(out.lines().count(), 2 + (1 << atoms) + 1, "{}", source);
    }
}

#[test]
fn test_parse_error_position() {
    let err = parse_program("p = true;\nprint p &;").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, column: 10, .. }), "{}", err);
}

#[test]
fn test_failing_statement_does_not_stop_the_run() {
    let mut statements = parse_program("print a; print b;").unwrap();
    let bad_target = Statement::Assign(" ".to_string(), parse_formula("a").unwrap());
    statements.insert(1, bad_target);
    let mut program = Program::from(statements);
    let mut out = Vec::new();
    let report = program.run(&RunConfig::default(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a ⇒ ff\nb ⇒ ff\n");
    assert_eq!(report.executed, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, 1);
}

#[test]
fn test_nnf_of_mixed_chain_stays_tractable() {
    // Every fourth link is a biconditional, which copies its left operand.
    let f = Formula::build(|f| {
        let mut acc = f.predicate("x1");
        for i in 2..=32 {
            let x = f.predicate(format!("x{}", i));
            acc = match i % 4 {
                0 => f.iff(acc, x),
                1 => {
                    let conj = f.and(acc, x);
                    f.not(conj)
                }
                2 => f.implies(acc, x),
                _ => f.or(acc, x),
            };
        }
        acc
    });
    let nnf = nnf_of(&f).unwrap();
    assert!(is_nnf(&nnf));
    assert!(nnf.reachable_len() < 10_000, "{}", nnf.reachable_len());
}
