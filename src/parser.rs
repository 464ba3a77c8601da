//! Text front end.
//!
//! A program is a sequence of statements, each terminated by `;`:
//!
//! ```text
//! print <expr>;        # show the formula and its value
//! <name> = <expr>;     # assign the value to a predicate
//! atoms <expr>;        # list the atoms
//! table <expr>;        # print the truth table
//! nnf <expr>;          # rewrite to negation normal form, then print
//! ```
//!
//! Operators, loosest first: `<->` and `->` (both right-associative), `|`,
//! `&`, and prefix `!`. The Unicode glyphs `↔ → ∨ ∧ ¬` and `~` for negation
//! are accepted too. Constants are `true`/`false` (or `⊤`/`⊥`). A `#` starts a
//! comment that runs to the end of the line.
//!
//! ```
//! use prop_rs::parser::{parse_formula, parse_program};
//!
//! let f = parse_formula("!(p & q) -> r").unwrap();
//! assert_eq!(f.to_string(), "(¬(p ∧ q) → r)");
//!
//! let statements = parse_program("p = true; print p | q;").unwrap();
//! assert_eq!(statements.len(), 2);
//! ```

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Error, Result};
use crate::expr::Formula;
use crate::node::Connective;
use crate::reference::ExprId;
use crate::statement::Statement;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Ident(String),
    True,
    False,
    Print,
    Atoms,
    Table,
    Nnf,
    Not,
    And,
    Or,
    Implies,
    Iff,
    LParen,
    RParen,
    Assign,
    Semi,
    Eof,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{}`", name),
            TokenKind::True => "`true`".to_string(),
            TokenKind::False => "`false`".to_string(),
            TokenKind::Print => "`print`".to_string(),
            TokenKind::Atoms => "`atoms`".to_string(),
            TokenKind::Table => "`table`".to_string(),
            TokenKind::Nnf => "`nnf`".to_string(),
            TokenKind::Not => "`!`".to_string(),
            TokenKind::And => "`&`".to_string(),
            TokenKind::Or => "`|`".to_string(),
            TokenKind::Implies => "`->`".to_string(),
            TokenKind::Iff => "`<->`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Assign => "`=`".to_string(),
            TokenKind::Semi => "`;`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
    column: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn expect(&mut self, want: char, line: usize, column: usize, op: &str) -> Result<()> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            _ => Err(Error::Parse {
                line,
                column,
                message: format!("incomplete operator, expected `{}`", op),
            }),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let (line, column) = (self.line, self.column);
            let Some(c) = self.bump() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    column,
                });
                return Ok(tokens);
            };
            let kind = match c {
                c if c.is_whitespace() => continue,
                '#' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.bump();
                    }
                    continue;
                }
                '!' | '~' | '¬' => TokenKind::Not,
                '&' | '∧' => TokenKind::And,
                '|' | '∨' => TokenKind::Or,
                '→' => TokenKind::Implies,
                '↔' => TokenKind::Iff,
                '⊤' => TokenKind::True,
                '⊥' => TokenKind::False,
                '-' => {
                    self.expect('>', line, column, "->")?;
                    TokenKind::Implies
                }
                '<' => {
                    self.expect('-', line, column, "<->")?;
                    self.expect('>', line, column, "<->")?;
                    TokenKind::Iff
                }
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '=' => TokenKind::Assign,
                ';' => TokenKind::Semi,
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let mut word = String::from(c);
                    while let Some(&c) = self.chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            word.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    match word.as_str() {
                        "true" => TokenKind::True,
                        "false" => TokenKind::False,
                        "print" => TokenKind::Print,
                        "atoms" => TokenKind::Atoms,
                        "table" => TokenKind::Table,
                        "nnf" => TokenKind::Nnf,
                        _ => TokenKind::Ident(word),
                    }
                }
                other => {
                    return Err(Error::Parse {
                        line,
                        column,
                        message: format!("unexpected character {:?}", other),
                    })
                }
            };
            tokens.push(Token { kind, line, column });
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Result<Self> {
        Ok(Self {
            tokens: Lexer::new(source).tokenize()?,
            pos: 0,
        })
    }

    fn peek(&self) -> &Token {
        // The token list always ends with `Eof`, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T> {
        let token = self.peek();
        Err(Error::Parse {
            line: token.line,
            column: token.column,
            message: message.into(),
        })
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            self.error(format!(
                "expected {}, found {}",
                kind.describe(),
                self.peek().kind.describe()
            ))
        }
    }

    fn program(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Statement> {
        let statement = match self.peek().kind.clone() {
            TokenKind::Print => {
                self.advance();
                Statement::Print(self.formula()?)
            }
            TokenKind::Atoms => {
                self.advance();
                Statement::PrintAtoms(self.formula()?)
            }
            TokenKind::Table => {
                self.advance();
                Statement::PrintTable(self.formula()?)
            }
            TokenKind::Nnf => {
                self.advance();
                Statement::PrintNnf(self.formula()?)
            }
            TokenKind::Ident(name) => {
                self.advance();
                self.expect(TokenKind::Assign)?;
                Statement::Assign(name, self.formula()?)
            }
            other => return self.error(format!("expected a statement, found {}", other.describe())),
        };
        self.expect(TokenKind::Semi)?;
        Ok(statement)
    }

    fn formula(&mut self) -> Result<Formula> {
        Formula::try_build(|f| self.iff(f))
    }

    fn iff(&mut self, f: &mut Formula) -> Result<ExprId> {
        let lhs = self.implies(f)?;
        if self.eat(&TokenKind::Iff) {
            let rhs = self.iff(f)?;
            Ok(f.binary(Connective::BiImpl, lhs, rhs))
        } else {
            Ok(lhs)
        }
    }

    fn implies(&mut self, f: &mut Formula) -> Result<ExprId> {
        let lhs = self.or(f)?;
        if self.eat(&TokenKind::Implies) {
            let rhs = self.implies(f)?;
            Ok(f.binary(Connective::Impl, lhs, rhs))
        } else {
            Ok(lhs)
        }
    }

    fn or(&mut self, f: &mut Formula) -> Result<ExprId> {
        let mut lhs = self.and(f)?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.and(f)?;
            lhs = f.binary(Connective::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and(&mut self, f: &mut Formula) -> Result<ExprId> {
        let mut lhs = self.unary(f)?;
        while self.eat(&TokenKind::And) {
            let rhs = self.unary(f)?;
            lhs = f.binary(Connective::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self, f: &mut Formula) -> Result<ExprId> {
        if self.eat(&TokenKind::Not) {
            let operand = self.unary(f)?;
            Ok(f.not(operand))
        } else {
            self.primary(f)
        }
    }

    fn primary(&mut self, f: &mut Formula) -> Result<ExprId> {
        match self.peek().kind.clone() {
            TokenKind::True => {
                self.advance();
                Ok(f.constant(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(f.constant(false))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(f.predicate(name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.iff(f)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            other => self.error(format!("expected a formula, found {}", other.describe())),
        }
    }
}

/// Parse a whole program into statements, in source order.
pub fn parse_program(source: &str) -> Result<Vec<Statement>> {
    Parser::new(source)?.program()
}

/// Parse a single formula, with nothing after it.
pub fn parse_formula(source: &str) -> Result<Formula> {
    let mut parser = Parser::new(source)?;
    let formula = parser.formula()?;
    parser.expect(TokenKind::Eof)?;
    Ok(formula)
}
