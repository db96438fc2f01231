//! AST node types for the Brisk language.
//!
//! Parser-built nodes carry a [`Span`]; nodes built by the JSON decoder or by
//! hand use [`Span::default`]. Recursive expressions are boxed.

use crate::Span;
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program: the top-level statement sequence, run directly
/// against the root scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            span: Span::default(),
        }
    }
}

/// `{ stmts... }`: runs inside its own freshly entered scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            span: Span::default(),
        }
    }
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name, Span::default())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Let(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Print(s) => s.span,
        }
    }

    /// Statement keyword, for logs and messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Let(_) => "let",
            Stmt::Assign(_) => "assignment",
            Stmt::If(_) => "if",
            Stmt::While(_) => "while",
            Stmt::Print(_) => "print",
        }
    }

    pub fn let_(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Let(LetStmt {
            name: Ident::new(name, Span::default()),
            value,
            span: Span::default(),
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign(AssignStmt {
            name: Ident::new(name, Span::default()),
            value,
            span: Span::default(),
        })
    }

    pub fn if_(test: Expr, then_block: Vec<Stmt>, else_block: Vec<Stmt>) -> Self {
        Stmt::If(IfStmt {
            test,
            then_block: Block::new(then_block),
            else_block: Block::new(else_block),
            span: Span::default(),
        })
    }

    pub fn while_(test: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While(WhileStmt {
            test,
            body: Block::new(body),
            span: Span::default(),
        })
    }

    pub fn print(value: Expr) -> Self {
        Stmt::Print(PrintStmt {
            value,
            span: Span::default(),
        })
    }
}

/// `let name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// `name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// `if (test) { ... } else { ... }`. A missing `else` is an empty block.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub then_block: Block,
    pub else_block: Block,
    pub span: Span,
}

/// `while (test) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Block,
    pub span: Span,
}

/// `print(value);`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn number(value: f64) -> Self {
        Self::new(ExprKind::Number(value), Span::default())
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Bool(value), Span::default())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Variable(name.into()), Span::default())
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Bool(bool),
    Number(f64),
    Variable(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// `===`, legal on two values of the same type.
    StrictEq,
    // Logical
    And,
    Or,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Less,
    Greater,
}

impl BinOp {
    /// Every operator, in precedence-table order.
    pub const ALL: [BinOp; 9] = [
        BinOp::Or,
        BinOp::And,
        BinOp::StrictEq,
        BinOp::Less,
        BinOp::Greater,
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
    ];

    /// Returns the operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::StrictEq => "===",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Less => "<",
            BinOp::Greater => ">",
        }
    }

    /// Look up an operator by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        BinOp::ALL.into_iter().find(|op| op.as_str() == symbol)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
