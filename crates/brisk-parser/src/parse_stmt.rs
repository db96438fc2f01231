//! Program, block, and statement parsing.

use crate::parser::{Parser, MAX_NESTING};
use brisk_lexer::token::TokenKind;
use brisk_types::ast::*;
use brisk_types::ErrorCode;

impl<'src> Parser<'src> {
    /// `program = { stmt }`
    pub(crate) fn parse_program(&mut self) -> Option<Program> {
        let start = self.current_span();
        let stmts = self.parse_stmt_list(false);
        let span = start.merge(self.previous_span());
        Some(Program { stmts, span })
    }

    /// Parse statements until `}` (inside a block) or end of input.
    fn parse_stmt_list(&mut self, in_block: bool) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            if self.at_end() || self.too_many_errors() {
                break;
            }
            if self.check(&TokenKind::RBrace) {
                if in_block {
                    break;
                }
                self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, "unmatched '}'");
                self.advance();
                continue;
            }
            let before = self.position();
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => {
                    self.synchronize();
                    // Guarantee progress when the failing token is itself a
                    // synchronization point.
                    if self.position() == before {
                        self.advance();
                    }
                }
            }
        }
        stmts
    }

    /// `block = "{" { stmt } "}"`
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let open = self.expect(&TokenKind::LBrace)?;
        self.block_depth += 1;
        if self.block_depth > MAX_NESTING {
            self.error_at(
                ErrorCode::NESTING_LIMIT_EXCEEDED,
                format!("blocks nest deeper than {MAX_NESTING} levels"),
                open.span,
            );
            self.block_depth -= 1;
            return None;
        }
        let stmts = self.parse_stmt_list(true);
        self.block_depth -= 1;
        if !self.eat(&TokenKind::RBrace) {
            if !self.too_many_errors() {
                self.error_with_suggestion(
                    ErrorCode::UNCLOSED_BRACE,
                    "unclosed '{'",
                    open.span,
                    "add a matching '}'",
                );
            }
            return None;
        }
        let span = open.span.merge(self.previous_span());
        Some(Block { stmts, span })
    }

    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind() {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::Identifier(_) => self.parse_assign_stmt(),
            other => {
                let message = format!("expected a statement, got '{other}'");
                self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, message);
                None
            }
        }
    }

    /// `let name = expr;`
    fn parse_let_stmt(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // eat `let`
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expression()?;
        let end = self.expect_semicolon()?.span;
        Some(Stmt::Let(LetStmt {
            name,
            value,
            span: start.merge(end),
        }))
    }

    /// `name = expr;`
    fn parse_assign_stmt(&mut self) -> Option<Stmt> {
        let name = self.expect_identifier()?;
        if !self.check(&TokenKind::Eq) {
            let message = format!(
                "expected '=' after '{}', got '{}'",
                name.name,
                self.peek_kind()
            );
            self.error_at_current(ErrorCode::UNEXPECTED_TOKEN, message);
            return None;
        }
        self.advance();
        let value = self.parse_expression()?;
        let end = self.expect_semicolon()?.span;
        let span = name.span.merge(end);
        Some(Stmt::Assign(AssignStmt { name, value, span }))
    }

    /// `if (test) block [else (block | if ...)]`
    fn parse_if_stmt(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // eat `if`
        let test = self.parse_condition()?;
        let then_block = self.parse_block()?;
        let else_block = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                // `else if` nests one block deeper, same as an explicit `{ if ... }`.
                self.block_depth += 1;
                if self.block_depth > MAX_NESTING {
                    self.error_at_current(
                        ErrorCode::NESTING_LIMIT_EXCEEDED,
                        format!("blocks nest deeper than {MAX_NESTING} levels"),
                    );
                    self.block_depth -= 1;
                    return None;
                }
                let nested = self.parse_if_stmt();
                self.block_depth -= 1;
                let nested = nested?;
                let span = nested.span();
                Block {
                    stmts: vec![nested],
                    span,
                }
            } else {
                self.parse_block()?
            }
        } else {
            Block {
                stmts: Vec::new(),
                span: then_block.span,
            }
        };
        let span = start.merge(self.previous_span());
        Some(Stmt::If(IfStmt {
            test,
            then_block,
            else_block,
            span,
        }))
    }

    /// `while (test) block`
    fn parse_while_stmt(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // eat `while`
        let test = self.parse_condition()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::While(WhileStmt { test, body, span }))
    }

    /// `print(expr);`
    fn parse_print_stmt(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // eat `print`
        self.expect(&TokenKind::LParen)?;
        let value = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;
        let end = self.expect_semicolon()?.span;
        Some(Stmt::Print(PrintStmt {
            value,
            span: start.merge(end),
        }))
    }

    /// `"(" expr ")"` after `if` / `while`.
    fn parse_condition(&mut self) -> Option<Expr> {
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;
        Some(test)
    }
}
