//! Error reporting and recovery edge cases for the Brisk parser.

use brisk_lexer::Lexer;
use brisk_parser::{ParseResult, Parser};
use brisk_types::ast::Stmt;
use brisk_types::{ErrorCode, SourceFile, MAX_ERRORS};

fn parse(source: &str) -> ParseResult {
    let sf = SourceFile::new("test.bk", source);
    let lex = Lexer::new(&sf).lex();
    Parser::new(lex.tokens, &sf).parse()
}

fn codes(source: &str) -> Vec<ErrorCode> {
    parse(source).errors.errors.iter().map(|e| e.code).collect()
}

fn first_message(source: &str) -> String {
    parse(source)
        .errors
        .errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────
// Single errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_semicolon() {
    let result = parse("let x = 1");
    assert_eq!(result.errors.total_errors, 1);
    let err = &result.errors.errors[0];
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.message, "expected ';', got 'end of file'");
    assert_eq!(err.suggestion.as_deref(), Some("end the statement with ';'"));
}

#[test]
fn test_keyword_as_name() {
    assert_eq!(
        first_message("let while = 1;"),
        "'while' is a reserved word and cannot be used as a name"
    );
}

#[test]
fn test_bare_expression_statement() {
    assert_eq!(first_message("x;"), "expected '=' after 'x', got ';'");
    assert_eq!(first_message("1 + 2;"), "expected a statement, got '1'");
}

#[test]
fn test_missing_condition_parens() {
    assert_eq!(first_message("while x > 0 { }"), "expected '(', got 'x'");
}

#[test]
fn test_unclosed_block() {
    let result = parse("while (true) {\n  let x = 1;\n");
    assert_eq!(result.errors.total_errors, 1);
    let err = &result.errors.errors[0];
    assert_eq!(err.code, ErrorCode::UNCLOSED_BRACE);
    assert_eq!((err.span.line, err.span.col), (1, 14));
    assert_eq!(err.source_line, "while (true) {");
}

#[test]
fn test_unmatched_close_brace() {
    let result = parse("let x = 1; } x = 2;");
    assert_eq!(result.errors.total_errors, 1);
    assert_eq!(result.errors.errors[0].message, "unmatched '}'");
    assert_eq!(result.program.map(|p| p.stmts.len()), Some(2));
}

#[test]
fn test_chained_comparison() {
    assert_eq!(codes("print(1 < 2 < 3);"), vec![ErrorCode::CHAINED_COMPARISON]);
}

#[test]
fn test_unary_minus_on_variable() {
    let result = parse("print(-x);");
    let err = &result.errors.errors[0];
    assert_eq!(err.message, "unary '-' only applies to number literals");
    assert_eq!(err.suggestion.as_deref(), Some("subtract from zero instead: 0 - x"));
}

#[test]
fn test_missing_operand() {
    assert_eq!(first_message("let x = 1 + ;"), "expected expression, got ';'");
}

// ─────────────────────────────────────────────────────────────────────
// Recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_recovers_at_next_statement() {
    let result = parse("let = 1; let y = 2; print(;\nprint(y);");
    assert_eq!(result.errors.total_errors, 2);
    let stmts = result.program.expect("program").stmts;
    assert_eq!(stmts.len(), 2);
    assert!(matches!(stmts[0], Stmt::Let(_)));
    assert!(matches!(stmts[1], Stmt::Print(_)));
}

#[test]
fn test_recovers_inside_block() {
    let result = parse("if (true) { x = ; y = 2; } print(y);");
    assert_eq!(result.errors.total_errors, 1);
    let stmts = result.program.expect("program").stmts;
    assert_eq!(stmts.len(), 2);
    let Stmt::If(s) = &stmts[0] else {
        panic!("expected if");
    };
    assert_eq!(s.then_block.stmts.len(), 1);
}

#[test]
fn test_error_limit() {
    let src = "let;".repeat(40);
    let result = parse(&src);
    assert_eq!(result.errors.errors.len(), MAX_ERRORS);
    assert!(result.errors.total_errors >= MAX_ERRORS);
}

#[test]
fn test_expression_nesting_limit() {
    let src = format!("print({}1{});", "(".repeat(80), ")".repeat(80));
    assert!(codes(&src).contains(&ErrorCode::NESTING_LIMIT_EXCEEDED));
}

#[test]
fn test_block_nesting_limit() {
    let src = format!("{}{}", "if (true) {".repeat(70), "}".repeat(70));
    assert!(codes(&src).contains(&ErrorCode::NESTING_LIMIT_EXCEEDED));
}

#[test]
fn test_nesting_just_under_limit_is_fine() {
    let src = format!("print({}1{});", "(".repeat(60), ")".repeat(60));
    assert!(!parse(&src).errors.has_errors());
}

#[test]
fn test_long_operator_chain_hits_nesting_limit() {
    let src = format!("let x = 1{};", " + 1".repeat(100));
    assert!(codes(&src).contains(&ErrorCode::NESTING_LIMIT_EXCEEDED));
    assert!(first_message(&src).contains("nest deeper than 64"));
}

#[test]
fn test_operator_chain_under_limit_is_fine() {
    let src = format!("let x = 1{};", " * 2 + 1".repeat(25));
    assert!(!parse(&src).errors.has_errors());
}

#[test]
fn test_long_else_if_chain_hits_nesting_limit() {
    let src = format!("if (false) {{}}{}", " else if (false) {}".repeat(100));
    assert!(codes(&src).contains(&ErrorCode::NESTING_LIMIT_EXCEEDED));
}

#[test]
fn test_else_if_chain_under_limit_is_fine() {
    let src = format!("if (false) {{}}{} else {{ print(1); }}", " else if (false) {}".repeat(40));
    assert!(!parse(&src).errors.has_errors());
}
