// Parser tests: tree shape, diagnostics, and a table-driven robustness
// suite over whole programs.

use pastel::ast::{BinaryOp, Expr, Program, Stmt};
use pastel::error::ParseError;
use pastel::lexer::Lexer;
use pastel::parser::Parser;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Runs every case and returns the names and reasons of the failures.
    pub fn run(&self) -> Vec<(String, TestResult)> {
        println!("Running test suite: {}", self.name);

        let mut failures = Vec::new();
        for test in &self.tests {
            match run_single_test(test) {
                TestResult::Pass => println!("  ok   {}", test.name),
                other => {
                    println!("  FAIL {}: {:?}", test.name, other);
                    failures.push((test.name.clone(), other));
                }
            }
        }
        failures
    }
}

fn run_single_test(test: &TestCase) -> TestResult {
    // Catch any panics to detect crashes
    let result = std::panic::catch_unwind(|| parse_input(&test.input));

    match result {
        Ok(parse_result) => match (parse_result, test.should_succeed) {
            (Ok(_), true) => TestResult::Pass,
            (Ok(_), false) => {
                TestResult::Fail("Expected parsing to fail, but it succeeded".to_string())
            }
            (Err(errors), false) => match &test.expected_error_contains {
                Some(expected) if !errors.iter().any(|e| e.message.contains(expected)) => {
                    TestResult::Fail(format!(
                        "No error message contains '{}': {:?}",
                        expected,
                        errors.iter().map(|e| &e.message).collect::<Vec<_>>()
                    ))
                }
                _ => TestResult::Pass,
            },
            (Err(errors), true) => TestResult::Fail(format!(
                "Expected parsing to succeed, but got: {}",
                errors[0]
            )),
        },
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

fn parse_input(input: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(input));
    match parser.parse_program() {
        Some(program) if !parser.has_errors() => Ok(program),
        _ => Err(parser.into_errors()),
    }
}

fn parse_expr(input: &str) -> Expr {
    let mut parser = Parser::new(Lexer::new(input));
    let expr = parser.parse_expression();
    assert!(!parser.has_errors(), "unexpected errors: {:?}", parser.errors());
    expr.expect("expression should parse")
}

fn body(statements: &str) -> String {
    format!("program test;\nvar x: integer;\nbegin\n{}\nend.", statements)
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_program_structure_tests() -> TestSuite {
    let mut suite = TestSuite::new("Program Structure");

    suite.add_test(TestCase::should_succeed("minimal_program", "program test;\nbegin\nend."));
    suite.add_test(TestCase::should_succeed(
        "uppercase_keywords",
        "PROGRAM Test; BEGIN WriteLn(1); END.",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_program_keyword",
        "test;\nbegin\nend.",
        "Expected 'program' keyword",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_program_name",
        "program 42;\nbegin\nend.",
        "Expected program name",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_header_semicolon",
        "program test\nbegin\nend.",
        "Expected semicolon",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_begin",
        "program test;\nvar x: integer;\nx := 1;\nend.",
        "Expected 'begin' block",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_final_dot",
        "program test;\nbegin\nend",
        "Expected '.' at the end of the program",
    ));
    suite.add_test(TestCase::should_fail("empty_input", ""));

    suite
}

fn create_declaration_tests() -> TestSuite {
    let mut suite = TestSuite::new("Declarations");

    suite.add_test(TestCase::should_succeed(
        "all_types",
        "program t;\nvar a: integer;\nvar b: real;\nvar c: boolean;\nvar d: char;\nvar e: string;\nbegin\nend.",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_variable_name",
        "program t;\nvar : integer;\nbegin\nend.",
        "Expected variable name after 'var'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_colon",
        "program t;\nvar x integer;\nbegin\nend.",
        "Expected ':' after variable name",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unknown_type",
        "program t;\nvar x: float;\nbegin\nend.",
        "Expected type for variable",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_declaration_semicolon",
        "program t;\nvar x: integer\nbegin\nend.",
        "Expected ';' after variable declaration",
    ));

    suite
}

fn create_statement_tests() -> TestSuite {
    let mut suite = TestSuite::new("Statements");

    suite.add_test(TestCase::should_succeed("assignment", &body("x := 1;")));
    suite.add_test(TestCase::should_succeed("writeln", &body("writeln(x);")));
    suite.add_test(TestCase::should_succeed(
        "nested_compound",
        &body("begin\nx := 1;\nend;\nwriteln(x);"),
    ));
    suite.add_test(TestCase::should_succeed(
        "nested_compound_without_semicolon",
        &body("begin x := 1; end\nwriteln(x);"),
    ));
    suite.add_test(TestCase::should_succeed(
        "back_to_back_blocks",
        &body("begin writeln(1); end begin writeln(2); end"),
    ));
    suite.add_test(TestCase::should_succeed(
        "reserved_word_is_skipped",
        &body("if x := 1;"),
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "assignment_missing_semicolon",
        &body("x := 1"),
        "Expected semicolon at the end of assignment",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "identifier_without_assign",
        &body("x 1;"),
        "Unexpected identifier 'x'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "equals_instead_of_assign",
        &body("x = 1;"),
        "Unexpected identifier 'x'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "writeln_missing_lparen",
        &body("writeln x;"),
        "Expected '(' after 'writeln'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "writeln_missing_rparen",
        &body("writeln(x;"),
        "Expected ')' after writeln argument",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "writeln_missing_semicolon",
        &body("writeln(x)\nx := 1;"),
        "Expected ';' after writeln",
    ));

    suite
}

fn create_expression_tests() -> TestSuite {
    let mut suite = TestSuite::new("Expressions");

    suite.add_test(TestCase::should_succeed("arithmetic", &body("x := 1 + 2 * 3 - 4 / 5;")));
    suite.add_test(TestCase::should_succeed("mixed_literals", &body("writeln('a' + 'bc' + 1.5);")));
    suite.add_test(TestCase::should_succeed("booleans", &body("x := true;\nx := FALSE;")));

    let deep_parens = format!("x := {}1{};", "(".repeat(100), ")".repeat(100));
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &body(&deep_parens)));

    suite.add_test(TestCase::should_fail_with_message(
        "unclosed_paren",
        &body("x := (1 + 2;"),
        "Expected closing parenthesis",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "empty_right_hand_side",
        &body("x := ;"),
        "Unexpected token in primary expression",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_right_operand",
        &body("x := 1 + ;"),
        "Unexpected token in primary expression",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "illegal_character",
        &body("x := @;"),
        "Unexpected token in primary expression",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "integer_too_large",
        &body("x := 99999999999999999999;"),
        "Integer literal out of range",
    ));
    suite.add_test(TestCase::should_fail("empty_parentheses", &body("x := ();")));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let suites = vec![
        create_program_structure_tests(),
        create_declaration_tests(),
        create_statement_tests(),
        create_expression_tests(),
    ];

    let mut failures = Vec::new();
    for suite in suites {
        failures.extend(suite.run());
    }

    assert!(failures.is_empty(), "parser cases failed: {:#?}", failures);
}

// ============================================================================
// Tree Shape
// ============================================================================

#[test]
fn test_program_name_and_declarations() {
    let program = parse_input("program Hello;\nvar Count: integer;\nvar r: REAL;\nbegin\nend.")
        .expect("program should parse");

    assert_eq!(program.name, "hello");
    assert_eq!(program.declarations.len(), 2);
    assert_eq!(program.declarations[0].name, "count");
    assert_eq!(program.declarations[0].type_name, "integer");
    assert_eq!(program.declarations[1].type_name, "real");
    assert!(program.main.statements.is_empty());
}

#[test]
fn test_assignment_and_print_statements() {
    let program = parse_input(&body("x := 42;\nwriteln(x);")).expect("program should parse");

    assert_eq!(
        program.main.statements,
        vec![
            Stmt::Assign {
                name: "x".to_string(),
                value: Expr::IntegerLiteral(42),
            },
            Stmt::Print {
                argument: Expr::Identifier("x".to_string()),
            },
        ]
    );
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_expr("2 + 3 * 4");

    let expected = Expr::binary(
        Expr::IntegerLiteral(2),
        BinaryOp::Add,
        Expr::binary(Expr::IntegerLiteral(3), BinaryOp::Multiply, Expr::IntegerLiteral(4)),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_expr("(2 + 3) * 4");

    let expected = Expr::binary(
        Expr::binary(Expr::IntegerLiteral(2), BinaryOp::Add, Expr::IntegerLiteral(3)),
        BinaryOp::Multiply,
        Expr::IntegerLiteral(4),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_operators_are_left_associative() {
    let expr = parse_expr("10 - 4 - 3");
    let expected = Expr::binary(
        Expr::binary(Expr::IntegerLiteral(10), BinaryOp::Subtract, Expr::IntegerLiteral(4)),
        BinaryOp::Subtract,
        Expr::IntegerLiteral(3),
    );
    assert_eq!(expr, expected);

    let expr = parse_expr("8 / 4 * 2");
    let expected = Expr::binary(
        Expr::binary(Expr::IntegerLiteral(8), BinaryOp::Divide, Expr::IntegerLiteral(4)),
        BinaryOp::Multiply,
        Expr::IntegerLiteral(2),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_literal_factors() {
    assert_eq!(parse_expr("3.25"), Expr::RealLiteral(3.25));
    assert_eq!(parse_expr("TRUE"), Expr::BooleanLiteral(true));
    assert_eq!(parse_expr("false"), Expr::BooleanLiteral(false));
    assert_eq!(parse_expr("'c'"), Expr::CharLiteral('c'));
    assert_eq!(parse_expr("'text'"), Expr::StringLiteral("text".to_string()));
    assert_eq!(parse_expr("''"), Expr::StringLiteral(String::new()));
    assert_eq!(parse_expr("MyVar"), Expr::Identifier("myvar".to_string()));
}

#[test]
fn test_nested_compound_statement() {
    let program =
        parse_input(&body("begin\nx := 1;\nend;\nwriteln(x);")).expect("program should parse");

    assert_eq!(program.main.statements.len(), 2);
    match &program.main.statements[0] {
        Stmt::Compound(block) => assert_eq!(block.statements.len(), 1),
        other => panic!("expected compound statement, got {:?}", other),
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_error_carries_position_and_detail() {
    let errors = parse_input("program test\nbegin\nend.").unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = &errors[0];
    assert_eq!(error.message, "Expected semicolon");
    assert_eq!(error.detail, "Got \"begin\" (BEGIN) instead.");
    assert_eq!(error.hint, "Statements must end with a semicolon.");
    assert_eq!((error.line, error.column), (2, 1));
    assert_eq!(
        error.to_string(),
        "[Parser Error] at line 2, column 1: Expected semicolon\n  -> Got \"begin\" (BEGIN) instead.\n  Hint: Statements must end with a semicolon."
    );
}

#[test]
fn test_structural_errors_have_nonzero_lines() {
    let inputs = [
        "test;\nbegin\nend.",
        "program test\nbegin\nend.",
        "program test;\nbegin\nend",
    ];

    for input in inputs {
        let errors = parse_input(input).unwrap_err();
        assert!(!errors.is_empty(), "no diagnostics for {:?}", input);
        assert!(errors.iter().all(|e| e.line > 0), "zero line in {:?}", errors);
    }
}

#[test]
fn test_errors_accumulate_across_statements() {
    let mut parser = Parser::new(Lexer::new(
        "program t;\nvar x: integer;\nbegin\n  x 1;\n  y 2;\n  x := 3;\nend.",
    ));
    let program = parser.parse_program();

    assert!(parser.has_errors());
    let errors = parser.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].message, "Unexpected identifier 'x'");
    assert_eq!(errors[0].line, 4);
    assert_eq!(errors[1].message, "Unexpected identifier 'y'");
    assert_eq!(errors[1].line, 5);

    // The valid statement after the broken ones is still in the tree
    let program = program.expect("structure is intact");
    assert_eq!(program.main.statements.len(), 1);
}

#[test]
fn test_failed_operand_reports_once() {
    let errors = parse_input(&body("x := 1 + @;")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected token in primary expression");
    assert_eq!((errors[0].line, errors[0].column), (4, 10));
}

#[test]
fn test_statement_directly_after_nested_block() {
    let program = parse_input(&body("begin x := 1; end\nwriteln(x);\nbegin end begin end"))
        .expect("program should parse");

    assert_eq!(program.main.statements.len(), 4);
    assert!(matches!(program.main.statements[0], Stmt::Compound(_)));
    assert_eq!(
        program.main.statements[1],
        Stmt::Print {
            argument: Expr::Identifier("x".to_string()),
        }
    );
    assert!(matches!(program.main.statements[2], Stmt::Compound(_)));
    assert!(matches!(program.main.statements[3], Stmt::Compound(_)));
}

#[test]
fn test_report_with_non_ascii_source() {
    let source = "program caf\u{e9};\nbegin\n  x := 'h\u{e9}llo' + ;\nend.";
    let errors = parse_input(source).unwrap_err();

    // The stray 'é' is a two-byte illegal token; spans are byte offsets
    let error = &errors[0];
    assert_eq!(error.message, "Expected semicolon");
    assert_eq!(&source[error.span.start..error.span.end], "\u{e9}");
    assert!(error.report(source, Some("cafe.pas")).is_ok());
}
