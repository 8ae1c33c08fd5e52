use crate::ast::Program;
use crate::error::{ParseError, PipelineError};
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use log::{info, trace};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    ParseFailed,
    RuntimeFailed,
}

/// Lexes and parses `source`, returning the program only when no
/// diagnostics were recorded.
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    trace!("parsing {} byte(s) of source", source.len());
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    match program {
        Some(program) if !parser.has_errors() => Ok(program),
        _ => Err(parser.into_errors()),
    }
}

/// Runs the whole pipeline, reporting diagnostics on stderr and printed
/// lines on stdout.
pub fn run(source: &str, filename: Option<&str>) -> RunOutcome {
    let program = match parse(source) {
        Ok(program) => program,
        Err(errors) => {
            info!("parsing failed with {} error(s)", errors.len());
            eprintln!("Parsing errors encountered:");
            for error in &errors {
                if error.report(source, filename).is_err() {
                    eprintln!("{}", error);
                }
            }
            return RunOutcome::ParseFailed;
        }
    };

    info!(
        "parsed program '{}' with {} declaration(s)",
        program.name,
        program.declarations.len()
    );
    let mut interpreter = Interpreter::new();
    if let Err(error) = interpreter.run(&program) {
        // Let already printed lines reach the terminal before the report
        let _ = std::io::stdout().flush();
        if error.report(source, filename).is_err() {
            eprintln!("{}", error);
        }
        info!("execution stopped: {}", error.message);
        return RunOutcome::RuntimeFailed;
    }

    info!("program '{}' finished", program.name);
    println!("Program executed successfully.");
    RunOutcome::Success
}

/// Runs `source` against an in-memory sink and returns everything it
/// printed.
pub fn interpret(source: &str) -> Result<String, PipelineError> {
    let program = parse(source).map_err(PipelineError::Parse)?;

    let mut interpreter = Interpreter::with_output(Vec::new());
    let result = interpreter.run(&program);
    let output = String::from_utf8_lossy(&interpreter.into_output()).into_owned();

    match result {
        Ok(()) => Ok(output),
        Err(error) => Err(PipelineError::Runtime { error, output }),
    }
}
