use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use pastel::{Lexer, RunOutcome};
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("pastel")
        .about("An interpreter for a small Pascal-like language")
        .arg(
            Arg::new("file")
                .help("The program file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed program and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let Some(file_path) = matches.get_one::<String>("file") else {
        eprintln!("Usage: pastel <FILE>");
        process::exit(1);
    };
    let path = Path::new(file_path);

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    if matches.get_flag("tokens") {
        for token in Lexer::new(&source) {
            println!(
                "{}:{} {} {:?}",
                token.line, token.column, token.kind, token.literal
            );
        }
        return;
    }

    if matches.get_flag("ast") {
        match pastel::parse(&source) {
            Ok(program) => println!("{:#?}", program),
            Err(errors) => {
                for error in &errors {
                    eprintln!("{}", error);
                }
                process::exit(1);
            }
        }
        return;
    }

    if pastel::run(&source, Some(file_path)) != RunOutcome::Success {
        process::exit(1);
    }
}
