mod error;

use error::Error;
use natex::{engine, parse_with, suggest::suggest, Lexicon, ParseResult, Tier};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Characters that only appear in requests written as infix expressions.
const INFIX_SYMBOLS: &[char] = &['+', '-', '*', '/', '^', '(', ')'];

/// Converts the request, or explains why it could not be converted.
fn convert(input: &str, tier: Tier) -> Result<ParseResult, Error> {
    if let Some(result) = parse_with(input, tier) {
        return Ok(result);
    }

    // a request made of symbols is an expression; show where it goes wrong
    if input.contains(INFIX_SYMBOLS) {
        engine::parse(input)?;
    }

    Err(Error::Unprocessable { suggestion: suggest(Lexicon::shared(), input) })
}

/// Converts one line of input, returning the request as it was read along with the outcome.
/// Error spans are relative to the returned request, not the line.
fn convert_line(line: &str, tier: Tier) -> (&str, Result<ParseResult, Error>) {
    let input = line.trim();
    (input, convert(input, tier))
}

/// Converts the request and prints the result or the error.
fn read_convert(line: &str, tier: Tier) {
    let (input, result) = convert_line(line, tier);
    match result {
        Ok(result) => {
            println!("{}", result.latex);
            println!("  {} ({}, confidence {:.2})", result.plain_text, result.method_used, result.confidence);
        },
        Err(err) => err.report_to_stderr(input),
    }
}

/// Converts every non-empty line of the input.
fn execute(input: &str, tier: Tier) {
    input.lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(|line| read_convert(line, tier));
}

/// Handles a REPL command such as `:pattern`, returning true if the line was a command.
fn command(input: &str, tier: &mut Tier) -> bool {
    let new_tier = match input.trim() {
        ":pattern" => Tier::Pattern,
        ":heuristic" => Tier::Heuristic,
        ":all" => Tier::All,
        _ => return false,
    };
    *tier = new_tier;
    println!("using tier: {:?}", tier);
    true
}

/// Installs a stderr subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let mut tier = Tier::All;
    let mut filename = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pattern" => tier = Tier::Pattern,
            "--heuristic" => tier = Tier::Heuristic,
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown flag `{}`", flag);
                eprintln!("usage: natex [--pattern | --heuristic] [FILE]");
                return ExitCode::FAILURE;
            },
            _ => filename = Some(arg),
        }
    }
    debug!(?tier, ?filename, "starting");

    if let Some(filename) = filename {
        // convert each line of the file
        match fs::read_to_string(&filename) {
            Ok(input) => execute(&input, tier),
            Err(err) => {
                eprintln!("error: could not read `{}`: {}", filename, err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read requests from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("error: could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        execute(&input, tier);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("error: could not start the line editor: {}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor, tier: &mut Tier) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            if !command(&input, tier) {
                read_convert(&input, *tier);
            }
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut tier) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_requests() {
        let result = convert("x plus y", Tier::All).ok().unwrap();
        assert_eq!(result.latex, "x + y");
    }

    #[test]
    fn syntax_errors_for_infix_input() {
        assert!(matches!(convert("(x + ", Tier::All), Err(Error::Syntax(_))));
    }

    #[test]
    fn syntax_error_spans_match_trimmed_input() {
        let (input, result) = convert_line("   (x + ", Tier::All);
        match result {
            Err(Error::Syntax(err)) => {
                assert_eq!(&input[err.spans[0].clone()], "(");
            },
            _ => panic!("expected a syntax error"),
        }
    }

    #[test]
    fn unprocessable_with_suggestion() {
        match convert("limmit of nothing", Tier::All) {
            Err(Error::Unprocessable { suggestion: Some(suggestion) }) => {
                assert_eq!(suggestion.keyword, "limit");
            },
            _ => panic!("expected an unprocessable error with a suggestion"),
        }
    }

    #[test]
    fn tier_commands() {
        let mut tier = Tier::All;
        assert!(command(":pattern", &mut tier));
        assert_eq!(tier, Tier::Pattern);
        assert!(!command("x plus y", &mut tier));
        assert_eq!(tier, Tier::Pattern);
    }
}
