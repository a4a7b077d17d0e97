use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

/// Words that end the interactive session.
const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Prints `label` and reads one line from `input`.
///
/// Returns `None` at end of input. The trailing newline is stripped.
pub fn ask<R: BufRead>(input: &mut R, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn is_quit(answer: &str) -> bool {
    let answer = answer.trim();
    QUIT_WORDS.iter().any(|word| answer.eq_ignore_ascii_case(word))
}

/// Parses a `YYYY-MM-DD` answer, falling back to `default` when it is blank.
pub fn parse_date(answer: &str, default: NaiveDate) -> Result<NaiveDate, chrono::ParseError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    NaiveDate::parse_from_str(answer, "%Y-%m-%d")
}

/// Asks for the opening date until a valid one is entered.
///
/// Returns `None` at end of input or when the user quits.
pub fn ask_date<R: BufRead>(input: &mut R, default: NaiveDate) -> io::Result<Option<NaiveDate>> {
    loop {
        let label = format!("Opening date [{}]: ", default.format("%Y-%m-%d"));
        let Some(answer) = ask(input, &label)? else {
            return Ok(None);
        };
        if is_quit(&answer) {
            return Ok(None);
        }
        match parse_date(&answer, default) {
            Ok(date) => return Ok(Some(date)),
            Err(e) => eprintln!("Invalid date '{}' ({e}); use YYYY-MM-DD.", answer.trim()),
        }
    }
}
