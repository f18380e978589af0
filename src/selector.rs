//! Numbered-menu selection and free-text prompts on the terminal.
//!
//! Both functions are generic over their input and output so the flow can
//! be driven from locked stdin/stdout at runtime and from in-memory buffers
//! in tests.

use crate::error::{Error, Result};
use log::info;
use std::io::{BufRead, Write};

/// Presents `options` as a 1-indexed menu and returns the chosen entry.
///
/// - Empty `options`: returns `Ok(None)` without prompting.
/// - A single option: returned immediately, nothing is printed or read.
/// - Otherwise the menu is printed once and a choice is read until a number
///   in `1..=N` is entered; anything else prints an error and asks again.
///
/// # Errors
/// Returns [`Error::InputClosed`] if input reaches end-of-file before a valid
/// choice, or [`Error::Stdio`] if reading or writing fails.
pub fn interactive_selection<R, W>(
    options: &[String],
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    if options.is_empty() {
        return Ok(None);
    }
    if let [only] = options {
        info!("Only one option available. Auto-selecting: {only}");
        return Ok(Some(only.clone()));
    }

    writeln!(output, "{prompt}")?;
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "{}) {option}", idx + 1)?;
    }

    loop {
        let choice = read_line(input, output, "Enter choice number: ")?;
        if let Some(option) = parse_choice(&choice, options.len()).map(|idx| &options[idx]) {
            return Ok(Some(option.clone()));
        }
        writeln!(output, "Invalid selection. Please try again.")?;
    }
}

/// Asks for a free-text value, repeating the prompt until a non-blank line is entered.
///
/// # Errors
/// Returns [`Error::InputClosed`] on end-of-file, or [`Error::Stdio`] on I/O failure.
pub fn prompt_text<R, W>(prompt: &str, input: &mut R, output: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    loop {
        let value = read_line(input, output, prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
    }
}

/// Converts a typed 1-based choice into a 0-based index into a list of `len` items.
fn parse_choice(choice: &str, len: usize) -> Option<usize> {
    match choice.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn read_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::InputClosed);
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn select(items: &[&str], typed: &str) -> (Result<Option<String>>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = interactive_selection(&options(items), "Pick one:", &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_single_option_is_auto_selected_without_prompt() {
        let (result, printed) = select(&["only"], "");
        assert_eq!(result.unwrap(), Some("only".to_string()));
        assert!(printed.is_empty());
    }

    #[test]
    fn test_empty_options_return_none() {
        let (result, printed) = select(&[], "1\n");
        assert_eq!(result.unwrap(), None);
        assert!(printed.is_empty());
    }

    #[test]
    fn test_valid_choice_returns_option() {
        let (result, printed) = select(&["a", "b", "c"], "2\n");
        assert_eq!(result.unwrap(), Some("b".to_string()));
        assert!(printed.starts_with("Pick one:\n1) a\n2) b\n3) c\n"));
        assert!(!printed.contains("Invalid selection"));
    }

    #[test]
    fn test_non_numeric_input_reprompts_once() {
        let (result, printed) = select(&["a", "b", "c"], "abc\n2\n");
        assert_eq!(result.unwrap(), Some("b".to_string()));
        assert_eq!(printed.matches("Invalid selection. Please try again.").count(), 1);
        assert_eq!(printed.matches("Enter choice number: ").count(), 2);
    }

    #[test]
    fn test_out_of_range_input_reprompts() {
        let (result, printed) = select(&["a", "b", "c"], "0\n4\n-1\n3\n");
        assert_eq!(result.unwrap(), Some("c".to_string()));
        assert_eq!(printed.matches("Invalid selection").count(), 3);
    }

    #[test]
    fn test_choice_whitespace_is_ignored() {
        let (result, _) = select(&["a", "b"], "  1  \n");
        assert_eq!(result.unwrap(), Some("a".to_string()));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let (result, _) = select(&["a", "b"], "nope\n");
        assert!(matches!(result, Err(Error::InputClosed)));
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[test]
    fn test_prompt_text_skips_blank_lines() {
        let mut input = Cursor::new(b"\n   \nus-east-1\n".to_vec());
        let mut output = Vec::new();
        let region = prompt_text("Enter AWS region: ", &mut input, &mut output).unwrap();

        assert_eq!(region, "us-east-1");
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Enter AWS region: ").count(), 3);
    }

    #[test]
    fn test_prompt_text_end_of_input() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = prompt_text("Enter AWS region: ", &mut input, &mut output);
        assert!(matches!(result, Err(Error::InputClosed)));
    }
}
