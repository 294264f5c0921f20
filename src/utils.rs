//! Input helpers for the interactive prompt flow.
use crate::errors::GitImportError;

/// Get input from the user
pub(crate) fn input() -> Result<String, GitImportError> {
    use std::io::{stdin, stdout, Write};
    let mut s = String::new();
    let _ = stdout().flush();
    stdin()
        .read_line(&mut s)
        .map_err(|e| GitImportError::new_with_source("Did not enter a correct string", e))?;
    if let Some('\n') = s.chars().next_back() {
        s.pop();
    }
    if let Some('\r') = s.chars().next_back() {
        s.pop();
    }
    Ok(s)
}

/// Get a yes/no input from the user
pub(crate) fn yes_no_input<S: AsRef<str>>(msg: S) -> Result<bool, GitImportError> {
    let msg = msg.as_ref();
    loop {
        println!("{msg}");
        let input = input()?;
        match input.to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => println!("Invalid input"),
        }
    }
}
