use std::io::{BufRead, Write};

use anyhow::{Result, bail};

/// Asks a question and returns the trimmed answer. Running out of input means the user
/// cancelled (for example with Ctrl+D).
pub fn ask_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Input ended, cancelled");
    }
    Ok(line.trim().to_string())
}

/// Repeats the question until it gets `y`, `yes`, `n` or `no`.
pub fn ask_yes_no(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
) -> Result<bool> {
    loop {
        let answer = ask_line(input, output, &format!("{question} (yes/no or y/n): "))?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please enter 'yes' or 'no' (or 'y' or 'n')")?,
        }
    }
}
