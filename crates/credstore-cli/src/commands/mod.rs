//! Subcommand implementations

pub mod login;
pub mod product;
pub mod register;
pub mod search;

use credstore_core_types::Sensitive;
use std::io::BufRead;

/// Take a secret from its flag, or read one line from stdin
pub fn secret_or_stdin(
    flag: Option<String>,
    prompt: &str,
) -> Result<Sensitive<String>, Box<dyn std::error::Error>> {
    if let Some(value) = flag {
        return Ok(Sensitive::new(value));
    }

    eprint!("{}: ", prompt);
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let value = line.trim_end_matches(['\n', '\r']).to_string();
    Ok(Sensitive::new(value))
}
