//! Search command
//!
//! Usage: credstore search <TERM>
//!
//! Prints matching usernames, one per line.

use clap::Args;
use credstore_engine::Services;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Username prefix (case-sensitive)
    pub term: String,
}

/// Execute search command
pub fn execute(args: SearchArgs, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    for username in services.credentials.search_prefix(&args.term)? {
        println!("{}", username);
    }
    Ok(())
}
