//! Login command
//!
//! Usage: credstore login <USERNAME> [--password P]
//!
//! Exits with status 1 when the credentials are rejected.

use super::secret_or_stdin;
use clap::Args;
use credstore_engine::Services;

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub username: String,

    /// Password; read from stdin when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Execute login command
pub fn execute(args: LoginArgs, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let password = secret_or_stdin(args.password, "Password")?;

    if services
        .credentials
        .authenticate(&args.username, &password)?
    {
        println!("Login successful");
        Ok(())
    } else {
        Err("invalid username or password".into())
    }
}
