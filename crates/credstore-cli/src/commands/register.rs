//! Register command
//!
//! Usage: credstore register <USERNAME> [--password P] [--confirm C]

use super::secret_or_stdin;
use clap::Args;
use credstore_core_types::Sensitive;
use credstore_engine::{RegistrationForm, Services};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    pub username: String,

    /// Password; read from stdin when omitted
    #[arg(long)]
    pub password: Option<String>,

    /// Confirmation; defaults to the password itself
    #[arg(long)]
    pub confirm: Option<String>,
}

/// Execute register command
pub fn execute(args: RegisterArgs, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let password = secret_or_stdin(args.password, "Password")?;
    let confirm = match args.confirm {
        Some(confirm) => Sensitive::new(confirm),
        None => password.clone(),
    };

    let form = RegistrationForm {
        username: args.username,
        password,
        confirm,
    };
    services.credentials.register_form(&form)?;

    println!("User {} registered", form.username.trim());
    Ok(())
}
