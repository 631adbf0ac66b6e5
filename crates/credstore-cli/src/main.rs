//! credstore CLI
//!
//! Command-line front end for the credential store and product catalog

use clap::{Parser, Subcommand};
use credstore_core::errors::ExError;
use credstore_core::logging_facility::{self, Profile};
use credstore_engine::Services;

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "credstore")]
#[command(about = "credstore - user credentials and product catalog", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: settings::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Register a new user
    Register(commands::register::RegisterArgs),
    /// Check a username and password
    Login(commands::login::LoginArgs),
    /// List usernames starting with a term
    Search(commands::search::SearchArgs),
    /// Product catalog operations
    Product(commands::product::ProductArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = settings::resolve(&cli.global).map_err(ExError::from)?;
    logging_facility::init(Profile::from(config.log_format));

    let services = Services::from_config(&config)?;

    match cli.command {
        Commands::Register(args) => commands::register::execute(args, &services),
        Commands::Login(args) => commands::login::execute(args, &services),
        Commands::Search(args) => commands::search::execute(args, &services),
        Commands::Product(args) => commands::product::execute(args, &services),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // Internal detail is already in the log; the user only sees the safe text
        match e.downcast_ref::<ExError>() {
            Some(ex) => eprintln!("Error: {}", ex.user_message()),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
