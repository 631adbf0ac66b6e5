//! Product commands
//!
//! Usage:
//!   credstore product add <NAME> <QUANTITY> <PRICE>
//!   credstore product list

use clap::{Args, Subcommand};
use credstore_core::model::Product;
use credstore_engine::Services;

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Register a product
    Add(AddArgs),
    /// List products, newest first
    List,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub name: String,
    /// Non-negative whole number
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,
    /// Unit price, greater than zero (e.g. 12.50)
    #[arg(allow_hyphen_values = true)]
    pub price: String,
}

/// Execute product command
pub fn execute(args: ProductArgs, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ProductCommand::Add(add_args) => execute_add(add_args, services),
        ProductCommand::List => execute_list(services),
    }
}

fn execute_add(args: AddArgs, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let product = services
        .catalog
        .register_product(&args.name, &args.quantity, &args.price)?;

    println!("Product {} registered (id {})", product.name, product.id);
    Ok(())
}

fn execute_list(services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let products = services.catalog.list_products()?;
    if products.is_empty() {
        println!("No products registered");
        return Ok(());
    }

    println!(
        "{:>5}  {:<30}  {:>10}  {:>14}  {}",
        "ID", "Name", "Quantity", "Price", "Registered"
    );
    for product in &products {
        println!("{}", format_row(product));
    }
    Ok(())
}

fn format_row(product: &Product) -> String {
    format!(
        "{:>5}  {:<30}  {:>10}  {:>14}  {}",
        product.id,
        product.name,
        product.quantity,
        product.price_display(),
        product.registered_at_display()
    )
}
