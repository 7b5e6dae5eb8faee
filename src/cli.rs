//! Command-line front end mapping one invocation to one store operation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::app_system::ShopSystem;
use crate::cart_actor::CartError;
use crate::clients::parse_limit;
use crate::domain::ProductPatch;
use crate::product_actor::ProductError;

#[derive(Debug, Parser)]
#[command(name = "shop_store")]
#[command(about = "Product catalog and shopping carts kept in JSON files")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the collection files (overrides config and environment)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Product catalog operations
    #[command(subcommand)]
    Products(ProductCommand),
    /// Shopping cart operations
    #[command(subcommand)]
    Carts(CartCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products, optionally only the first N
    List {
        #[arg(long)]
        limit: Option<String>,
    },
    /// Show one product
    Get { id: u64 },
    /// Add a product from a JSON object of attributes
    Create { attributes: String },
    /// Merge a JSON object of fields into a product
    Update { id: u64, patch: String },
    /// Remove a product
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Create an empty cart
    Create,
    /// Show a cart's lines
    Get { id: u64 },
    /// Add a product to a cart
    Add {
        cart_id: u64,
        product_id: u64,
        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<i64>,
    },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cannot encode result: {0}")]
    Output(#[from] serde_json::Error),
}

impl CommandError {
    pub fn status_code(&self) -> u16 {
        match self {
            CommandError::Product(e) => e.status_code(),
            CommandError::Cart(e) => e.status_code(),
            CommandError::InvalidArgument(_) => 400,
            CommandError::Output(_) => 500,
        }
    }
}

/// The outcome of a successful command: a status and an optional JSON body.
#[derive(Debug, PartialEq)]
pub struct CommandOutput {
    pub status: u16,
    pub body: Option<Value>,
}

impl CommandOutput {
    fn ok(body: Value) -> Self {
        Self { status: 200, body: Some(body) }
    }

    fn created(body: Value) -> Self {
        Self { status: 201, body: Some(body) }
    }

    fn no_content() -> Self {
        Self { status: 204, body: None }
    }
}

pub async fn execute(system: &ShopSystem, command: Command) -> Result<CommandOutput, CommandError> {
    match command {
        Command::Products(command) => execute_product(system, command).await,
        Command::Carts(command) => execute_cart(system, command).await,
    }
}

async fn execute_product(system: &ShopSystem, command: ProductCommand) -> Result<CommandOutput, CommandError> {
    let products = &system.product_client;
    match command {
        ProductCommand::List { limit } => {
            let items = products.list_products(parse_limit(limit.as_deref())).await?;
            Ok(CommandOutput::ok(serde_json::to_value(items)?))
        }
        ProductCommand::Get { id } => Ok(CommandOutput::ok(serde_json::to_value(products.get_product(id).await?)?)),
        ProductCommand::Create { attributes } => {
            let product = products.create_product(parse_object(&attributes)?).await?;
            Ok(CommandOutput::created(serde_json::to_value(product)?))
        }
        ProductCommand::Update { id, patch } => {
            let patch = ProductPatch::from(parse_object(&patch)?);
            Ok(CommandOutput::ok(serde_json::to_value(products.update_product(id, patch).await?)?))
        }
        ProductCommand::Delete { id } => {
            products.delete_product(id).await?;
            Ok(CommandOutput::no_content())
        }
    }
}

async fn execute_cart(system: &ShopSystem, command: CartCommand) -> Result<CommandOutput, CommandError> {
    let carts = &system.cart_client;
    match command {
        CartCommand::Create => Ok(CommandOutput::created(serde_json::to_value(carts.create_cart().await?)?)),
        CartCommand::Get { id } => Ok(CommandOutput::ok(serde_json::to_value(carts.get_lines(id).await?)?)),
        CartCommand::Add { cart_id, product_id, quantity } => {
            let lines = carts.add_product(cart_id, product_id, quantity).await?;
            Ok(CommandOutput::ok(serde_json::to_value(lines)?))
        }
    }
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, CommandError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CommandError::InvalidArgument("expected a JSON object".to_string())),
        Err(e) => Err(CommandError::InvalidArgument(e.to_string())),
    }
}

/// Error body printed on stderr.
pub fn error_body(err: &CommandError) -> Value {
    json!({ "error": err.to_string(), "status": err.status_code() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cart_add_with_negative_quantity() {
        let cli = Cli::try_parse_from(["shop_store", "carts", "add", "1", "2", "--quantity", "-3"]).unwrap();
        match cli.command {
            Command::Carts(CartCommand::Add { cart_id, product_id, quantity }) => {
                assert_eq!((cart_id, product_id, quantity), (1, 2, Some(-3)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_global_data_dir_and_product_list() {
        let cli = Cli::try_parse_from(["shop_store", "--data-dir", "/tmp/x", "products", "list", "--limit", "abc"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Command::Products(ProductCommand::List { limit }) => assert_eq!(limit.as_deref(), Some("abc")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn non_object_json_is_an_invalid_argument() {
        assert!(matches!(parse_object("[1, 2]"), Err(CommandError::InvalidArgument(_))));
        assert!(matches!(parse_object("{"), Err(CommandError::InvalidArgument(_))));
        assert_eq!(parse_object(r#"{"a": 1}"#).unwrap()["a"], json!(1));
    }

    #[test]
    fn error_body_carries_status() {
        let err = CommandError::from(CartError::NotFound("5".to_string()));
        assert_eq!(error_body(&err), json!({"error": "Cart not found: 5", "status": 404}));
    }
}
