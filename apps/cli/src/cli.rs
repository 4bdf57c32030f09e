//! # Command-Line Arguments
//!
//! ```text
//! estoque [--db URL] [--user NAME] [--password PW] [--json] <COMMAND>
//!
//!   init                                   create the product table
//!   list                                   all products, ordered by id
//!   show     --id N                        one product
//!   add      --name T --price P --quantity Q
//!   update   --id N --name T --price P --quantity Q
//!   delete   --id N
//!   next-id                                id the next add will probably get
//!   health                                 check the database is reachable
//! ```
//!
//! Field values are taken as raw text so that empty or malformed input is
//! reported by product validation rather than by the argument parser.

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use estoque_core::{ProductForm, ID_PLACEHOLDER};

#[derive(Parser, Debug)]
#[command(
    name = "estoque",
    author,
    version,
    about = "Product inventory maintenance",
    long_about = "Register, list, update and delete products (name, price, quantity) \
                  stored in a SQLite database."
)]
pub struct Cli {
    /// Database endpoint: SQLite file path or URL (overrides ESTOQUE_DB_URL)
    #[arg(long = "db", value_name = "URL", global = true)]
    pub database_url: Option<String>,

    /// Database user name (overrides ESTOQUE_DB_USER)
    #[arg(long = "user", value_name = "NAME", global = true)]
    pub username: Option<String>,

    /// Database password (overrides ESTOQUE_DB_PASSWORD)
    #[arg(long, value_name = "PASSWORD", global = true)]
    pub password: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the product table if it does not exist
    Init,
    /// List all products ordered by id
    List,
    /// Show a single product
    Show(IdArgs),
    /// Add a product (the id is assigned by the database)
    Add(FieldArgs),
    /// Replace name, price and quantity of a product
    Update(UpdateArgs),
    /// Delete a product
    Delete(IdArgs),
    /// Show the id the next product will probably get
    NextId,
    /// Check that the database can be opened and queried
    Health,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct IdArgs {
    /// Product id
    #[arg(long, default_value = "")]
    pub id: String,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct FieldArgs {
    /// Product name (up to 255 characters)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Unit price, e.g. 49.90
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub price: String,

    /// Quantity in stock
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: IdArgs,

    #[command(flatten)]
    pub fields: FieldArgs,
}

impl FieldArgs {
    /// Builds an insertion form. The id field shows the placeholder.
    pub fn to_form(&self) -> ProductForm {
        ProductForm::new(ID_PLACEHOLDER, &self.name, &self.price, &self.quantity)
    }
}

impl UpdateArgs {
    /// Builds a form addressing the selected id.
    pub fn to_form(&self) -> ProductForm {
        ProductForm {
            id: self.target.id.clone(),
            ..self.fields.to_form()
        }
    }
}

impl Cli {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(user) = &self.username {
            config.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "estoque", "add", "--name", "Mouse", "--price", "49.90", "--quantity", "10",
        ])
        .unwrap();

        let Command::Add(args) = &cli.command else {
            panic!("expected add, got {:?}", cli.command);
        };
        let form = args.to_form();
        assert_eq!(form, ProductForm::new(ID_PLACEHOLDER, "Mouse", "49.90", "10"));
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_fields_reach_validation() {
        let cli = Cli::try_parse_from(["estoque", "add", "--name", "Mouse"]).unwrap();

        let Command::Add(args) = &cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.price, "");
        assert!(args.to_form().to_new_product().is_err());
    }

    #[test]
    fn test_negative_values_are_accepted_as_text() {
        let cli = Cli::try_parse_from([
            "estoque", "add", "--name", "Mouse", "--price", "-1", "--quantity", "-5",
        ])
        .unwrap();

        let Command::Add(args) = &cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.price, "-1");
        assert_eq!(args.quantity, "-5");
    }

    #[test]
    fn test_parse_update_and_delete() {
        let cli = Cli::try_parse_from([
            "estoque", "update", "--id", "1", "--name", "Mouse", "--price", "39.90",
            "--quantity", "8",
        ])
        .unwrap();
        let Command::Update(args) = &cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.to_form(), ProductForm::new("1", "Mouse", "39.90", "8"));

        let cli = Cli::try_parse_from(["estoque", "delete", "--id", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Delete(IdArgs {
                id: "3".to_string()
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "estoque", "list", "--json", "--db", "shop.db", "--user", "estoque",
        ])
        .unwrap();

        assert_eq!(cli.command, Command::List);
        assert!(cli.json);

        let config = cli.apply_overrides(AppConfig::from_lookup(|_| None));
        assert_eq!(config.database_url, "shop.db");
        assert_eq!(config.username.as_deref(), Some("estoque"));
        assert_eq!(config.password, None);
    }

    #[test]
    fn test_flags_override_environment() {
        let env = |key: &str| match key {
            "ESTOQUE_DB_URL" => Some("env.db".to_string()),
            "ESTOQUE_DB_PASSWORD" => Some("from-env".to_string()),
            _ => None,
        };

        let cli = Cli::try_parse_from(["estoque", "--db", "flag.db", "next-id"]).unwrap();
        let config = cli.apply_overrides(AppConfig::from_lookup(env));

        assert_eq!(cli.command, Command::NextId);
        assert_eq!(config.database_url, "flag.db");
        assert_eq!(config.password.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_parse_health() {
        let cli = Cli::try_parse_from(["estoque", "health", "--db", "shop.db"]).unwrap();
        assert_eq!(cli.command, Command::Health);
        assert_eq!(cli.database_url.as_deref(), Some("shop.db"));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["estoque", "purge"]).is_err());
    }
}
