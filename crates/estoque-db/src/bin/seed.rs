//! # Seed Data Generator
//!
//! Populates the database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p estoque-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p estoque-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p estoque-db --bin seed -- --db ./data/estoque.db
//! ```
//!
//! Each product gets a name built from an item and a variant, a price
//! between 4.90 and 499.90, and a stock level between 0 and 120.

use clap::Parser;
use estoque_core::{Money, Product};
use estoque_db::{ConnectionConfig, Database};

/// Item names for sample data.
const ITEMS: &[&str] = &[
    "Mouse",
    "Keyboard",
    "Monitor",
    "Headset",
    "Webcam",
    "USB Cable",
    "HDMI Cable",
    "Power Strip",
    "Notebook Stand",
    "Desk Lamp",
];

/// Variants combined with each item.
const VARIANTS: &[&str] = &["Basic", "Pro", "Wireless", "Compact", "XL"];

/// Estoque seed data generator.
#[derive(Parser, Debug)]
#[command(name = "seed", about = "Estoque Seed Data Generator")]
struct SeedArgs {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 50)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./estoque_dev.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let SeedArgs { count, db: db_path } = SeedArgs::parse();

    println!("Estoque Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(ConnectionConfig::new(&db_path));
    db.ensure_schema().await?;
    println!("✓ Product table ready");

    let existing = db.products().list().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let repo = db.products();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for (seed, (item, variant)) in ITEMS
        .iter()
        .flat_map(|item| VARIANTS.iter().map(move |variant| (item, variant)))
        .cycle()
        .take(count)
        .enumerate()
    {
        let product = generate_product(item, variant, seed);

        if let Err(e) = repo.create(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        generated += 1;

        if generated % 10 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!("  Next id would be {}", repo.next_id().await?);

    Ok(())
}

/// Generates a single product with deterministic pseudo-random data.
fn generate_product(item: &str, variant: &str, seed: usize) -> Product {
    // Round prices ending in .90: 4.90 .. 499.90
    let units = 4 + ((seed * 37) % 496) as i64;
    let price = Money::from_cents(units * 100 + 90);

    let quantity = ((seed * 13) % 121) as i64;

    // Past the first cycle, number the names so they stay distinct
    let round = seed / (ITEMS.len() * VARIANTS.len());
    let name = if round == 0 {
        format!("{} {}", item, variant)
    } else {
        format!("{} {} #{}", item, variant, round + 1)
    };

    Product::new(name, price, quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = SeedArgs::try_parse_from(["seed"]).unwrap();
        assert_eq!(args.count, 50);
        assert_eq!(args.db, "./estoque_dev.db");

        let args = SeedArgs::try_parse_from(["seed", "-c", "200", "--db", "shop.db"]).unwrap();
        assert_eq!(args.count, 200);
        assert_eq!(args.db, "shop.db");
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        assert!(SeedArgs::try_parse_from(["seed", "--count", "abc"]).is_err());
        assert!(SeedArgs::try_parse_from(["seed", "--count", "-5"]).is_err());
    }

    #[test]
    fn test_generated_products_are_valid() {
        for seed in 0..120 {
            let product = generate_product("Mouse", "Pro", seed);
            assert!(product.price.cents() >= 490);
            assert!(product.price.cents() <= 49990);
            assert_eq!(product.price.cents() % 100, 90);
            assert!((0..=120).contains(&product.quantity));
            assert!(!product.name.is_empty());
        }
    }
}
