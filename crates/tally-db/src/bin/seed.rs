//! # Seed Data Generator
//!
//! Populates the database with products for local development.
//!
//! ## Usage
//! ```bash
//! # Catalogue products plus 50 generated ones (default)
//! cargo run -p tally-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p tally-db --bin seed -- --count 500 --db ./data/tally.db
//! ```
//!
//! The three catalogue products always get ids 1, 2 and 3 on a fresh
//! database, so requests like `[{"productId":1,"quantity":1}]` work out of
//! the box.

use std::env;
use tally_db::{Database, DbConfig};

/// Fixed catalogue, inserted first.
const CATALOGUE: &[(&str, i64)] = &[
    ("Martelo de Thor", 10),
    ("Traje de encolhimento", 20),
    ("Escudo do Capitão América", 30),
];

/// Name stems for generated products
const STEMS: &[&str] = &[
    "Coca-Cola",
    "Pepsi",
    "Orange Juice",
    "Lays Classic",
    "Snickers",
    "Whole Milk",
    "Cheddar",
    "Ice Cream",
    "Pasta",
    "Rice",
];

/// Size variants for generated products
const SIZES: &[&str] = &["Small", "Medium", "Large", "12oz", "2L", "6-Pack"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./data/tally.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of generated products (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./data/tally.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Tally Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!("Products: {} + {} generated", CATALOGUE.len(), count);
    println!();

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (name, quantity) in CATALOGUE {
        let id = db.products().insert(name, *quantity).await?;
        println!("  #{} {}", id, name);
    }

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for stem in STEMS.iter().cycle() {
        for size in SIZES {
            if generated >= count {
                break 'outer;
            }

            let name = format!("{} {} #{}", stem, size, generated + 1);
            let quantity = ((generated * 17) % 101) as i64;

            if let Err(e) = db.products().insert(&name, quantity).await {
                eprintln!("Failed to insert {}: {}", name, e);
            }
            generated += 1;
        }
    }

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
