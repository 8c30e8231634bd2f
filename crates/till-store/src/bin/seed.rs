//! # Demo Catalog Generator
//!
//! Writes a catalog file full of plausible products for trying out the till.
//!
//! ## Usage
//! ```bash
//! # 60 products into ./inventory.txt (default)
//! cargo run -p till-store --bin seed
//!
//! # Custom amount and file
//! cargo run -p till-store --bin seed -- --count 200 --out ./data/inventory.txt
//! ```
//!
//! Output is deterministic: the same count always gives the same file.
//! Barcodes look like `{CATEGORY}-{INDEX}`, prices fall between $0.49 and
//! $12.48, discounts are one of 0/5/10/25 %, and stock runs 0 to 40.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use till_core::{Discount, Money, Product};
use till_store::{CatalogBackend, FlatFileBackend, WriteMode, DEFAULT_INVENTORY_FILE};

/// Product names per category
const CATEGORIES: &[(&str, &[&str])] = &[
    ("BEV", &["Cola", "Lemon Soda", "Still Water", "Sparkling Water", "Orange Juice", "Cold Brew", "Iced Tea", "Energy Drink"]),
    ("SNK", &["Salted Crisps", "Pretzels", "Trail Mix", "Chocolate Bar", "Gummy Bears", "Oat Cookies", "Popcorn", "Rice Cakes"]),
    ("DRY", &["Whole Milk", "Oat Milk", "Cheddar", "Butter", "Greek Yogurt", "Eggs, dozen", "Cream Cheese", "Feta"]),
    ("GRO", &["White Bread", "Spaghetti", "Basmati Rice", "Tomato Soup", "Peanut Butter", "Honey", "Flour", "Rolled Oats"]),
];

/// Pack sizes and what they add to the base price, in cents
const SIZES: &[(&str, i64)] = &[("Single", 0), ("Twin Pack", 150), ("Family Size", 400)];

/// Whole-percent discounts handed out in rotation
const DISCOUNTS: &[u8] = &[0, 0, 5, 10, 0, 25];

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Write a demo catalog for the till")]
struct Args {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 60)]
    count: usize,

    /// Catalog file to write
    #[arg(short, long, default_value = DEFAULT_INVENTORY_FILE)]
    out: PathBuf,

    /// Replace a catalog that already has products
    #[arg(long)]
    force: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let backend = FlatFileBackend::new(&args.out).with_mode(WriteMode::Atomic);

    println!("Till Demo Catalog Generator");
    println!("===========================");
    println!("File:     {}", args.out.display());
    println!("Products: {}", args.count);
    println!();

    if !args.force {
        match backend.load() {
            Ok(existing) if !existing.is_empty() => {
                println!("Catalog already has {} products", existing.len());
                println!("  Skipping seed. Pass --force to replace it.");
                return ExitCode::SUCCESS;
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                eprintln!("Unable to read existing catalog: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let products = generate_catalog(args.count);

    if let Err(e) = backend.save(&products) {
        eprintln!("Unable to write catalog: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Wrote {} products", products.len());
    ExitCode::SUCCESS
}

/// Builds `count` products, cycling sizes within names within categories.
fn generate_catalog(count: usize) -> Vec<Product> {
    CATEGORIES
        .iter()
        .flat_map(|(code, names)| {
            names.iter().flat_map(move |name| {
                SIZES.iter().map(move |(size, addon)| (*code, *name, *size, *addon))
            })
        })
        .cycle()
        .enumerate()
        .take(count)
        .map(|(index, (code, name, size, addon))| generate_product(code, name, size, addon, index))
        .collect()
}

/// Generates a single product from its position in the catalog.
fn generate_product(category: &str, name: &str, size: &str, price_addon: i64, seed: usize) -> Product {
    let barcode = format!("{}-{:04}", category, seed);
    let price = Money::from_cents(49 + ((seed * 37) % 800) as i64 + price_addon);
    let discount = Discount::from_percent(DISCOUNTS[seed % DISCOUNTS.len()]);
    let stock = ((seed * 7) % 41) as u32;

    Product::new(format!("{} {}", name, size), barcode, price, discount, stock)
}
