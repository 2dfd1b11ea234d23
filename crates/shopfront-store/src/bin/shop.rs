//! # Shop Simulation
//!
//! Loads the catalog, lets a few simulated clients review products and pull
//! reports at the same time, then prints the discount summary and saves.
//!
//! ## Usage
//! ```bash
//! # Five clients, config from the default location
//! cargo run -p shopfront-store --bin shop
//!
//! # Custom client count and config file
//! cargo run -p shopfront-store --bin shop -- --clients 20 --config ./shopfront.toml
//!
//! # Also park the catalog in the temp folder and bring it back
//! cargo run -p shopfront-store --bin shop -- --snapshot
//! ```
//!
//! Every third client first stocks a new drink. Each client then picks a
//! random product, reviews it, and writes that product's report in a random
//! locale to the reports folder.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopfront_core::{Money, ProductId, Rating};
use shopfront_store::locale::{supported_locales, ResourceFormatter};
use shopfront_store::{snapshot, CatalogFiles, ProductRepository, StoreConfig, StoreResult};

const NEW_DRINKS: &[&str] = &["Lemonade", "Iced Tea", "Cold Brew", "Ginger Beer"];

const COMMENTS: &[&str] = &[
    "Not my taste",
    "Could be better",
    "Fine, nothing special",
    "Rather good",
    "Would buy again",
    "Best I ever had",
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Puts a few products in an empty catalog so there is something to review.
fn seed_if_empty(repo: &ProductRepository) -> StoreResult<()> {
    if !repo.is_empty() {
        return Ok(());
    }

    warn!("Catalog is empty, seeding sample products");
    let today = Local::now().date_naive();
    repo.create_drink(101, "Tea", Money::from_cents(199), Rating::NotRated)?;
    repo.create_drink(102, "Coffee", Money::from_cents(249), Rating::NotRated)?;
    repo.create_food(
        103,
        "Cake",
        Money::from_cents(399),
        Rating::NotRated,
        today + Duration::days(2),
    )?;
    repo.create_food(104, "Cookie", Money::from_cents(299), Rating::NotRated, today)?;
    repo.create_drink(105, "Hot Chocolate", Money::from_cents(250), Rating::NotRated)?;
    Ok(())
}

/// One simulated customer visit.
fn run_client(client: usize, repo: &ProductRepository, files: &CatalogFiles) {
    let mut rng = rand::thread_rng();
    let name = format!("client{}", client);

    if client % 3 == 0 {
        let id = 200 + (client % 100) as ProductId;
        let drink = NEW_DRINKS[rng.gen_range(0..NEW_DRINKS.len())];
        let price = Money::from_cents(rng.gen_range(150..=450));
        match repo.create_drink(id, drink, price, Rating::NotRated) {
            Ok(product) => info!(client = %name, id = %product.id(), name = %product.name(), "Product created"),
            Err(e) => warn!(client = %name, error = %e, "Create failed"),
        }
    }

    let products = repo.products();
    let Some(product) = products.choose(&mut rng) else {
        return;
    };

    let ordinal = rng.gen_range(1..=5);
    let rating = Rating::ALL[ordinal];
    let comment = COMMENTS[ordinal];

    match repo.review_product(product.id(), rating, comment) {
        Ok(reviewed) => info!(
            client = %name,
            id = %reviewed.id(),
            rating = %reviewed.rating(),
            "Review accepted"
        ),
        Err(e) => warn!(client = %name, error = %e, "Review failed"),
    }

    let tag = supported_locales()
        .choose(&mut rng)
        .copied()
        .unwrap_or_default();
    match repo.write_product_report(product.id(), tag, &name, files) {
        Ok(path) => info!(client = %name, locale = %tag, ?path, "Report ready"),
        Err(e) => warn!(client = %name, error = %e, "Report failed"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut clients: usize = 5;
    let mut config_path: Option<PathBuf> = None;
    let mut use_snapshot = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--clients" | "-n" => {
                if i + 1 < args.len() {
                    clients = args[i + 1].parse().unwrap_or(5);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--snapshot" | "-s" => use_snapshot = true,
            "--help" | "-h" => {
                println!("Shopfront shop simulation");
                println!();
                println!("Usage: shop [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --clients <N>     Simulated clients (default: 5)");
                println!("  -c, --config <PATH>   Config file (default: platform config dir)");
                println!("  -s, --snapshot        Dump and restore the catalog before saving");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    let config = StoreConfig::load(config_path)?;
    let files = CatalogFiles::new(&config);
    let repo = Arc::new(ProductRepository::new());

    repo.load_all(&files)?;
    seed_if_empty(&repo)?;
    info!(products = repo.len(), clients = clients, "Shop open");

    std::thread::scope(|s| {
        for client in 0..clients {
            let repo = Arc::clone(&repo);
            let files = &files;
            s.spawn(move || run_client(client, &repo, files));
        }
    });

    let formatter = ResourceFormatter::new(config.default_locale());
    println!("Discounts ({}):", formatter.locale());
    for (stars, total) in repo.discount_summary(&formatter) {
        println!("  {}  {}", stars, total);
    }

    if use_snapshot {
        let path = snapshot::dump(&repo, &config.folders.temp)?;
        info!(?path, "Catalog parked");
        snapshot::restore(&repo, &config.folders.temp)?;
    }

    repo.save_all(&files)?;
    Ok(())
}
